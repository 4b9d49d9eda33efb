use std::sync::Arc;

use async_trait::async_trait;
use company_registry_sdk::{
    Company, CompanyRegistryClientV1, OptionalField, RegistryError, Session,
};
use uuid::Uuid;

use crate::domain::service::{CompaniesService, UsersService};

/// In-process implementation of [`CompanyRegistryClientV1`].
pub struct LocalClient {
    users: Arc<UsersService>,
    companies: Arc<CompaniesService>,
}

impl LocalClient {
    #[must_use]
    pub fn new(users: Arc<UsersService>, companies: Arc<CompaniesService>) -> Self {
        Self { users, companies }
    }
}

#[async_trait]
impl CompanyRegistryClientV1 for LocalClient {
    async fn signup(&self, username: &str, password: &str) -> Result<Session, RegistryError> {
        self.users
            .register(username, password)
            .await
            .map_err(Into::into)
    }

    async fn login(&self, username: &str, password: &str) -> Result<Session, RegistryError> {
        self.users
            .login(username, password)
            .await
            .map_err(Into::into)
    }

    async fn authenticate(&self, token: &str) -> Result<Uuid, RegistryError> {
        self.users.authenticate(token).map_err(Into::into)
    }

    async fn create_company(
        &self,
        actor: Uuid,
        mut company: Company,
    ) -> Result<Company, RegistryError> {
        company.created_by = OptionalField::Value(actor);
        self.companies.create(company).await.map_err(Into::into)
    }

    async fn get_company(&self, id: Uuid) -> Result<Company, RegistryError> {
        self.companies.get_by_id(id).await.map_err(Into::into)
    }

    async fn get_company_by_name(&self, name: &str) -> Result<Company, RegistryError> {
        self.companies.get_by_name(name).await.map_err(Into::into)
    }

    async fn update_company(
        &self,
        actor: Uuid,
        id: Uuid,
        mut patch: Company,
    ) -> Result<Company, RegistryError> {
        patch.id = OptionalField::Value(id);
        patch.updated_by = OptionalField::Value(actor);
        self.companies.update(patch).await.map_err(Into::into)
    }

    async fn delete_company(&self, actor: Uuid, id: Uuid) -> Result<(), RegistryError> {
        tracing::debug!(%actor, company_id = %id, "delete requested");
        self.companies.delete(id).await.map_err(Into::into)
    }
}
