use async_trait::async_trait;
use company_registry_sdk::Company;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter};
use uuid::Uuid;

use super::db::db_err;
use super::entity::company::{Column, Entity as CompanyEntity};
use super::mapper::{company_from_model, company_insert, company_patch};
use crate::domain::error::DomainError;
use crate::domain::fields::entity_names::COMPANY;
use crate::domain::repos::CompaniesRepository;

/// SeaORM implementation of [`CompaniesRepository`].
///
/// Every operation is a single statement; the unique index on `name` is the
/// only duplicate check.
#[derive(Clone)]
pub struct SeaOrmCompaniesRepository {
    db: DatabaseConnection,
}

impl SeaOrmCompaniesRepository {
    #[must_use]
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CompaniesRepository for SeaOrmCompaniesRepository {
    async fn create(&self, company: Company) -> Result<Company, DomainError> {
        let am = company_insert(company)?;
        let model = am.insert(&self.db).await.map_err(db_err(COMPANY))?;
        company_from_model(model)
    }

    async fn get_by_id(&self, id: Uuid) -> Result<Company, DomainError> {
        let found = CompanyEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err(COMPANY))?
            .ok_or_else(|| DomainError::not_found(COMPANY))?;
        company_from_model(found)
    }

    async fn get_by_name(&self, name: &str) -> Result<Company, DomainError> {
        let found = CompanyEntity::find()
            .filter(Column::Name.eq(name))
            .one(&self.db)
            .await
            .map_err(db_err(COMPANY))?
            .ok_or_else(|| DomainError::not_found(COMPANY))?;
        company_from_model(found)
    }

    async fn update(&self, company: Company) -> Result<Company, DomainError> {
        let (id, am) = company_patch(company)?;
        if !am.is_changed() {
            // Nothing to write; still report a missing row.
            return self.get_by_id(id).await;
        }
        let model = am.update(&self.db).await.map_err(db_err(COMPANY))?;
        company_from_model(model)
    }

    async fn delete(&self, id: Uuid) -> Result<(), DomainError> {
        let res = CompanyEntity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(db_err(COMPANY))?;
        if res.rows_affected == 0 {
            return Err(DomainError::not_found(COMPANY));
        }
        Ok(())
    }
}
