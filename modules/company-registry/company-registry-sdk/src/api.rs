//! `CompanyRegistryClientV1` trait definition.
//!
//! This is the surface consumed by the transport layer. Mutating company
//! operations take the caller's user id, which the transport obtains from
//! [`CompanyRegistryClientV1::authenticate`].

use async_trait::async_trait;
use uuid::Uuid;

use crate::errors::RegistryError;
use crate::models::Company;

/// Result of a successful signup or login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub user_id: Uuid,
    pub token: String,
}

#[async_trait]
pub trait CompanyRegistryClientV1: Send + Sync {
    /// Register a new account and return a token for it.
    /// Fails with `Conflict` if the username is taken.
    async fn signup(&self, username: &str, password: &str) -> Result<Session, RegistryError>;

    /// Exchange credentials for a token. Every failure is `BadCredentials`.
    async fn login(&self, username: &str, password: &str) -> Result<Session, RegistryError>;

    /// Recover the caller's user id from a bearer token.
    async fn authenticate(&self, token: &str) -> Result<Uuid, RegistryError>;

    /// Create a company on behalf of `actor`. `created_by` is set from `actor`.
    async fn create_company(&self, actor: Uuid, company: Company)
    -> Result<Company, RegistryError>;

    async fn get_company(&self, id: Uuid) -> Result<Company, RegistryError>;

    async fn get_company_by_name(&self, name: &str) -> Result<Company, RegistryError>;

    /// Apply the non-`Unset` fields of `patch` to company `id`.
    /// `updated_by` is set from `actor`.
    async fn update_company(
        &self,
        actor: Uuid,
        id: Uuid,
        patch: Company,
    ) -> Result<Company, RegistryError>;

    async fn delete_company(&self, actor: Uuid, id: Uuid) -> Result<(), RegistryError>;
}
