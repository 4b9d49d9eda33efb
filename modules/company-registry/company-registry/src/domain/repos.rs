use async_trait::async_trait;
use company_registry_sdk::{Company, User};
use uuid::Uuid;

use crate::domain::error::DomainError;

/// Persistence port for companies.
///
/// Implementations are stateless between calls and translate every engine
/// failure into [`DomainError`]. Name uniqueness is enforced by the engine,
/// never by a read before the write.
#[async_trait]
pub trait CompaniesRepository: Send + Sync {
    /// Insert a company. Assigns an id when `id` is `Unset`.
    /// Returns the stored record; `Conflict` on a duplicate name.
    async fn create(&self, company: Company) -> Result<Company, DomainError>;

    async fn get_by_id(&self, id: Uuid) -> Result<Company, DomainError>;

    async fn get_by_name(&self, name: &str) -> Result<Company, DomainError>;

    /// Write the non-`Unset` fields of `company` to the row with its id and
    /// return the re-read record. `NotFound` when no row matches.
    async fn update(&self, company: Company) -> Result<Company, DomainError>;

    async fn delete(&self, id: Uuid) -> Result<(), DomainError>;
}

/// Persistence port for users. Users are never updated or deleted.
#[async_trait]
pub trait UsersRepository: Send + Sync {
    /// Insert a user; `Conflict` on a duplicate username.
    async fn create(&self, user: User) -> Result<User, DomainError>;

    async fn get_by_id(&self, id: Uuid) -> Result<User, DomainError>;

    async fn get_by_username(&self, username: &str) -> Result<User, DomainError>;
}
