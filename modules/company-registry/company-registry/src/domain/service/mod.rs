//! Domain services.
//!
//! - `users` - signup, login and token authentication
//! - `companies` - company CRUD with partial update
//!
//! Services validate before any I/O and return [`DomainError`]; the local
//! client converts it into the public `RegistryError`.
//!
//! [`DomainError`]: crate::domain::error::DomainError

use serde::Deserialize;

mod companies;
mod users;

pub use companies::CompaniesService;
pub use users::UsersService;

/// Input limits enforced by the services.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServiceConfig {
    pub max_name_length: usize,
    pub max_description_length: usize,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            max_name_length: 15,
            max_description_length: 3000,
        }
    }
}
