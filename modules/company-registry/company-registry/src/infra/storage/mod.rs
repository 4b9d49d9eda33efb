//! Storage adapters.
//!
//! - `entity/` - SeaORM entities for `users` and `companies`
//! - `mapper.rs` - row <-> SDK model conversion and optional-field patching
//! - `db.rs` - engine error classification
//! - `migrations/` - schema
//! - `*_sea_repo.rs` - relational repositories
//! - `memory.rs` - in-memory repositories with the same contract
//!
//! Nothing outside this module sees a `DbErr`.

pub mod companies_sea_repo;
pub mod db;
pub mod entity;
pub mod mapper;
pub mod memory;
pub mod migrations;
pub mod users_sea_repo;

#[cfg(test)]
mod mapper_test;

pub use companies_sea_repo::SeaOrmCompaniesRepository;
pub use memory::{InMemoryCompaniesRepository, InMemoryUsersRepository};
pub use users_sea_repo::SeaOrmUsersRepository;
