//! In-memory repositories.
//!
//! Same contract as the relational adapters. Each operation takes one lock,
//! so the uniqueness check and the write are atomic with respect to each
//! other.

use std::collections::HashMap;

use async_trait::async_trait;
use company_registry_sdk::{Company, User};
use parking_lot::Mutex;
use sea_orm::{Set, TryIntoModel};
use uuid::Uuid;

use super::entity::{company, user};
use super::mapper::{apply_company_patch, company_from_model, company_insert, user_insert};
use crate::domain::error::{DomainError, require};
use crate::domain::fields::CompanyFields;
use crate::domain::fields::entity_names::{COMPANY, USER};
use crate::domain::repos::{CompaniesRepository, UsersRepository};

#[derive(Default)]
pub struct InMemoryCompaniesRepository {
    rows: Mutex<HashMap<Uuid, company::Model>>,
}

impl InMemoryCompaniesRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.lock().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.lock().is_empty()
    }
}

#[async_trait]
impl CompaniesRepository for InMemoryCompaniesRepository {
    async fn create(&self, company: Company) -> Result<Company, DomainError> {
        let mut am = company_insert(company)?;
        if am.description.is_not_set() {
            am.description = Set(None);
        }
        if am.updated_by.is_not_set() {
            am.updated_by = Set(None);
        }
        let row = am.try_into_model().map_err(DomainError::infrastructure)?;

        let mut rows = self.rows.lock();
        if rows.contains_key(&row.id) || rows.values().any(|r| r.name == row.name) {
            return Err(DomainError::conflict(COMPANY));
        }
        rows.insert(row.id, row.clone());
        drop(rows);

        company_from_model(row)
    }

    async fn get_by_id(&self, id: Uuid) -> Result<Company, DomainError> {
        let row = self
            .rows
            .lock()
            .get(&id)
            .cloned()
            .ok_or_else(|| DomainError::not_found(COMPANY))?;
        company_from_model(row)
    }

    async fn get_by_name(&self, name: &str) -> Result<Company, DomainError> {
        let row = self
            .rows
            .lock()
            .values()
            .find(|r| r.name == name)
            .cloned()
            .ok_or_else(|| DomainError::not_found(COMPANY))?;
        company_from_model(row)
    }

    async fn update(&self, company: Company) -> Result<Company, DomainError> {
        let id = require(company.id.clone(), CompanyFields::ID)?;

        let mut rows = self.rows.lock();
        let mut next = rows
            .get(&id)
            .cloned()
            .ok_or_else(|| DomainError::not_found(COMPANY))?;
        apply_company_patch(&mut next, company)?;
        if rows.values().any(|r| r.id != id && r.name == next.name) {
            return Err(DomainError::conflict(COMPANY));
        }
        rows.insert(id, next.clone());
        drop(rows);

        company_from_model(next)
    }

    async fn delete(&self, id: Uuid) -> Result<(), DomainError> {
        self.rows
            .lock()
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| DomainError::not_found(COMPANY))
    }
}

#[derive(Default)]
pub struct InMemoryUsersRepository {
    rows: Mutex<HashMap<Uuid, user::Model>>,
}

impl InMemoryUsersRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UsersRepository for InMemoryUsersRepository {
    async fn create(&self, user: User) -> Result<User, DomainError> {
        let row = user_insert(user)?
            .try_into_model()
            .map_err(DomainError::infrastructure)?;

        let mut rows = self.rows.lock();
        if rows.contains_key(&row.id) || rows.values().any(|r| r.username == row.username) {
            return Err(DomainError::conflict(USER));
        }
        rows.insert(row.id, row.clone());
        drop(rows);

        Ok(row.into())
    }

    async fn get_by_id(&self, id: Uuid) -> Result<User, DomainError> {
        self.rows
            .lock()
            .get(&id)
            .cloned()
            .map(Into::into)
            .ok_or_else(|| DomainError::not_found(USER))
    }

    async fn get_by_username(&self, username: &str) -> Result<User, DomainError> {
        self.rows
            .lock()
            .values()
            .find(|r| r.username == username)
            .cloned()
            .map(Into::into)
            .ok_or_else(|| DomainError::not_found(USER))
    }
}
