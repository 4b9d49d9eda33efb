use std::sync::Arc;

use company_registry_sdk::{Company, OptionalField};
use uuid::Uuid;

use super::ServiceConfig;
use crate::domain::error::{DomainError, require};
use crate::domain::events::{EventDispatcher, MutationEvent, MutationKind};
use crate::domain::fields::CompanyFields;
use crate::domain::repos::CompaniesRepository;

/// Company lifecycle: create, read, partial update, delete.
pub struct CompaniesService {
    repo: Arc<dyn CompaniesRepository>,
    events: EventDispatcher,
    config: ServiceConfig,
}

impl CompaniesService {
    #[must_use]
    pub fn new(
        repo: Arc<dyn CompaniesRepository>,
        events: EventDispatcher,
        config: ServiceConfig,
    ) -> Self {
        Self {
            repo,
            events,
            config,
        }
    }

    /// # Errors
    /// `Validation` when a required field is missing or out of range,
    /// `Conflict` when the name is taken.
    pub async fn create(&self, company: Company) -> Result<Company, DomainError> {
        self.validate_new(&company)?;

        let created = self.repo.create(company).await?;
        let id = require(created.id.clone(), CompanyFields::ID)?;
        tracing::info!(company_id = %id, "company created");
        self.events.dispatch(MutationEvent::new(MutationKind::Create, id));
        Ok(created)
    }

    /// # Errors
    /// `NotFound` when no company has this id.
    pub async fn get_by_id(&self, id: Uuid) -> Result<Company, DomainError> {
        self.repo.get_by_id(id).await
    }

    /// # Errors
    /// `NotFound` when no company has this name.
    pub async fn get_by_name(&self, name: &str) -> Result<Company, DomainError> {
        self.repo.get_by_name(name).await
    }

    /// Apply the supplied fields of `patch`; `id` and `updated_by` are mandatory.
    ///
    /// # Errors
    /// `Validation` for a missing id or actor, any `created_by`, a `Cleared`
    /// non-nullable field or an out-of-range value; `NotFound` for an unknown
    /// id; `Conflict` when renaming onto an existing name.
    pub async fn update(&self, patch: Company) -> Result<Company, DomainError> {
        let id = self.validate_patch(&patch)?;

        let updated = self.repo.update(patch).await?;
        tracing::info!(company_id = %id, "company updated");
        self.events.dispatch(MutationEvent::new(MutationKind::Update, id));
        Ok(updated)
    }

    /// # Errors
    /// `NotFound` when no company has this id.
    pub async fn delete(&self, id: Uuid) -> Result<(), DomainError> {
        self.repo.delete(id).await?;
        tracing::info!(company_id = %id, "company deleted");
        self.events.dispatch(MutationEvent::new(MutationKind::Delete, id));
        Ok(())
    }

    fn validate_new(&self, c: &Company) -> Result<(), DomainError> {
        reject_cleared(&c.id, CompanyFields::ID)?;
        self.validate_name(required(&c.name, CompanyFields::NAME)?)?;
        self.validate_description(&c.description)?;
        validate_employee_count(*required(
            &c.employee_count,
            CompanyFields::EMPLOYEE_COUNT,
        )?)?;
        required(&c.registered, CompanyFields::REGISTERED)?;
        required(&c.company_type, CompanyFields::TYPE)?;
        let creator = *required(&c.created_by, CompanyFields::CREATED_BY)?;
        validate_actor(creator, CompanyFields::CREATED_BY)?;
        reject_cleared(&c.updated_by, CompanyFields::UPDATED_BY)?;
        Ok(())
    }

    fn validate_patch(&self, c: &Company) -> Result<Uuid, DomainError> {
        let id = *required(&c.id, CompanyFields::ID)?;
        let editor = *required(&c.updated_by, CompanyFields::UPDATED_BY)?;
        validate_actor(editor, CompanyFields::UPDATED_BY)?;

        if let Some(name) = reject_cleared(&c.name, CompanyFields::NAME)? {
            self.validate_name(name)?;
        }
        self.validate_description(&c.description)?;
        if let Some(count) = reject_cleared(&c.employee_count, CompanyFields::EMPLOYEE_COUNT)? {
            validate_employee_count(*count)?;
        }
        reject_cleared(&c.registered, CompanyFields::REGISTERED)?;
        reject_cleared(&c.company_type, CompanyFields::TYPE)?;
        if !c.created_by.is_unset() {
            return Err(DomainError::validation(
                CompanyFields::CREATED_BY,
                "cannot be changed",
            ));
        }
        Ok(id)
    }

    fn validate_name(&self, name: &str) -> Result<(), DomainError> {
        if name.trim().is_empty() {
            return Err(DomainError::validation(CompanyFields::NAME, "must not be empty"));
        }
        if name.chars().count() > self.config.max_name_length {
            return Err(DomainError::validation(
                CompanyFields::NAME,
                format!("exceeds maximum length of {}", self.config.max_name_length),
            ));
        }
        Ok(())
    }

    fn validate_description(
        &self,
        description: &OptionalField<String>,
    ) -> Result<(), DomainError> {
        if let OptionalField::Value(text) = description
            && text.chars().count() > self.config.max_description_length
        {
            return Err(DomainError::validation(
                CompanyFields::DESCRIPTION,
                format!(
                    "exceeds maximum length of {}",
                    self.config.max_description_length
                ),
            ));
        }
        Ok(())
    }
}

fn required<'a, T>(field: &'a OptionalField<T>, name: &str) -> Result<&'a T, DomainError> {
    match field {
        OptionalField::Value(v) => Ok(v),
        OptionalField::Unset => Err(DomainError::validation(name, "is required")),
        OptionalField::Cleared => Err(DomainError::validation(name, "cannot be cleared")),
    }
}

/// `Unset` and `Value` pass; `Cleared` is rejected.
fn reject_cleared<'a, T>(
    field: &'a OptionalField<T>,
    name: &str,
) -> Result<Option<&'a T>, DomainError> {
    if field.is_cleared() {
        return Err(DomainError::validation(name, "cannot be cleared"));
    }
    Ok(field.as_value())
}

fn validate_employee_count(count: i32) -> Result<(), DomainError> {
    if count < 0 {
        return Err(DomainError::validation(
            CompanyFields::EMPLOYEE_COUNT,
            "must be greater than or equal to 0",
        ));
    }
    Ok(())
}

fn validate_actor(actor: Uuid, name: &str) -> Result<(), DomainError> {
    if actor.is_nil() {
        return Err(DomainError::validation(name, "must not be nil"));
    }
    Ok(())
}
