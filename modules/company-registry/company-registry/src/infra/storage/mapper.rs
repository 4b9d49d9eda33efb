//! Conversions between stored rows and SDK models.
//!
//! Reads reconstruct every attribute as `Value` or, for null columns,
//! `Cleared`. Writes translate each field independently:
//! `Unset -> NotSet`, `Value -> Set`, `Cleared -> Set(None)` where the column
//! is nullable and a validation error where it is not.

use company_registry_sdk::{Company, CompanyType, OptionalField, User};
use sea_orm::ActiveValue::{self, NotSet, Set, Unchanged};
use uuid::Uuid;

use super::entity::{company, user};
use crate::domain::error::{DomainError, require};
use crate::domain::fields::{CompanyFields, UserFields};

/// Row -> SDK. Fails only if the stored company type is not a known variant.
///
/// # Errors
/// `Infrastructure` for a corrupt `company_type` column.
pub fn company_from_model(m: company::Model) -> Result<Company, DomainError> {
    let company_type: CompanyType = m.company_type.parse().map_err(|_| {
        DomainError::infrastructure(anyhow::anyhow!(
            "stored company {} has unknown type '{}'",
            m.id,
            m.company_type
        ))
    })?;

    Ok(Company {
        id: OptionalField::Value(m.id),
        name: OptionalField::Value(m.name),
        description: OptionalField::from_nullable(m.description),
        employee_count: OptionalField::Value(m.employee_count),
        registered: OptionalField::Value(m.registered),
        company_type: OptionalField::Value(company_type),
        created_by: OptionalField::Value(m.created_by),
        updated_by: OptionalField::from_nullable(m.updated_by),
    })
}

impl From<user::Model> for User {
    fn from(m: user::Model) -> Self {
        Self {
            id: OptionalField::Value(m.id),
            username: OptionalField::Value(m.username),
            password_hash: OptionalField::Value(m.password_hash),
        }
    }
}

/// Non-nullable column: `Cleared` is rejected.
fn column<T>(field: OptionalField<T>, name: &str) -> Result<ActiveValue<T>, DomainError>
where
    T: Into<sea_orm::Value>,
{
    match field {
        OptionalField::Unset => Ok(NotSet),
        OptionalField::Value(v) => Ok(Set(v)),
        OptionalField::Cleared => Err(DomainError::validation(name, "cannot be cleared")),
    }
}

/// Nullable column: `Cleared` writes null.
fn nullable_column<T>(field: OptionalField<T>) -> ActiveValue<Option<T>>
where
    Option<T>: Into<sea_orm::Value>,
{
    match field.into_patch() {
        None => NotSet,
        Some(v) => Set(v),
    }
}

/// Nullable column that callers may set but never clear.
fn settable_column<T>(
    field: OptionalField<T>,
    name: &str,
) -> Result<ActiveValue<Option<T>>, DomainError>
where
    Option<T>: Into<sea_orm::Value>,
{
    match field {
        OptionalField::Unset => Ok(NotSet),
        OptionalField::Value(v) => Ok(Set(Some(v))),
        OptionalField::Cleared => Err(DomainError::validation(name, "cannot be cleared")),
    }
}

fn type_column(field: OptionalField<CompanyType>) -> Result<ActiveValue<String>, DomainError> {
    column(
        field.map(|t| t.as_str().to_owned()),
        CompanyFields::TYPE,
    )
}

/// Insert model for a new company. Required fields must be `Value`.
///
/// # Errors
/// `Validation` naming the first missing or cleared required field.
pub fn company_insert(c: Company) -> Result<company::ActiveModel, DomainError> {
    let id = match c.id {
        OptionalField::Value(id) => id,
        OptionalField::Unset => Uuid::now_v7(),
        OptionalField::Cleared => {
            return Err(DomainError::validation(CompanyFields::ID, "cannot be cleared"));
        }
    };

    Ok(company::ActiveModel {
        id: Set(id),
        name: Set(require(c.name, CompanyFields::NAME)?),
        description: nullable_column(c.description),
        employee_count: Set(require(c.employee_count, CompanyFields::EMPLOYEE_COUNT)?),
        registered: Set(require(c.registered, CompanyFields::REGISTERED)?),
        company_type: Set(require(c.company_type, CompanyFields::TYPE)?.as_str().to_owned()),
        created_by: Set(require(c.created_by, CompanyFields::CREATED_BY)?),
        updated_by: settable_column(c.updated_by, CompanyFields::UPDATED_BY)?,
    })
}

/// Update model touching only supplied fields. Returns the target id too.
///
/// `created_by` is fixed at creation and never part of the write.
///
/// # Errors
/// `Validation` for a missing id or a cleared non-nullable field.
pub fn company_patch(c: Company) -> Result<(Uuid, company::ActiveModel), DomainError> {
    let id = require(c.id, CompanyFields::ID)?;

    let am = company::ActiveModel {
        id: Unchanged(id),
        name: column(c.name, CompanyFields::NAME)?,
        description: nullable_column(c.description),
        employee_count: column(c.employee_count, CompanyFields::EMPLOYEE_COUNT)?,
        registered: column(c.registered, CompanyFields::REGISTERED)?,
        company_type: type_column(c.company_type)?,
        created_by: NotSet,
        updated_by: settable_column(c.updated_by, CompanyFields::UPDATED_BY)?,
    };
    Ok((id, am))
}

/// Apply `patch` to an in-memory row with the same rules as [`company_patch`].
///
/// `row` is left untouched on error.
///
/// # Errors
/// `Validation` for a cleared non-nullable field.
pub fn apply_company_patch(row: &mut company::Model, patch: Company) -> Result<(), DomainError> {
    let mut next = row.clone();
    let (_, am) = company_patch(patch)?;

    if let Set(v) = am.name {
        next.name = v;
    }
    if let Set(v) = am.description {
        next.description = v;
    }
    if let Set(v) = am.employee_count {
        next.employee_count = v;
    }
    if let Set(v) = am.registered {
        next.registered = v;
    }
    if let Set(v) = am.company_type {
        next.company_type = v;
    }
    if let Set(v) = am.updated_by {
        next.updated_by = v;
    }

    *row = next;
    Ok(())
}

/// Insert model for a new user.
///
/// # Errors
/// `Validation` when username or password hash is not supplied.
pub fn user_insert(u: User) -> Result<user::ActiveModel, DomainError> {
    let id = match u.id {
        OptionalField::Value(id) => id,
        OptionalField::Unset => Uuid::now_v7(),
        OptionalField::Cleared => {
            return Err(DomainError::validation(UserFields::ID, "cannot be cleared"));
        }
    };

    Ok(user::ActiveModel {
        id: Set(id),
        username: Set(require(u.username, UserFields::USERNAME)?),
        password_hash: Set(require(u.password_hash, UserFields::PASSWORD_HASH)?),
    })
}
