use sea_orm::{DbErr, SqlErr};

use crate::domain::error::DomainError;

/// Classify an engine error for `entity`.
///
/// Uniqueness violations become `Conflict`, a missed update becomes
/// `NotFound`, everything else is wrapped as `Infrastructure`.
pub fn db_err(entity: &'static str) -> impl Fn(DbErr) -> DomainError {
    move |err| {
        if let Some(SqlErr::UniqueConstraintViolation(detail)) = err.sql_err() {
            tracing::debug!(entity, %detail, "unique constraint violation");
            return DomainError::conflict(entity);
        }
        match err {
            DbErr::RecordNotUpdated | DbErr::RecordNotFound(_) => DomainError::not_found(entity),
            other => {
                tracing::error!(entity, error = %other, "database error");
                DomainError::infrastructure(other)
            }
        }
    }
}
