//! Error taxonomy shared by every company-registry component.

use thiserror::Error;

/// Outcome kinds surfaced to callers.
///
/// Storage-engine detail never appears here; only `Infrastructure` carries a
/// wrapped cause.
#[derive(Error, Debug)]
pub enum RegistryError {
    #[error("{entity} not found")]
    NotFound { entity: &'static str },

    #[error("{entity} already exists")]
    Conflict { entity: &'static str },

    #[error("bad credentials")]
    BadCredentials,

    #[error("validation error on field '{field}': {message}")]
    Validation { field: String, message: String },

    #[error("infrastructure error")]
    Infrastructure(#[source] anyhow::Error),
}

impl RegistryError {
    #[must_use]
    pub fn not_found(entity: &'static str) -> Self {
        Self::NotFound { entity }
    }

    #[must_use]
    pub fn conflict(entity: &'static str) -> Self {
        Self::Conflict { entity }
    }

    #[must_use]
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    #[must_use]
    pub fn infrastructure(cause: impl Into<anyhow::Error>) -> Self {
        Self::Infrastructure(cause.into())
    }

    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    #[must_use]
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::Conflict { .. })
    }

    /// Stable short label, used as a structured log field.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::NotFound { .. } => "not_found",
            Self::Conflict { .. } => "conflict",
            Self::BadCredentials => "bad_credentials",
            Self::Validation { .. } => "validation",
            Self::Infrastructure(_) => "infrastructure",
        }
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn infrastructure_keeps_its_cause() {
        let err = RegistryError::infrastructure(anyhow::anyhow!("connection refused"));
        assert_eq!(err.to_string(), "infrastructure error");
        let source = err.source().map(ToString::to_string);
        assert_eq!(source.as_deref(), Some("connection refused"));
    }

    #[test]
    fn messages_name_the_entity() {
        assert_eq!(RegistryError::conflict("company").to_string(), "company already exists");
        assert_eq!(RegistryError::not_found("user").to_string(), "user not found");
        assert!(RegistryError::BadCredentials.source().is_none());
    }
}
