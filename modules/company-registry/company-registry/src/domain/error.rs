use company_registry_sdk::{OptionalField, RegistryError};

/// Failures inside the services and storage adapters.
///
/// Adapters are the only place engine errors are classified; everything
/// above them sees these kinds.
#[derive(Debug, thiserror::Error)]
pub enum DomainError {
    #[error("{entity} not found")]
    NotFound { entity: &'static str },

    #[error("{entity} already exists")]
    Conflict { entity: &'static str },

    #[error("bad credentials")]
    BadCredentials,

    #[error("validation error on field '{field}': {message}")]
    Validation { field: String, message: String },

    #[error("infrastructure error: {0}")]
    Infrastructure(#[source] anyhow::Error),
}

impl DomainError {
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

    /// Short label for structured logs.
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

/// Take the value out of `field`, or fail with a validation error naming it.
///
/// # Errors
/// `Validation` when `field` is `Unset` or `Cleared`.
pub fn require<T>(field: OptionalField<T>, name: &str) -> Result<T, DomainError> {
    match field {
        OptionalField::Value(v) => Ok(v),
        OptionalField::Unset => Err(DomainError::validation(name, "is required")),
        OptionalField::Cleared => Err(DomainError::validation(name, "cannot be cleared")),
    }
}

impl From<DomainError> for RegistryError {
    fn from(e: DomainError) -> Self {
        match e {
            DomainError::NotFound { entity } => Self::not_found(entity),
            DomainError::Conflict { entity } => Self::conflict(entity),
            DomainError::BadCredentials => Self::BadCredentials,
            DomainError::Validation { field, message } => Self::validation(field, message),
            DomainError::Infrastructure(cause) => Self::infrastructure(cause),
        }
    }
}
