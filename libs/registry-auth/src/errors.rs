use thiserror::Error;

/// Failures of the token authority.
///
/// Every validation failure is terminal for the call: there is no partially
/// trusted outcome.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("token authority misconfigured: {0}")]
    Misconfigured(String),

    #[error("failed to sign token: {0}")]
    Signing(String),

    #[error("malformed token: {0}")]
    Malformed(String),

    #[error("token algorithm mismatch: expected {expected}, got {actual}")]
    AlgorithmMismatch {
        expected: &'static str,
        actual: String,
    },

    #[error("invalid token signature")]
    SignatureInvalid,

    #[error("token expired")]
    Expired,

    #[error("token issuer mismatch: got {actual}")]
    IssuerMismatch { actual: String },

    #[error("invalid token subject: {reason}")]
    SubjectInvalid { reason: String },
}

impl TokenError {
    /// Short machine-readable kind, suitable as a log field.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Misconfigured(_) => "misconfigured",
            Self::Signing(_) => "signing_failure",
            Self::Malformed(_) => "malformed",
            Self::AlgorithmMismatch { .. } => "algorithm_mismatch",
            Self::SignatureInvalid => "signature_invalid",
            Self::Expired => "expired",
            Self::IssuerMismatch { .. } => "issuer_mismatch",
            Self::SubjectInvalid { .. } => "subject_invalid",
        }
    }
}
