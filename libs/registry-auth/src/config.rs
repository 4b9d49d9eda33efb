use std::time::Duration;

use serde::Deserialize;

use crate::secret::SecretString;

pub const DEFAULT_ISSUER: &str = "company-registry";
pub const DEFAULT_LIFETIME: Duration = Duration::from_secs(15 * 60);

/// Token authority settings.
///
/// The secret has no usable default: an authority built from
/// `TokenConfig::default()` is rejected as misconfigured.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TokenConfig {
    /// Value of the `iss` claim on issued tokens, and the only accepted issuer.
    pub issuer: String,

    /// HMAC key material.
    pub secret: SecretString,

    /// Time between `iat` and `exp`, e.g. `"15m"`.
    #[serde(with = "humantime_serde")]
    pub lifetime: Duration,
}

impl Default for TokenConfig {
    fn default() -> Self {
        Self {
            issuer: DEFAULT_ISSUER.to_owned(),
            secret: SecretString::default(),
            lifetime: DEFAULT_LIFETIME,
        }
    }
}

impl TokenConfig {
    #[must_use]
    pub fn new(issuer: impl Into<String>, secret: impl Into<String>, lifetime: Duration) -> Self {
        Self {
            issuer: issuer.into(),
            secret: SecretString::new(secret),
            lifetime,
        }
    }
}
