use std::sync::Arc;
use std::time::Duration;

use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::Deserialize;
use uuid::Uuid;

use crate::claims::{IdentityClaims, StandardClaim};
use crate::clock::ClockSource;
use crate::config::TokenConfig;
use crate::errors::TokenError;

/// The only algorithm this authority signs with or accepts.
pub const PINNED_ALGORITHM: &str = "HS256";

const PINNED: Algorithm = Algorithm::HS256;

/// Minimal view of a JOSE header, read before any signature work.
///
/// Parsed by hand so that `"none"` and unknown algorithm names surface as an
/// algorithm mismatch rather than a parse failure.
#[derive(Debug, Deserialize)]
struct RawHeader {
    alg: String,
}

/// Issues and validates identity tokens.
///
/// Immutable after construction and safe to share across tasks.
pub struct TokenAuthority {
    issuer: String,
    lifetime: i64,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    clock: Arc<dyn ClockSource>,
}

impl std::fmt::Debug for TokenAuthority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenAuthority")
            .field("issuer", &self.issuer)
            .field("lifetime_secs", &self.lifetime)
            .field("algorithm", &PINNED_ALGORITHM)
            .finish_non_exhaustive()
    }
}

impl TokenAuthority {
    /// Build an authority from configuration.
    ///
    /// # Errors
    /// Returns [`TokenError::Misconfigured`] when the secret is blank, the
    /// issuer is empty or the lifetime is zero.
    pub fn new(config: &TokenConfig, clock: Arc<dyn ClockSource>) -> Result<Self, TokenError> {
        if config.secret.is_blank() {
            return Err(TokenError::Misconfigured("signing secret is empty".into()));
        }
        if config.issuer.trim().is_empty() {
            return Err(TokenError::Misconfigured("issuer is empty".into()));
        }
        let lifetime = lifetime_secs(config.lifetime)?;

        let secret = config.secret.expose().as_bytes();
        Ok(Self {
            issuer: config.issuer.clone(),
            lifetime,
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            clock,
        })
    }

    #[must_use]
    pub fn issuer(&self) -> &str {
        &self.issuer
    }

    /// Mint a signed token for `user_id`, valid for the configured lifetime.
    ///
    /// # Errors
    /// Returns [`TokenError::Signing`] if the signer fails.
    pub fn issue_token(&self, user_id: Uuid) -> Result<String, TokenError> {
        let iat = self.clock.now().unix_timestamp();
        let claims = IdentityClaims {
            iss: self.issuer.clone(),
            sub: user_id.to_string(),
            iat,
            exp: iat.saturating_add(self.lifetime),
        };

        encode(&Header::new(PINNED), &claims, &self.encoding_key).map_err(|e| {
            tracing::debug!(error = %e, "token signing failed");
            TokenError::Signing(e.to_string())
        })
    }

    /// Validate `token` and return the user id it was issued for.
    ///
    /// Checks run in a fixed order: structure, algorithm, signature, expiry,
    /// issuer, subject. The first failing check decides the error.
    ///
    /// # Errors
    /// Returns the [`TokenError`] variant of the first failing check.
    pub fn validate_token(&self, token: &str) -> Result<Uuid, TokenError> {
        self.check(token).inspect_err(|e| {
            tracing::debug!(kind = e.kind(), issuer = %self.issuer, "token rejected");
        })
    }

    fn check(&self, token: &str) -> Result<Uuid, TokenError> {
        let header = read_header(token)?;
        if header.alg != PINNED_ALGORITHM {
            return Err(TokenError::AlgorithmMismatch {
                expected: PINNED_ALGORITHM,
                actual: header.alg,
            });
        }

        let data = decode::<IdentityClaims>(token, &self.decoding_key, &validation())
            .map_err(map_decode_error)?;
        let claims = data.claims;

        if claims.is_expired_at(self.clock.now().unix_timestamp()) {
            return Err(TokenError::Expired);
        }

        if claims.iss != self.issuer {
            return Err(TokenError::IssuerMismatch { actual: claims.iss });
        }

        parse_subject(&claims.sub)
    }
}

fn validation() -> Validation {
    let mut validation = Validation::new(PINNED);
    // Expiry is checked against the injected clock, not the system time.
    validation.validate_exp = false;
    validation.validate_nbf = false;
    validation.validate_aud = false;
    validation.leeway = 0;
    validation.set_required_spec_claims(&StandardClaim::REQUIRED);
    validation
}

fn lifetime_secs(lifetime: Duration) -> Result<i64, TokenError> {
    let secs = i64::try_from(lifetime.as_secs())
        .map_err(|_| TokenError::Misconfigured("token lifetime is too large".into()))?;
    if secs == 0 {
        return Err(TokenError::Misconfigured(
            "token lifetime must be at least one second".into(),
        ));
    }
    Ok(secs)
}

fn read_header(token: &str) -> Result<RawHeader, TokenError> {
    let mut parts = token.split('.');
    let (Some(header), Some(_payload), Some(_signature), None) =
        (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return Err(TokenError::Malformed(
            "expected three dot-separated segments".into(),
        ));
    };

    let bytes = URL_SAFE_NO_PAD
        .decode(header)
        .map_err(|e| TokenError::Malformed(format!("header is not base64url: {e}")))?;
    serde_json::from_slice(&bytes)
        .map_err(|e| TokenError::Malformed(format!("header is not valid JSON: {e}")))
}

fn map_decode_error(err: jsonwebtoken::errors::Error) -> TokenError {
    match err.kind() {
        ErrorKind::InvalidSignature => TokenError::SignatureInvalid,
        ErrorKind::InvalidAlgorithm | ErrorKind::InvalidAlgorithmName => {
            TokenError::AlgorithmMismatch {
                expected: PINNED_ALGORITHM,
                actual: "unknown".to_owned(),
            }
        }
        _ => TokenError::Malformed(err.to_string()),
    }
}

fn parse_subject(sub: &str) -> Result<Uuid, TokenError> {
    let id = Uuid::parse_str(sub).map_err(|e| TokenError::SubjectInvalid {
        reason: format!("not a UUID: {e}"),
    })?;
    if id.is_nil() {
        return Err(TokenError::SubjectInvalid {
            reason: "nil UUID".into(),
        });
    }
    Ok(id)
}
