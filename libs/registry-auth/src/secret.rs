use std::fmt;

use serde::{Deserialize, Deserializer};
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Signing secret held in memory only for the lifetime of the authority.
///
/// Formatting never reveals the value and the buffer is zeroed on drop.
/// Deserializes from a plain string so it can be loaded from configuration.
#[derive(Default, Zeroize, ZeroizeOnDrop)]
pub struct SecretString(String);

impl SecretString {
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Raw secret bytes for key derivation. Never log the result.
    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }

    /// Empty or whitespace-only secrets are treated as missing.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl Clone for SecretString {
    fn clone(&self) -> Self {
        Self(self.0.clone())
    }
}

impl From<&str> for SecretString {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl fmt::Debug for SecretString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[REDACTED]")
    }
}

impl<'de> Deserialize<'de> for SecretString {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        String::deserialize(deserializer).map(Self)
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn debug_does_not_contain_secret() {
        let secret = "correct-horse-battery-staple";
        let s = SecretString::new(secret);
        let dbg = format!("{s:?}");
        assert_eq!(dbg, "[REDACTED]");
        assert!(!dbg.contains(secret));
    }

    #[test]
    fn deserializes_from_plain_string() {
        let s: SecretString = serde_json::from_str(r#""hunter2""#).unwrap();
        assert_eq!(s.expose(), "hunter2");
    }

    #[test]
    fn blank_detection() {
        assert!(SecretString::default().is_blank());
        assert!(SecretString::new("  \t").is_blank());
        assert!(!SecretString::new("k").is_blank());
    }

    #[test]
    fn zeroize_clears_buffer() {
        let mut s = SecretString::new("sensitive");
        s.zeroize();
        assert!(s.0.is_empty());
    }
}
