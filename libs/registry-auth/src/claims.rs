use serde::{Deserialize, Serialize};

/// Registered claim names (RFC 7519, section 4.1) carried by identity tokens.
pub struct StandardClaim;

impl StandardClaim {
    pub const ISS: &'static str = "iss";
    pub const SUB: &'static str = "sub";
    pub const IAT: &'static str = "iat";
    pub const EXP: &'static str = "exp";

    /// Claims every identity token must carry.
    pub const REQUIRED: [&'static str; 4] = [Self::ISS, Self::SUB, Self::IAT, Self::EXP];
}

/// Payload of an identity token.
///
/// Timestamps are seconds since the unix epoch. `exp` is always
/// `iat + lifetime` for tokens minted by this crate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentityClaims {
    pub iss: String,
    pub sub: String,
    pub iat: i64,
    pub exp: i64,
}

impl IdentityClaims {
    /// Whether the token is past its expiry at `now` (unix seconds).
    #[must_use]
    pub fn is_expired_at(&self, now: i64) -> bool {
        now >= self.exp
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn expiry_boundary_is_exclusive() {
        let claims = IdentityClaims {
            iss: "issuer".to_owned(),
            sub: "subject".to_owned(),
            iat: 100,
            exp: 200,
        };

        assert!(!claims.is_expired_at(199));
        assert!(claims.is_expired_at(200));
        assert!(claims.is_expired_at(201));
    }

    #[test]
    fn claims_use_registered_names_on_the_wire() {
        let claims = IdentityClaims {
            iss: "issuer".to_owned(),
            sub: "subject".to_owned(),
            iat: 1,
            exp: 2,
        };

        let value = serde_json::to_value(&claims).unwrap();
        for name in StandardClaim::REQUIRED {
            assert!(value.get(name).is_some(), "missing claim {name}");
        }
    }
}
