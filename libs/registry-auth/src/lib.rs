#![forbid(unsafe_code)]

//! Identity token authority for the company registry.
//!
//! Tokens are compact JWS structures signed with a single pinned HMAC
//! algorithm. Validation never negotiates the algorithm from the token:
//! the header is inspected and compared against [`PINNED_ALGORITHM`] before
//! any claim is read.
//!
//! ```ignore
//! let authority = TokenAuthority::new(config, Arc::new(SystemClock))?;
//! let token = authority.issue_token(user_id)?;
//! assert_eq!(authority.validate_token(&token)?, user_id);
//! ```

pub mod authority;
pub mod claims;
pub mod clock;
pub mod config;
pub mod errors;
pub mod secret;

pub use authority::{PINNED_ALGORITHM, TokenAuthority};
pub use claims::{IdentityClaims, StandardClaim};
pub use clock::{ClockSource, ManualClock, SystemClock};
pub use config::TokenConfig;
pub use errors::TokenError;
pub use secret::SecretString;
