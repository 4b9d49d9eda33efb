//! Company registry SDK
//!
//! This crate provides the public contract of the company-registry module:
//! - `CompanyRegistryClientV1` trait for consumers (transport layers, other modules)
//! - `OptionalField` tri-state used by every entity attribute
//! - Model types (`User`, `Company`, `CompanyType`)
//! - Error taxonomy (`RegistryError`)
//!
//! ```ignore
//! let session = client.signup("alice", "hunter2").await?;
//! let me = client.authenticate(&session.token).await?;
//! ```

#![forbid(unsafe_code)]

pub mod api;
pub mod errors;
pub mod models;
pub mod optional;

pub use api::{CompanyRegistryClientV1, Session};
pub use errors::RegistryError;
pub use models::{Company, CompanyType, User};
pub use optional::OptionalField;
