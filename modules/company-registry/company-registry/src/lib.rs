//! Company Registry Module
//!
//! User signup/login backed by identity tokens, and company records with
//! tri-state partial updates.
//!
//! ## Public API
//!
//! The public contract lives in the `company-registry-sdk` crate and is
//! re-exported here:
//! - `CompanyRegistryClientV1` - trait consumed by the transport layer
//! - `Company`, `CompanyType`, `User`, `OptionalField` - data models
//! - `RegistryError` - error taxonomy
//!
//! Build the module with [`CompanyRegistry::init`] and hand
//! [`CompanyRegistry::client`] to the transport.
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
#![forbid(unsafe_code)]

// === PUBLIC API (from SDK) ===
pub use company_registry_sdk::{
    Company, CompanyRegistryClientV1, CompanyType, OptionalField, RegistryError, Session, User,
};

pub mod config;
pub mod telemetry;

// === MODULE DEFINITION ===
pub mod module;
pub use module::CompanyRegistry;

// === LOCAL CLIENT ===
pub mod local_client;

// === INTERNAL MODULES ===
// Exposed for integration tests; not a stable API.
#[doc(hidden)]
pub mod domain;
#[doc(hidden)]
pub mod infra;
