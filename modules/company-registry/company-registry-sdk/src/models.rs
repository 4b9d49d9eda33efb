//! Public models for the company-registry module.
//!
//! Every attribute is an [`OptionalField`] so a single type serves create,
//! partial update and read. A value read back from storage has no `Unset`
//! attributes.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::RegistryError;
use crate::optional::OptionalField;

/// Registered account.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct User {
    #[serde(skip_serializing_if = "OptionalField::is_unset")]
    pub id: OptionalField<Uuid>,
    #[serde(skip_serializing_if = "OptionalField::is_unset")]
    pub username: OptionalField<String>,
    #[serde(skip)]
    pub password_hash: OptionalField<String>,
}

impl User {
    #[must_use]
    pub fn new(username: impl Into<String>, password_hash: impl Into<String>) -> Self {
        Self {
            id: OptionalField::Unset,
            username: OptionalField::Value(username.into()),
            password_hash: OptionalField::Value(password_hash.into()),
        }
    }
}

/// Legal form of a company. Closed set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CompanyType {
    Corporation,
    NonProfit,
    Cooperative,
    #[serde(rename = "Sole Proprietorship")]
    SoleProprietorship,
}

impl CompanyType {
    pub const ALL: [Self; 4] = [
        Self::Corporation,
        Self::NonProfit,
        Self::Cooperative,
        Self::SoleProprietorship,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Corporation => "Corporation",
            Self::NonProfit => "NonProfit",
            Self::Cooperative => "Cooperative",
            Self::SoleProprietorship => "Sole Proprietorship",
        }
    }
}

impl fmt::Display for CompanyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CompanyType {
    type Err = RegistryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| RegistryError::validation("company_type", format!("unknown company type '{s}'")))
    }
}

/// Company record.
///
/// `description` is the only attribute that may be `Cleared`. `updated_by`
/// reads back as `Cleared` until the first update.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Company {
    #[serde(skip_serializing_if = "OptionalField::is_unset")]
    pub id: OptionalField<Uuid>,
    #[serde(skip_serializing_if = "OptionalField::is_unset")]
    pub name: OptionalField<String>,
    #[serde(skip_serializing_if = "OptionalField::is_unset")]
    pub description: OptionalField<String>,
    #[serde(skip_serializing_if = "OptionalField::is_unset")]
    pub employee_count: OptionalField<i32>,
    #[serde(skip_serializing_if = "OptionalField::is_unset")]
    pub registered: OptionalField<bool>,
    #[serde(skip_serializing_if = "OptionalField::is_unset")]
    pub company_type: OptionalField<CompanyType>,
    #[serde(skip_serializing_if = "OptionalField::is_unset")]
    pub created_by: OptionalField<Uuid>,
    #[serde(skip_serializing_if = "OptionalField::is_unset")]
    pub updated_by: OptionalField<Uuid>,
}

impl Company {
    /// Partial update carrying only the identifier and the acting user.
    #[must_use]
    pub fn patch(id: Uuid, updated_by: Uuid) -> Self {
        Self {
            id: OptionalField::Value(id),
            updated_by: OptionalField::Value(updated_by),
            ..Self::default()
        }
    }
}
