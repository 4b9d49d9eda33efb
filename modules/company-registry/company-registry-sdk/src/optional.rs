use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::errors::RegistryError;

/// Tri-state attribute value.
///
/// `Unset` means the caller did not supply the attribute; `Cleared` means it
/// was supplied as explicitly empty (storage null). The two are never
/// interchangeable: on update, `Unset` leaves the stored value untouched while
/// `Cleared` overwrites it with null.
///
/// With serde, use it on a field marked `#[serde(default)]` so a missing key
/// becomes `Unset`; `null` becomes `Cleared`. Pair with
/// `skip_serializing_if = "OptionalField::is_unset"` to round-trip omission.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum OptionalField<T> {
    #[default]
    Unset,
    Cleared,
    Value(T),
}

impl<T> OptionalField<T> {
    #[must_use]
    pub fn is_unset(&self) -> bool {
        matches!(self, Self::Unset)
    }

    #[must_use]
    pub fn is_cleared(&self) -> bool {
        matches!(self, Self::Cleared)
    }

    #[must_use]
    pub fn is_value(&self) -> bool {
        matches!(self, Self::Value(_))
    }

    #[must_use]
    pub fn as_value(&self) -> Option<&T> {
        match self {
            Self::Value(v) => Some(v),
            Self::Unset | Self::Cleared => None,
        }
    }

    pub fn into_value(self) -> Option<T> {
        match self {
            Self::Value(v) => Some(v),
            Self::Unset | Self::Cleared => None,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> OptionalField<U> {
        match self {
            Self::Unset => OptionalField::Unset,
            Self::Cleared => OptionalField::Cleared,
            Self::Value(v) => OptionalField::Value(f(v)),
        }
    }

    /// Reconstruct from a nullable stored column: `None` is `Cleared`, never `Unset`.
    pub fn from_nullable(value: Option<T>) -> Self {
        value.map_or(Self::Cleared, Self::Value)
    }

    /// Collapse to the nullable storage form. `None` means "leave untouched".
    ///
    /// `Some(None)` is an explicit null, `Some(Some(v))` a value.
    pub fn into_patch(self) -> Option<Option<T>> {
        match self {
            Self::Unset => None,
            Self::Cleared => Some(None),
            Self::Value(v) => Some(Some(v)),
        }
    }

    /// The value, or a validation error naming `field`.
    ///
    /// # Errors
    /// Returns [`RegistryError::Validation`] when the field is `Unset` or `Cleared`.
    pub fn require(self, field: &str) -> Result<T, RegistryError> {
        match self {
            Self::Value(v) => Ok(v),
            Self::Unset => Err(RegistryError::validation(field, "is required")),
            Self::Cleared => Err(RegistryError::validation(field, "must not be empty")),
        }
    }
}

impl<T> From<T> for OptionalField<T> {
    fn from(value: T) -> Self {
        Self::Value(value)
    }
}

impl<T: Serialize> Serialize for OptionalField<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Self::Value(v) => serializer.serialize_some(v),
            Self::Unset | Self::Cleared => serializer.serialize_none(),
        }
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for OptionalField<T> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        // Only reached when the key is present; absence is handled by `#[serde(default)]`.
        Option::<T>::deserialize(deserializer).map(Self::from_nullable)
    }
}
