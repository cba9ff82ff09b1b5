//! Validated identity attributes.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::error::IdentityError;

/// A strictly positive age in years.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Age(u32);

impl Age {
    /// Returns the age in years.
    #[must_use]
    pub const fn years(self) -> u32 {
        self.0
    }

    /// Parses an age from a raw JSON value.
    ///
    /// Only JSON integers are accepted; `20.0`, `"20"` and `true` are all
    /// rejected.
    ///
    /// # Errors
    ///
    /// Returns `IdentityError::InvalidAge` for non-integers and values `<= 0`.
    pub fn from_json(value: &Value) -> Result<Self, IdentityError> {
        let Value::Number(n) = value else {
            return Err(IdentityError::InvalidAge);
        };

        // Floats and integers beyond i64 both land in the `None` arm.
        n.as_i64()
            .ok_or(IdentityError::InvalidAge)
            .and_then(Self::try_from)
    }
}

impl TryFrom<i64> for Age {
    type Error = IdentityError;

    fn try_from(years: i64) -> Result<Self, Self::Error> {
        if years <= 0 {
            return Err(IdentityError::InvalidAge);
        }
        u32::try_from(years)
            .map(Self)
            .map_err(|_| IdentityError::InvalidAge)
    }
}

impl fmt::Display for Age {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The fixed set of accepted genders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gender {
    /// "Male"
    Male,
    /// "Female"
    Female,
    /// "Other"
    Other,
}

impl Gender {
    /// Returns the canonical spelling.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Male => "Male",
            Self::Female => "Female",
            Self::Other => "Other",
        }
    }

    /// Parses a gender from a raw JSON value.
    ///
    /// # Errors
    ///
    /// Returns `IdentityError::InvalidGender` for non-strings and unknown values.
    pub fn from_json(value: &Value) -> Result<Self, IdentityError> {
        value
            .as_str()
            .ok_or(IdentityError::InvalidGender)
            .and_then(str::parse)
    }
}

impl FromStr for Gender {
    type Err = IdentityError;

    /// Case-sensitive: `"male"` is rejected.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Male" => Ok(Self::Male),
            "Female" => Ok(Self::Female),
            "Other" => Ok(Self::Other),
            _ => Err(IdentityError::InvalidGender),
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Public projection of an identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentityDetail {
    /// Identity name.
    pub name: String,
    /// Age in years.
    pub age: u32,
    /// Gender.
    pub gender: Gender,
}
