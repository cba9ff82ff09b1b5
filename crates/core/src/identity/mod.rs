//! Validated identity records.
//!
//! An identity is created once, at registration, and never changes. Accounts
//! and the registry share it through `Arc<Identity>`.

pub mod error;
pub mod types;

pub use error::IdentityError;
pub use types::{Age, Gender, IdentityDetail};

use tracing::{error, warn};

use crate::auth::CredentialHash;

/// A validated (name, age, gender) record with an optional hashed credential.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    name: String,
    age: Age,
    gender: Gender,
    credential: Option<CredentialHash>,
}

impl Identity {
    /// Validates the attributes and builds an identity.
    ///
    /// Checks run in order name, age, gender; a supplied secret is hashed
    /// only once everything else is valid.
    ///
    /// # Errors
    ///
    /// - `IdentityError::InvalidName` for an empty or blank name
    /// - `IdentityError::InvalidAge` for `age <= 0` or beyond `u32`
    /// - `IdentityError::InvalidGender` outside Male/Female/Other
    /// - `IdentityError::Credential` if hashing fails
    pub fn create(
        name: &str,
        age: i64,
        gender: &str,
        secret: Option<&str>,
    ) -> Result<Self, IdentityError> {
        let result = Self::validate(name, age, gender).and_then(|(age, gender)| {
            let credential = secret.map(CredentialHash::from_secret).transpose()?;
            Ok(Self {
                name: name.to_string(),
                age,
                gender,
                credential,
            })
        });

        if let Err(e) = &result {
            match e {
                IdentityError::Credential(inner) => {
                    error!(message_key = e.message_key(), error = %inner, "Identity rejected");
                }
                _ => warn!(message_key = e.message_key(), "Identity rejected"),
            }
        }
        result
    }

    fn validate(name: &str, age: i64, gender: &str) -> Result<(Age, Gender), IdentityError> {
        if name.trim().is_empty() {
            return Err(IdentityError::InvalidName);
        }
        let age = Age::try_from(age)?;
        let gender = gender.parse()?;
        Ok((age, gender))
    }

    /// Identity name, the registry key.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Age in years.
    #[must_use]
    pub const fn age(&self) -> Age {
        self.age
    }

    /// Gender.
    #[must_use]
    pub const fn gender(&self) -> Gender {
        self.gender
    }

    /// Returns true if a credential is stored.
    #[must_use]
    pub const fn has_credential(&self) -> bool {
        self.credential.is_some()
    }

    /// Checks `secret` against the stored credential.
    ///
    /// Identities without a credential never match. A malformed stored hash
    /// is logged and treated as a mismatch.
    #[must_use]
    pub fn verify_secret(&self, secret: &str) -> bool {
        let Some(credential) = &self.credential else {
            return false;
        };
        match credential.verify(secret) {
            Ok(matched) => matched,
            Err(e) => {
                error!(name = %self.name, error = %e, "Credential verification failed");
                false
            }
        }
    }

    /// Projects the public fields.
    #[must_use]
    pub fn describe(&self) -> IdentityDetail {
        IdentityDetail {
            name: self.name.clone(),
            age: self.age.years(),
            gender: self.gender,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn create_and_describe() {
        let identity = Identity::create("Edison", 20, "Male", None).unwrap();

        assert_eq!(
            identity.describe(),
            IdentityDetail {
                name: "Edison".into(),
                age: 20,
                gender: Gender::Male,
            }
        );
        assert!(!identity.has_credential());
    }

    #[test]
    fn negative_age_rejected() {
        let result = Identity::create("John", -30, "Male", None);
        assert!(matches!(result, Err(IdentityError::InvalidAge)));
    }

    #[test]
    fn unknown_gender_rejected() {
        let result = Identity::create("Jane", 25, "Unknown", None);
        assert!(matches!(result, Err(IdentityError::InvalidGender)));
    }

    #[rstest]
    #[case("")]
    #[case("   ")]
    #[case("\t\n")]
    fn blank_name_rejected(#[case] name: &str) {
        let result = Identity::create(name, 25, "Other", None);
        assert!(matches!(result, Err(IdentityError::InvalidName)));
    }

    #[test]
    fn age_checked_before_gender() {
        let result = Identity::create("Both", 0, "Robot", None);
        assert!(matches!(result, Err(IdentityError::InvalidAge)));
    }

    #[test]
    fn secret_is_hashed_and_verifiable() {
        let identity = Identity::create("Ada", 36, "Female", Some("analytical")).unwrap();

        assert!(identity.has_credential());
        assert!(identity.verify_secret("analytical"));
        assert!(!identity.verify_secret("engine"));
        assert!(!format!("{identity:?}").contains("analytical"));
    }

    #[test]
    fn identity_without_credential_never_verifies() {
        let identity = Identity::create("NoPw", 40, "Other", None).unwrap();
        assert!(!identity.verify_secret(""));
    }

    #[test]
    fn error_message_keys_are_stable() {
        assert_eq!(IdentityError::InvalidAge.message_key(), "identity.invalid_age");
        assert_eq!(
            IdentityError::InvalidGender.message_key(),
            "identity.invalid_gender"
        );
        assert_eq!(IdentityError::InvalidName.message_key(), "identity.invalid_name");
    }
}
