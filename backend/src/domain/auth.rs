//! Authentication primitives: login credentials, signup requests, and secret
//! hashing.
//!
//! Secrets are never compared verbatim. Signup stores an Argon2id PHC string
//! with a per-registrant salt, and login verifies the candidate against it.

use std::fmt;

use argon2::Argon2;
use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use zeroize::Zeroizing;

use super::registrant::{Constituency, Identity, RegistrantValidationError, Role};

/// Validation errors for login and signup payloads.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LoginValidationError {
    /// Username failed identity validation.
    #[error(transparent)]
    Identity(RegistrantValidationError),
    /// Password was blank.
    #[error("password must not be empty")]
    EmptyPassword,
}

/// Validated login credentials.
///
/// ## Invariants
/// - `identity` satisfies [`Identity`] validation.
/// - `password` is non-empty; surrounding whitespace is preserved.
///
/// # Examples
/// ```
/// use voter_registry::domain::LoginCredentials;
///
/// let creds = LoginCredentials::try_from_parts("bob", "hunter2").unwrap();
/// assert_eq!(creds.identity().as_ref(), "bob");
/// assert_eq!(creds.password(), "hunter2");
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    identity: Identity,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    /// Construct credentials from raw username/password inputs.
    pub fn try_from_parts(username: &str, password: &str) -> Result<Self, LoginValidationError> {
        let identity = Identity::new(username).map_err(LoginValidationError::Identity)?;
        if password.is_empty() {
            return Err(LoginValidationError::EmptyPassword);
        }
        Ok(Self {
            identity,
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Identity to look up.
    pub fn identity(&self) -> &Identity {
        &self.identity
    }

    /// Password supplied by the caller.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

impl fmt::Debug for LoginCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginCredentials")
            .field("identity", &self.identity)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Validated signup request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignupRequest {
    credentials: LoginCredentials,
    role: Role,
    constituency: Constituency,
}

impl SignupRequest {
    /// Assemble a signup request from validated parts.
    pub fn new(credentials: LoginCredentials, role: Role, constituency: Constituency) -> Self {
        Self {
            credentials,
            role,
            constituency,
        }
    }

    pub fn credentials(&self) -> &LoginCredentials {
        &self.credentials
    }

    pub fn identity(&self) -> &Identity {
        self.credentials.identity()
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn constituency(&self) -> &Constituency {
        &self.constituency
    }
}

/// Failure to derive a secret hash.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("failed to hash secret: {message}")]
pub struct SecretHashError {
    message: String,
}

/// Argon2id PHC string for a registrant secret.
#[derive(Clone, PartialEq, Eq)]
pub struct SecretHash(String);

impl SecretHash {
    /// Hash `secret` with a fresh random salt.
    pub fn hash(secret: &str) -> Result<Self, SecretHashError> {
        let salt = SaltString::generate(&mut OsRng);
        Argon2::default()
            .hash_password(secret.as_bytes(), &salt)
            .map(|hash| Self(hash.to_string()))
            .map_err(|err| SecretHashError {
                message: err.to_string(),
            })
    }

    /// Wrap a PHC string loaded from storage.
    pub fn from_phc(phc: impl Into<String>) -> Self {
        Self(phc.into())
    }

    /// PHC string for persistence.
    pub fn as_phc(&self) -> &str {
        self.0.as_str()
    }

    /// Check `candidate` against the stored hash.
    ///
    /// A malformed stored hash never verifies.
    pub fn verify(&self, candidate: &str) -> bool {
        match PasswordHash::new(&self.0) {
            Ok(parsed) => Argon2::default()
                .verify_password(candidate.as_bytes(), &parsed)
                .is_ok(),
            Err(error) => {
                tracing::warn!(%error, "stored secret hash is malformed");
                false
            }
        }
    }
}

impl fmt::Debug for SecretHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SecretHash(<redacted>)")
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("", "pw", LoginValidationError::Identity(RegistrantValidationError::EmptyIdentity))]
    #[case("   ", "pw", LoginValidationError::Identity(RegistrantValidationError::EmptyIdentity))]
    #[case("user", "", LoginValidationError::EmptyPassword)]
    fn invalid_credentials(
        #[case] username: &str,
        #[case] password: &str,
        #[case] expected: LoginValidationError,
    ) {
        let err = LoginCredentials::try_from_parts(username, password)
            .expect_err("invalid inputs must fail");
        assert_eq!(err, expected);
    }

    #[rstest]
    fn password_whitespace_is_preserved() {
        let creds = LoginCredentials::try_from_parts(" alice ", " pw ").expect("valid");
        assert_eq!(creds.identity().as_ref(), "alice");
        assert_eq!(creds.password(), " pw ");
    }

    #[rstest]
    fn debug_output_redacts_password() {
        let creds = LoginCredentials::try_from_parts("alice", "sekrit").expect("valid");
        assert!(!format!("{creds:?}").contains("sekrit"));
    }

    #[rstest]
    fn hash_verifies_only_the_original_secret() {
        let hash = SecretHash::hash("correct horse").expect("hash");
        assert!(hash.as_phc().starts_with("$argon2id$"));
        assert!(hash.verify("correct horse"));
        assert!(!hash.verify("correct horse "));
        assert!(!hash.verify("wrong"));
    }

    #[rstest]
    fn hashing_salts_each_secret() {
        let first = SecretHash::hash("same").expect("hash");
        let second = SecretHash::hash("same").expect("hash");
        assert_ne!(first.as_phc(), second.as_phc());
    }

    #[rstest]
    fn malformed_hash_never_verifies() {
        assert!(!SecretHash::from_phc("plaintext").verify("plaintext"));
    }
}
