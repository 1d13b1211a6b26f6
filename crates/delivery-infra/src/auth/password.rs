//! Password storage implementations.

use std::str::FromStr;
use std::sync::Arc;

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};

use delivery_core::ports::{AuthError, PasswordService};

/// How passwords are kept on the user record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PasswordStorage {
    /// Argon2id PHC strings.
    #[default]
    Argon2,
    /// Raw passwords compared verbatim. Only for stores that already hold
    /// plaintext credentials.
    Plaintext,
}

impl FromStr for PasswordStorage {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "argon2" => Ok(PasswordStorage::Argon2),
            "plaintext" => Ok(PasswordStorage::Plaintext),
            other => Err(format!("unknown password storage '{}'", other)),
        }
    }
}

impl PasswordStorage {
    /// Build the matching password service.
    pub fn service(self) -> Arc<dyn PasswordService> {
        match self {
            PasswordStorage::Argon2 => Arc::new(Argon2PasswordService::new()),
            PasswordStorage::Plaintext => {
                tracing::warn!("Passwords are stored in plaintext. Set PASSWORD_STORAGE=argon2.");
                Arc::new(PlaintextPasswordService)
            }
        }
    }
}

/// Argon2-based password service.
pub struct Argon2PasswordService {
    argon2: Argon2<'static>,
}

impl Argon2PasswordService {
    pub fn new() -> Self {
        Self {
            argon2: Argon2::default(),
        }
    }
}

impl Default for Argon2PasswordService {
    fn default() -> Self {
        Self::new()
    }
}

impl PasswordService for Argon2PasswordService {
    fn store(&self, password: &str) -> Result<String, AuthError> {
        let salt = SaltString::generate(&mut OsRng);

        self.argon2
            .hash_password(password.as_bytes(), &salt)
            .map(|h| h.to_string())
            .map_err(|e| AuthError::HashingError(e.to_string()))
    }

    fn verify(&self, password: &str, stored: &str) -> Result<bool, AuthError> {
        // A record that does not hold a PHC string can never match.
        let Ok(parsed_hash) = PasswordHash::new(stored) else {
            return Ok(false);
        };

        Ok(self
            .argon2
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok())
    }
}

/// Verbatim password comparison for legacy plaintext stores.
pub struct PlaintextPasswordService;

impl PasswordService for PlaintextPasswordService {
    fn store(&self, password: &str) -> Result<String, AuthError> {
        Ok(password.to_string())
    }

    fn verify(&self, password: &str, stored: &str) -> Result<bool, AuthError> {
        Ok(password == stored)
    }
}
