use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Gender recorded on a user profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Gender {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Male" => Ok(Gender::Male),
            "Female" => Ok(Gender::Female),
            other => Err(format!("unknown gender '{}'", other)),
        }
    }
}

/// User entity - a registered customer.
///
/// `password` holds whatever the configured `PasswordService` produced on
/// registration: an Argon2 PHC string, or the raw password for legacy stores.
#[derive(Debug, Clone)]
pub struct User {
    pub id: Uuid,
    pub full_name: String,
    pub password: String,
    pub email: String,
    pub gender: Gender,
    pub birth_date: DateTime<Utc>,
    pub address: Option<String>,
    pub phone_number: Option<String>,
}

impl User {
    /// Create a user with a freshly generated ID.
    ///
    /// `email` must already be normalized and `password` already passed
    /// through the password service.
    pub fn new(registration: NewUser, email: String, password: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            full_name: registration.full_name,
            password,
            email,
            gender: registration.gender,
            birth_date: registration.birth_date,
            address: registration.address,
            phone_number: registration.phone_number,
        }
    }

    /// Overwrite the editable profile fields. Email and password stay as they are.
    pub fn apply_edit(&mut self, edit: UserEdit) {
        self.full_name = edit.full_name;
        self.birth_date = edit.birth_date;
        self.gender = edit.gender;
        self.address = edit.address;
        self.phone_number = edit.phone_number;
    }
}

/// Registration input.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub full_name: String,
    pub password: String,
    pub email: String,
    pub gender: Gender,
    pub birth_date: DateTime<Utc>,
    pub address: Option<String>,
    pub phone_number: Option<String>,
}

/// Profile edit input.
#[derive(Debug, Clone)]
pub struct UserEdit {
    pub full_name: String,
    pub birth_date: DateTime<Utc>,
    pub gender: Gender,
    pub address: Option<String>,
    pub phone_number: Option<String>,
}

/// Email/password pair used to authenticate. Never persisted.
#[derive(Debug, Clone)]
pub struct LoginCredentials {
    pub email: String,
    pub password: String,
}

/// Normalize an email for storage and lookup.
///
/// Lowercases the whole string and strips trailing whitespace only;
/// leading whitespace is kept.
pub fn normalize_email(email: &str) -> String {
    let mut normalized = email.to_lowercase();
    normalized.truncate(normalized.trim_end().len());
    normalized
}

/// Mask an email for logging, e.g. `a***@example.com`.
pub fn mask_email(email: &str) -> String {
    match email.find('@') {
        Some(at_pos) => {
            let (local, domain) = email.split_at(at_pos);
            match local.chars().next() {
                Some(first) if local.chars().count() > 1 => format!("{}***{}", first, domain),
                _ => format!("***{}", domain),
            }
        }
        None => "***".to_string(),
    }
}
