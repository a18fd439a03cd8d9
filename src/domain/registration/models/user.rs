use super::{email::UserEmail, name::UserName, password::PasswordHash};
use chrono::{DateTime, Utc};
use secrecy::Secret;

/// Registration payload as received on the wire. Every field is optional so
/// that a missing field surfaces as a validation error instead of a decode error.
#[derive(serde::Deserialize, Debug, Default)]
pub struct RegistrationRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub password: Option<Secret<String>>,
    #[serde(default)]
    pub password_confirmation: Option<Secret<String>>,
}

impl RegistrationRequest {
    pub fn new(name: &str, email: &str, password: &str, password_confirmation: &str) -> Self {
        Self {
            name: Some(name.to_string()),
            email: Some(email.to_string()),
            password: Some(Secret::new(password.to_string())),
            password_confirmation: Some(Secret::new(password_confirmation.to_string())),
        }
    }
}

pub type UserId = uuid::Uuid;

/// A validated user ready to be stored.
#[derive(Debug)]
pub struct NewUser {
    pub name: UserName,
    pub email: UserEmail,
    pub password_hash: PasswordHash,
}

/// Public view of a stored user.
#[derive(Debug, Clone)]
pub struct User {
    pub id: UserId,
    pub name: UserName,
    pub email: UserEmail,
    pub created_at: DateTime<Utc>,
}
