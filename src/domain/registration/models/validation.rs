use super::{
    email::UserEmail,
    name::UserName,
    password::Password,
    user::RegistrationRequest,
};
use std::collections::BTreeMap;

pub const NAME_FIELD: &str = "name";
pub const EMAIL_FIELD: &str = "email";
pub const PASSWORD_FIELD: &str = "password";

pub const EMAIL_TAKEN: &str = "The email has already been taken.";

/// Field name to the list of messages for every rule that field failed.
#[derive(Debug, Default, Clone, PartialEq, serde::Serialize)]
#[serde(transparent)]
pub struct ValidationErrors(BTreeMap<String, Vec<String>>);

impl ValidationErrors {
    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.0
            .entry(field.to_string())
            .or_default()
            .push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn has(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn messages(&self, field: &str) -> &[String] {
        self.0.get(field).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }
}

impl std::fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let messages: Vec<&str> = self.0.values().flatten().map(String::as_str).collect();
        write!(f, "{}", messages.join(" "))
    }
}

/// A registration whose every field passed the format rules.
#[derive(Debug)]
pub struct ValidRegistration {
    pub name: UserName,
    pub email: UserEmail,
    pub password: Password,
}

/// Result of checking a `RegistrationRequest` field by field. Store backed
/// rules (email uniqueness) are added afterwards with `reject_email`.
#[derive(Debug)]
pub struct RegistrationForm {
    name: Option<UserName>,
    email: Option<UserEmail>,
    password: Option<Password>,
    errors: ValidationErrors,
}

impl RegistrationForm {
    pub fn parse(request: RegistrationRequest) -> Self {
        let mut errors = ValidationErrors::default();

        let name = UserName::parse(request.name)
            .map_err(|e| errors.add(NAME_FIELD, e.to_string()))
            .ok();
        let email = UserEmail::parse(request.email)
            .map_err(|rules| {
                for e in rules {
                    errors.add(EMAIL_FIELD, e.to_string());
                }
            })
            .ok();
        let password = Password::parse(request.password, request.password_confirmation)
            .map_err(|rules| {
                for e in rules {
                    errors.add(PASSWORD_FIELD, e.to_string());
                }
            })
            .ok();

        Self {
            name,
            email,
            password,
            errors,
        }
    }

    /// The email, if it is well formed.
    pub fn email(&self) -> Option<&UserEmail> {
        self.email.as_ref()
    }

    pub fn reject_email(&mut self, message: &str) {
        self.errors.add(EMAIL_FIELD, message);
    }

    pub fn finish(self) -> Result<ValidRegistration, ValidationErrors> {
        match (self.name, self.email, self.password) {
            (Some(name), Some(email), Some(password)) if self.errors.is_empty() => {
                Ok(ValidRegistration {
                    name,
                    email,
                    password,
                })
            }
            _ => Err(self.errors),
        }
    }
}
