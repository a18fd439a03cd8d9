use validator::validate_email;

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum UserEmailError {
    #[error("The email field is required.")]
    Missing,
    #[error("The email field must be a valid email address.")]
    Invalid,
    #[error(
        "The email field must not be greater than {} characters.",
        UserEmail::MAX_LENGTH
    )]
    TooLong,
}

#[derive(Debug, Clone, PartialEq, PartialOrd, Eq, Ord, Hash)]
pub struct UserEmail(String);

impl UserEmail {
    pub const MAX_LENGTH: usize = 255;

    /// Trims the input, then checks every rule. A missing email reports only
    /// `Missing`; otherwise all failing rules are returned in rule order.
    pub fn parse(s: Option<String>) -> Result<UserEmail, Vec<UserEmailError>> {
        let s = match s.as_deref().map(str::trim) {
            Some(s) if !s.is_empty() => s.to_string(),
            _ => return Err(vec![UserEmailError::Missing]),
        };

        let mut errors = Vec::new();
        if !validate_email(&s) {
            errors.push(UserEmailError::Invalid);
        }
        if s.chars().count() > UserEmail::MAX_LENGTH {
            errors.push(UserEmailError::TooLong);
        }

        if errors.is_empty() {
            Ok(Self(s))
        } else {
            Err(errors)
        }
    }
}

impl AsRef<str> for UserEmail {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for UserEmail {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl From<UserEmail> for String {
    fn from(email: UserEmail) -> Self {
        email.0
    }
}
