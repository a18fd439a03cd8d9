use unicode_segmentation::UnicodeSegmentation;

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum UserNameError {
    #[error("The name field is required.")]
    Missing,
    #[error(
        "The name field must not be greater than {} characters.",
        UserName::MAX_LENGTH
    )]
    TooLong,
}

#[derive(Debug, PartialEq, Clone)]
pub struct UserName(String);

impl UserName {
    pub const MAX_LENGTH: usize = 255;

    /// Returns an instance of `UserName` if the trimmed input is present, not
    /// blank and at most `MAX_LENGTH` graphemes long.
    pub fn parse(s: Option<String>) -> Result<UserName, UserNameError> {
        let s = match s.as_deref().map(str::trim) {
            Some(s) if !s.is_empty() => s.to_string(),
            _ => return Err(UserNameError::Missing),
        };
        if s.graphemes(true).count() > UserName::MAX_LENGTH {
            return Err(UserNameError::TooLong);
        }
        Ok(Self(s))
    }
}

impl AsRef<str> for UserName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for UserName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}
