#[derive(thiserror::Error, Debug, PartialEq)]
pub enum EmailError {
    #[error("Invalid email subject: {0}")]
    InvalidSubject(String),
    #[error("Invalid email Html content: {0}")]
    InvalidHtmlContent(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailMessage {
    subject: EmailSubject,
    html_content: EmailHtmlContent,
}

impl EmailMessage {
    pub fn new(subject: EmailSubject, html_content: EmailHtmlContent) -> Self {
        Self {
            subject,
            html_content,
        }
    }
    pub fn subject_as_ref(&self) -> &EmailSubject {
        &self.subject
    }
    pub fn html_as_ref(&self) -> &EmailHtmlContent {
        &self.html_content
    }
}

/// Single line subject. Line breaks are refused since the subject ends up as
/// a raw message header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailSubject(String);

impl TryFrom<String> for EmailSubject {
    type Error = EmailError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        if value.trim().is_empty() {
            return Err(EmailError::InvalidSubject(
                "EmailSubject cannot be empty.".into(),
            ));
        }
        if value.contains(['\r', '\n']) {
            return Err(EmailError::InvalidSubject(
                "EmailSubject cannot contain line breaks.".into(),
            ));
        }
        Ok(Self(value))
    }
}

impl TryFrom<&str> for EmailSubject {
    type Error = EmailError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        EmailSubject::try_from(value.to_string())
    }
}

impl AsRef<str> for EmailSubject {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailHtmlContent(String);

impl TryFrom<String> for EmailHtmlContent {
    type Error = EmailError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        if !value.trim().is_empty() {
            Ok(Self(value))
        } else {
            Err(EmailError::InvalidHtmlContent(
                "EmailHtmlContent cannot be empty.".into(),
            ))
        }
    }
}

impl TryFrom<&str> for EmailHtmlContent {
    type Error = EmailError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        EmailHtmlContent::try_from(value.to_string())
    }
}

impl AsRef<str> for EmailHtmlContent {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
