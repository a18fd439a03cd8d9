use crate::domain::gmail_auth::errors::AuthorizationError;
use crate::domain::registration::errors::RegistrationError;
use crate::domain::registration::models::validation::ValidationErrors;

use actix_web::HttpResponse;
use actix_web::{http::StatusCode, ResponseError};

#[derive(thiserror::Error)]
pub enum AppError {
    #[error("Validation failed")]
    Validation(ValidationErrors),
    #[error("Malformed request body: {0}")]
    MalformedBody(String),
    #[error("Registration failed")]
    Registration(#[source] anyhow::Error),
    #[error("Authorization code not provided")]
    MissingAuthorizationCode,
    #[error("Authentication failed: {0}")]
    Authentication(String),
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

pub fn error_chain_fmt(
    e: &impl std::error::Error,
    f: &mut std::fmt::Formatter<'_>,
) -> std::fmt::Result {
    writeln!(f, "{}\n", e)?;
    let mut current = e.source();
    while let Some(cause) = current {
        writeln!(f, "Caused by:\n\t{}", cause)?;
        current = cause.source();
    }
    Ok(())
}

impl From<RegistrationError> for AppError {
    fn from(error: RegistrationError) -> Self {
        match error {
            RegistrationError::Validation(errors) => AppError::Validation(errors),
            RegistrationError::Unexpected(e) => AppError::Registration(e),
        }
    }
}

impl From<AuthorizationError> for AppError {
    fn from(error: AuthorizationError) -> Self {
        match error {
            AuthorizationError::MissingCode => AppError::MissingAuthorizationCode,
            AuthorizationError::ExchangeFailed(message) => AppError::Authentication(message),
            AuthorizationError::Unexpected(e) => AppError::Authentication(e.to_string()),
        }
    }
}

#[derive(serde::Serialize)]
struct FailureBody<'a> {
    success: bool,
    message: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    errors: Option<&'a ValidationErrors>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl<'a> FailureBody<'a> {
    fn new(message: &'a str) -> Self {
        Self {
            success: false,
            message,
            errors: None,
            error: None,
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::MalformedBody(_) | AppError::MissingAuthorizationCode => {
                StatusCode::BAD_REQUEST
            }
            AppError::Registration(_) | AppError::Authentication(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        let mut response = HttpResponse::build(self.status_code());
        match self {
            AppError::Validation(errors) => response.json(FailureBody {
                errors: Some(errors),
                ..FailureBody::new("Validation failed")
            }),
            AppError::MalformedBody(error) => response.json(FailureBody {
                error: Some(error.clone()),
                ..FailureBody::new("Malformed request body")
            }),
            AppError::Registration(error) => response.json(FailureBody {
                error: Some(error.to_string()),
                ..FailureBody::new("Registration failed")
            }),
            AppError::MissingAuthorizationCode => response.json(serde_json::json!({
                "error": "Authorization code not provided",
            })),
            AppError::Authentication(message) => response.json(serde_json::json!({
                "error": "Authentication failed",
                "message": message,
            })),
        }
    }
}
