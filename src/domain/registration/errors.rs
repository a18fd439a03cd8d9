use super::models::validation::ValidationErrors;
use super::ports::{NotifierError, UserRepositoryError};

#[derive(thiserror::Error, Debug)]
pub enum RegistrationError {
    #[error("Validation failed: {0}")]
    Validation(ValidationErrors),
    #[error(transparent)]
    Unexpected(#[from] anyhow::Error),
}

impl From<ValidationErrors> for RegistrationError {
    fn from(errors: ValidationErrors) -> Self {
        Self::Validation(errors)
    }
}

impl From<UserRepositoryError> for RegistrationError {
    fn from(error: UserRepositoryError) -> Self {
        match error {
            UserRepositoryError::Unexpected(e) => RegistrationError::Unexpected(e),
            UserRepositoryError::DuplicateEmail => {
                RegistrationError::Unexpected(anyhow::anyhow!(error))
            }
        }
    }
}

impl From<NotifierError> for RegistrationError {
    fn from(error: NotifierError) -> Self {
        match error {
            NotifierError::Unexpected(e) => RegistrationError::Unexpected(e),
            NotifierError::QueueClosed => RegistrationError::Unexpected(anyhow::anyhow!(error)),
        }
    }
}
