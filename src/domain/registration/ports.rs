use async_trait::async_trait;

use super::errors::RegistrationError;
use super::models::{
    email::UserEmail,
    user::{NewUser, RegistrationRequest, User},
};
use crate::domain::welcome_email::models::job::WelcomeEmailJob;

///  Represents a store of registered users
#[async_trait]
pub trait UserRepository: Send + Sync + 'static {
    async fn email_exists(&self, email: &UserEmail) -> Result<bool, UserRepositoryError>;

    /// Inserts the user in a single statement. A clash on the unique email
    /// index is reported as `DuplicateEmail`.
    async fn insert(&self, user: NewUser) -> Result<User, UserRepositoryError>;
}

#[derive(thiserror::Error, Debug)]
pub enum UserRepositoryError {
    #[error("A user with this email already exists")]
    DuplicateEmail,

    #[error(transparent)]
    Unexpected(#[from] anyhow::Error),
}

/// Hands a welcome email over for asynchronous delivery. Implementations must
/// return as soon as the job is queued.
#[async_trait]
pub trait WelcomeNotifier: Send + Sync + 'static {
    async fn notify(&self, job: WelcomeEmailJob) -> Result<(), NotifierError>;
}

#[derive(thiserror::Error, Debug)]
pub enum NotifierError {
    #[error("Welcome email queue is closed")]
    QueueClosed,

    #[error(transparent)]
    Unexpected(#[from] anyhow::Error),
}

#[async_trait]
pub trait RegistrationService: Send + Sync + 'static {
    async fn register(&self, req: RegistrationRequest) -> Result<User, RegistrationError>;
}
