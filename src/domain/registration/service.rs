use async_trait::async_trait;

use super::{
    errors::RegistrationError,
    models::{
        user::{NewUser, RegistrationRequest, User},
        validation::{RegistrationForm, ValidationErrors, EMAIL_FIELD, EMAIL_TAKEN},
    },
    ports::{RegistrationService, UserRepository, UserRepositoryError, WelcomeNotifier},
};
use crate::domain::welcome_email::models::job::WelcomeEmailJob;
use crate::outbound::telemetry::spawn_blocking_with_tracing;
use anyhow::Context;
use std::sync::Arc;

#[derive(Debug)]
pub struct Registration<R, N>
where
    R: UserRepository,
    N: WelcomeNotifier,
{
    pub repo: Arc<R>,
    pub notifier: Arc<N>,
}

impl<R, N> Registration<R, N>
where
    R: UserRepository,
    N: WelcomeNotifier,
{
    pub fn new(repo: Arc<R>, notifier: Arc<N>) -> Self {
        Self { repo, notifier }
    }
}

#[async_trait]
impl<R, N> RegistrationService for Registration<R, N>
where
    R: UserRepository,
    N: WelcomeNotifier,
{
    #[tracing::instrument(
        name = "Register a new user",
        skip(self, request),
        fields(user_id = tracing::field::Empty)
    )]
    async fn register(&self, request: RegistrationRequest) -> Result<User, RegistrationError> {
        let mut form = RegistrationForm::parse(request);

        let email_taken = match form.email() {
            Some(email) => self.repo.email_exists(email).await?,
            None => false,
        };
        if email_taken {
            form.reject_email(EMAIL_TAKEN);
        }
        let registration = form.finish()?;

        let password_hash = spawn_blocking_with_tracing(move || registration.password.hash())
            .await
            .context("Failed to spawn a blocking task.")??;

        let new_user = NewUser {
            name: registration.name,
            email: registration.email,
            password_hash,
        };

        let user = match self.repo.insert(new_user).await {
            Ok(user) => user,
            Err(UserRepositoryError::DuplicateEmail) => {
                let mut errors = ValidationErrors::default();
                errors.add(EMAIL_FIELD, EMAIL_TAKEN);
                return Err(RegistrationError::Validation(errors));
            }
            Err(e) => return Err(e.into()),
        };
        tracing::Span::current().record("user_id", tracing::field::display(&user.id));

        self.notifier
            .notify(WelcomeEmailJob::new(user.email.clone(), user.name.clone()))
            .await?;

        Ok(user)
    }
}
