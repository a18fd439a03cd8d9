use super::PostgresDb;
use crate::domain::registration::{
    models::{
        email::UserEmail,
        user::{NewUser, User},
    },
    ports::{UserRepository, UserRepositoryError},
};
use anyhow::Context;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use secrecy::ExposeSecret;
use sqlx::Row;

const UNIQUE_VIOLATION: &str = "23505";

fn is_unique_violation(error: &sqlx::Error) -> bool {
    match error {
        sqlx::Error::Database(db_error) => db_error.code().as_deref() == Some(UNIQUE_VIOLATION),
        _ => false,
    }
}

#[async_trait]
impl UserRepository for PostgresDb {
    #[tracing::instrument(name = "Checking if email is already registered", skip(self, email))]
    async fn email_exists(&self, email: &UserEmail) -> Result<bool, UserRepositoryError> {
        let row = sqlx::query("SELECT EXISTS(SELECT 1 FROM users WHERE email = $1) AS taken")
            .bind(email.as_ref())
            .fetch_one(self.pool())
            .await
            .context("Failed to look up the email in the users table")?;

        let taken: bool = row
            .try_get("taken")
            .context("Failed to read the email lookup result")?;
        Ok(taken)
    }

    #[tracing::instrument(name = "Saving new user details in db", skip(self, user))]
    async fn insert(&self, user: NewUser) -> Result<User, UserRepositoryError> {
        let user_id = uuid::Uuid::new_v4();
        let created_at = Utc::now();

        let row = sqlx::query(
            r#"
        INSERT INTO users (id, name, email, password_hash, created_at)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING created_at
                "#,
        )
        .bind(user_id)
        .bind(user.name.as_ref())
        .bind(user.email.as_ref())
        .bind(user.password_hash.as_secret().expose_secret())
        .bind(created_at)
        .fetch_one(self.pool())
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                UserRepositoryError::DuplicateEmail
            } else {
                UserRepositoryError::Unexpected(
                    anyhow::Error::from(e).context("Failed to insert a new user in the database"),
                )
            }
        })?;

        let created_at: DateTime<Utc> = row
            .try_get("created_at")
            .context("Failed to read the creation timestamp of the new user")?;

        Ok(User {
            id: user_id,
            name: user.name,
            email: user.email,
            created_at,
        })
    }
}
