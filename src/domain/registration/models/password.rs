use anyhow::Context;
use argon2::password_hash::SaltString;
use argon2::{Algorithm, Argon2, Params, PasswordHasher, PasswordVerifier, Version};
use secrecy::{ExposeSecret, Secret};

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum PasswordError {
    #[error("The password field is required.")]
    Missing,
    #[error(
        "The password field must be at least {} characters.",
        Password::MIN_LENGTH
    )]
    TooShort,
    #[error("The password field confirmation does not match.")]
    ConfirmationMismatch,
}

#[derive(Debug)]
pub struct Password(Secret<String>);

impl Password {
    pub const MIN_LENGTH: usize = 8;

    /// Checks presence, minimum length and confirmation. Every failing rule is
    /// reported, not only the first one.
    pub fn parse(
        password: Option<Secret<String>>,
        confirmation: Option<Secret<String>>,
    ) -> Result<Password, Vec<PasswordError>> {
        let password = match password {
            Some(p) if !p.expose_secret().is_empty() => p,
            _ => return Err(vec![PasswordError::Missing]),
        };

        let mut errors = Vec::new();
        if password.expose_secret().chars().count() < Password::MIN_LENGTH {
            errors.push(PasswordError::TooShort);
        }
        let confirmed = confirmation
            .map(|c| c.expose_secret() == password.expose_secret())
            .unwrap_or(false);
        if !confirmed {
            errors.push(PasswordError::ConfirmationMismatch);
        }

        if errors.is_empty() {
            Ok(Self(password))
        } else {
            Err(errors)
        }
    }

    /// Hashes the password with argon2id and a random salt.
    /// CPU bound: run it through `spawn_blocking_with_tracing`.
    pub fn hash(self) -> Result<PasswordHash, anyhow::Error> {
        let salt = SaltString::generate(&mut rand::thread_rng());
        let params = Params::new(15000, 2, 1, None)
            .map_err(|e| anyhow::anyhow!("Invalid argon2 parameters: {}", e))?;
        let password_hash = Argon2::new(Algorithm::Argon2id, Version::V0x13, params)
            .hash_password(self.0.expose_secret().as_bytes(), &salt)
            .map_err(|e| anyhow::anyhow!("Failed to hash password: {}", e))?
            .to_string();
        Ok(PasswordHash(Secret::new(password_hash)))
    }
}

/// PHC formatted argon2 hash, as stored in `users.password_hash`.
#[derive(Debug, Clone)]
pub struct PasswordHash(Secret<String>);

impl PasswordHash {
    pub fn new(phc: String) -> Self {
        Self(Secret::new(phc))
    }

    pub fn as_secret(&self) -> &Secret<String> {
        &self.0
    }

    pub fn verify(&self, candidate: &Secret<String>) -> Result<bool, anyhow::Error> {
        let expected = argon2::PasswordHash::new(self.0.expose_secret())
            .map_err(|e| anyhow::anyhow!("{}", e))
            .context("Failed to parse hash in PHC string format.")?;
        Ok(Argon2::default()
            .verify_password(candidate.expose_secret().as_bytes(), &expected)
            .is_ok())
    }
}
