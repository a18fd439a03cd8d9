use async_trait::async_trait;

use super::models::message::{EmailError, EmailMessage};
use crate::domain::registration::models::email::UserEmail;

/// Delivers a composed message to a single recipient. No retry happens at
/// this level; a failed call is reported to the caller as is.
#[async_trait]
pub trait EmailTransport: Send + Sync + 'static {
    async fn send_email(
        &self,
        recipient: &UserEmail,
        message: &EmailMessage,
    ) -> Result<(), TransportError>;
}

#[derive(thiserror::Error, Debug)]
pub enum TransportError {
    #[error("Invalid email message: {0}")]
    InvalidMessage(#[from] EmailError),

    #[error("Failed to obtain an access token: {0}")]
    AccessToken(String),

    #[error("Mail API answered {status}: {body}")]
    Api { status: u16, body: String },

    #[error(transparent)]
    Unexpected(#[from] anyhow::Error),
}
