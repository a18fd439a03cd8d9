use super::google_oauth::GoogleOAuthClient;
use super::ConfigurationError;
use crate::configuration::GmailSettings;
use crate::domain::registration::models::email::UserEmail;
use crate::domain::welcome_email::{
    models::message::EmailMessage,
    ports::{EmailTransport, TransportError},
};
use anyhow::Context;
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use secrecy::{ExposeSecret, Secret};
use std::time::{Duration, Instant};
use tokio::sync::Mutex;

mod raw_message;

pub use raw_message::{build_raw_message, encode_raw_message};

/// Refresh this long before Google says the token expires.
const EXPIRY_MARGIN: Duration = Duration::from_secs(60);

#[derive(Debug)]
struct CachedAccessToken {
    token: Secret<String>,
    expires_at: Instant,
}

impl CachedAccessToken {
    fn is_fresh(&self) -> bool {
        Instant::now() < self.expires_at
    }
}

/// Sends mail through the Gmail REST API on behalf of the account that
/// granted the stored refresh token.
#[derive(Debug)]
pub struct GmailClient {
    http_client: Client,
    api_base_url: String,
    oauth_client: GoogleOAuthClient,
    refresh_token: Secret<String>,
    access_token: Mutex<Option<CachedAccessToken>>,
}

impl GmailClient {
    pub fn new(configuration: &GmailSettings) -> Result<Self, ConfigurationError> {
        let oauth_client = GoogleOAuthClient::new(configuration)?;
        let refresh_token = configuration
            .refresh_token()
            .cloned()
            .ok_or(ConfigurationError::MissingCredential("GOOGLE_REFRESH_TOKEN"))?;

        let http_client = Client::builder()
            .timeout(configuration.timeout())
            .build()
            .context("Failed to build the Gmail HTTP client")?;

        Ok(Self {
            http_client,
            api_base_url: configuration.api_base_url.trim_end_matches('/').to_string(),
            oauth_client,
            refresh_token,
            access_token: Mutex::new(None),
        })
    }

    /// Cached access token, refreshed when missing or close to expiry.
    async fn access_token(&self) -> Result<Secret<String>, TransportError> {
        let mut cached = self.access_token.lock().await;
        if let Some(token) = cached.as_ref().filter(|t| t.is_fresh()) {
            return Ok(token.token.clone());
        }

        let fresh = self
            .oauth_client
            .refresh_access_token(&self.refresh_token)
            .await
            .map_err(|e| TransportError::AccessToken(e.to_string()))?;

        *cached = fresh.expires_in.and_then(|seconds| {
            Duration::from_secs(seconds)
                .checked_sub(EXPIRY_MARGIN)
                .map(|lifetime| CachedAccessToken {
                    token: fresh.access_token.clone(),
                    expires_at: Instant::now() + lifetime,
                })
        });

        Ok(fresh.access_token)
    }

    async fn forget_access_token(&self) {
        *self.access_token.lock().await = None;
    }
}

#[derive(serde::Serialize)]
struct SendMessageRequest<'a> {
    raw: &'a str,
}

#[async_trait]
impl EmailTransport for GmailClient {
    #[tracing::instrument(name = "Sending email through Gmail", skip(self, recipient, message))]
    async fn send_email(
        &self,
        recipient: &UserEmail,
        message: &EmailMessage,
    ) -> Result<(), TransportError> {
        let access_token = self.access_token().await?;
        let raw = encode_raw_message(&build_raw_message(recipient, message));

        let url = format!("{}/gmail/v1/users/me/messages/send", self.api_base_url);
        let response = self
            .http_client
            .post(&url)
            .bearer_auth(access_token.expose_secret())
            .json(&SendMessageRequest { raw: &raw })
            .send()
            .await
            .context("Failed to reach the Gmail API")?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }
        if status == StatusCode::UNAUTHORIZED {
            self.forget_access_token().await;
        }
        let body = response.text().await.unwrap_or_default();
        Err(TransportError::Api {
            status: status.as_u16(),
            body,
        })
    }
}
