use super::ConfigurationError;
use crate::configuration::GmailSettings;
use crate::domain::gmail_auth::{
    errors::AuthorizationError,
    models::{AuthorizationCode, OAuth2Token, GMAIL_SEND_SCOPE},
    ports::OAuthProvider,
};
use anyhow::Context;
use async_trait::async_trait;
use reqwest::{Client, Url};
use secrecy::{ExposeSecret, Secret};

/// Google's OAuth2 endpoints: consent URL, code exchange and refresh grant.
#[derive(Debug, Clone)]
pub struct GoogleOAuthClient {
    http_client: Client,
    client_id: String,
    client_secret: Secret<String>,
    redirect_uri: String,
    auth_url: Url,
    token_url: Url,
}

impl GoogleOAuthClient {
    pub fn new(configuration: &GmailSettings) -> Result<Self, ConfigurationError> {
        if configuration.client_id.trim().is_empty() {
            return Err(ConfigurationError::MissingCredential("GOOGLE_CLIENT_ID"));
        }
        if configuration.client_secret.expose_secret().trim().is_empty() {
            return Err(ConfigurationError::MissingCredential(
                "GOOGLE_CLIENT_SECRET",
            ));
        }
        let auth_url = Url::parse(&configuration.auth_url)
            .map_err(|e| ConfigurationError::InvalidUrl(format!("auth_url: {}", e)))?;
        let token_url = Url::parse(&configuration.token_url)
            .map_err(|e| ConfigurationError::InvalidUrl(format!("token_url: {}", e)))?;

        let http_client = Client::builder()
            .timeout(configuration.timeout())
            .build()
            .context("Failed to build the OAuth2 HTTP client")?;

        Ok(Self {
            http_client,
            client_id: configuration.client_id.clone(),
            client_secret: configuration.client_secret.clone(),
            redirect_uri: configuration.redirect_uri.clone(),
            auth_url,
            token_url,
        })
    }

    /// Refresh-token grant. Google usually omits `refresh_token` in the answer.
    #[tracing::instrument(name = "Refreshing Gmail access token", skip(self, refresh_token))]
    pub async fn refresh_access_token(
        &self,
        refresh_token: &Secret<String>,
    ) -> Result<OAuth2Token, AuthorizationError> {
        let form = [
            ("client_id", self.client_id.as_str()),
            ("client_secret", self.client_secret.expose_secret().as_str()),
            ("refresh_token", refresh_token.expose_secret().as_str()),
            ("grant_type", "refresh_token"),
        ];
        self.request_token(&form).await
    }

    async fn request_token(&self, form: &[(&str, &str)]) -> Result<OAuth2Token, AuthorizationError> {
        let response = self
            .http_client
            .post(self.token_url.clone())
            .form(form)
            .send()
            .await
            .map_err(|e| AuthorizationError::ExchangeFailed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AuthorizationError::ExchangeFailed(format!(
                "token endpoint answered {}: {}",
                status.as_u16(),
                body
            )));
        }

        response
            .json::<OAuth2Token>()
            .await
            .map_err(|e| AuthorizationError::ExchangeFailed(e.to_string()))
    }
}

#[async_trait]
impl OAuthProvider for GoogleOAuthClient {
    fn authorization_url(&self) -> String {
        let mut url = self.auth_url.clone();
        url.query_pairs_mut()
            .append_pair("client_id", &self.client_id)
            .append_pair("redirect_uri", &self.redirect_uri)
            .append_pair("response_type", "code")
            .append_pair("scope", GMAIL_SEND_SCOPE)
            .append_pair("access_type", "offline")
            .append_pair("prompt", "consent");
        url.to_string()
    }

    #[tracing::instrument(name = "Exchanging authorization code", skip(self, code))]
    async fn exchange_code(
        &self,
        code: &AuthorizationCode,
    ) -> Result<OAuth2Token, AuthorizationError> {
        let form = [
            ("code", code.as_ref()),
            ("client_id", self.client_id.as_str()),
            ("client_secret", self.client_secret.expose_secret().as_str()),
            ("redirect_uri", self.redirect_uri.as_str()),
            ("grant_type", "authorization_code"),
        ];
        self.request_token(&form).await
    }
}
