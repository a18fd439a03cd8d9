use async_trait::async_trait;

use super::errors::AuthorizationError;
use super::models::{AuthorizationCode, OAuth2Token};

/// The OAuth2 authorization server granting Gmail access.
#[async_trait]
pub trait OAuthProvider: Send + Sync + 'static {
    /// URL the operator visits to grant the application access.
    fn authorization_url(&self) -> String;

    /// Authorization-code grant.
    async fn exchange_code(&self, code: &AuthorizationCode)
        -> Result<OAuth2Token, AuthorizationError>;
}

#[async_trait]
pub trait GmailAuthService: Send + Sync + 'static {
    fn authorization_url(&self) -> String;

    async fn complete_authorization(
        &self,
        code: Option<String>,
    ) -> Result<OAuth2Token, AuthorizationError>;
}
