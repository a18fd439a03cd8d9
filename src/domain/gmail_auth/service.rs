use async_trait::async_trait;
use std::sync::Arc;

use super::{
    errors::AuthorizationError,
    models::{AuthorizationCode, OAuth2Token},
    ports::{GmailAuthService, OAuthProvider},
};

#[derive(Debug)]
pub struct GmailAuthorization<P>
where
    P: OAuthProvider,
{
    pub provider: Arc<P>,
}

impl<P> GmailAuthorization<P>
where
    P: OAuthProvider,
{
    pub fn new(provider: Arc<P>) -> Self {
        Self { provider }
    }
}

#[async_trait]
impl<P> GmailAuthService for GmailAuthorization<P>
where
    P: OAuthProvider,
{
    fn authorization_url(&self) -> String {
        self.provider.authorization_url()
    }

    #[tracing::instrument(name = "Complete Gmail authorization", skip(self, code))]
    async fn complete_authorization(
        &self,
        code: Option<String>,
    ) -> Result<OAuth2Token, AuthorizationError> {
        let code = AuthorizationCode::parse(code).ok_or(AuthorizationError::MissingCode)?;
        let token = self.provider.exchange_code(&code).await?;
        if token.refresh_token.is_none() {
            tracing::warn!("Token endpoint did not return a refresh token");
        }
        Ok(token)
    }
}
