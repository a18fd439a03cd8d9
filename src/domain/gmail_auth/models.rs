use secrecy::Secret;

pub const GMAIL_SEND_SCOPE: &str = "https://www.googleapis.com/auth/gmail.send";

#[derive(Debug, serde::Deserialize)]
pub struct AuthorizationCallback {
    pub code: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AuthorizationCode(String);

impl AuthorizationCode {
    pub fn parse(code: Option<String>) -> Option<AuthorizationCode> {
        code.filter(|c| !c.trim().is_empty()).map(Self)
    }
}

impl AsRef<str> for AuthorizationCode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Token set returned by the provider's token endpoint. Only ever held in
/// memory; the refresh token is handed to the operator to store by hand.
#[derive(Debug, serde::Deserialize)]
pub struct OAuth2Token {
    pub access_token: Secret<String>,
    #[serde(default)]
    pub refresh_token: Option<Secret<String>>,
    #[serde(default)]
    pub expires_in: Option<u64>,
    #[serde(default)]
    pub scope: Option<String>,
    #[serde(default)]
    pub token_type: Option<String>,
}
