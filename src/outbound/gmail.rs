pub mod gmail_client;
pub mod google_oauth;

#[derive(thiserror::Error, Debug)]
pub enum ConfigurationError {
    #[error("Missing Google credential: {0}")]
    MissingCredential(&'static str),
    #[error("Invalid Google endpoint URL: {0}")]
    InvalidUrl(String),
    #[error(transparent)]
    Unexpected(#[from] anyhow::Error),
}
