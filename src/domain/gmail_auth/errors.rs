#[derive(thiserror::Error, Debug)]
pub enum AuthorizationError {
    #[error("Authorization code not provided")]
    MissingCode,
    #[error("{0}")]
    ExchangeFailed(String),
    #[error(transparent)]
    Unexpected(#[from] anyhow::Error),
}
