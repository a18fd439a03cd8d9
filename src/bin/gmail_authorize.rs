use anyhow::Context;
use signup_mailer::configuration::get_configuration;
use signup_mailer::domain::gmail_auth::service::GmailAuthorization;
use signup_mailer::inbound::http::AuthorizationApplication;
use signup_mailer::outbound::gmail::google_oauth::GoogleOAuthClient;
use signup_mailer::outbound::telemetry::init_logger;
use std::sync::Arc;

/// Serves the OAuth2 consent flow so an operator can obtain the refresh token
/// the main binary needs.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let configuration = get_configuration().context("Failed to read configuration")?;
    init_logger("gmail_authorize", &configuration.log_level(), std::io::stdout);

    let oauth_client = GoogleOAuthClient::new(&configuration.gmail)?;
    let application = AuthorizationApplication::build(
        GmailAuthorization::new(Arc::new(oauth_client)),
        &configuration.application,
    )
    .await?;

    tracing::info!(
        port = application.port(),
        "Open /api/gmail/auth to start the Gmail authorization"
    );
    application.run_until_stopped().await?;
    Ok(())
}
