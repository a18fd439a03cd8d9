use anyhow::Context;
use signup_mailer::configuration::get_configuration;
use signup_mailer::domain::gmail_auth::service::GmailAuthorization;
use signup_mailer::domain::registration::service::Registration;
use signup_mailer::domain::welcome_email::composer::WelcomeEmailComposer;
use signup_mailer::inbound::http::Application;
use signup_mailer::outbound::db::postgres_db::PostgresDb;
use signup_mailer::outbound::gmail::{gmail_client::GmailClient, google_oauth::GoogleOAuthClient};
use signup_mailer::outbound::queue::welcome_queue::WelcomeEmailQueue;
use signup_mailer::outbound::telemetry::init_logger;
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let configuration = get_configuration().context("Failed to read configuration")?;
    init_logger("signup_mailer", &configuration.log_level(), std::io::stdout);

    let gmail_client = GmailClient::new(&configuration.gmail)
        .context("Gmail is not configured. Run gmail_authorize to obtain a refresh token")?;
    let oauth_client = GoogleOAuthClient::new(&configuration.gmail)?;
    let composer = WelcomeEmailComposer::new(
        &configuration.application.app_name,
        &configuration.application.base_url,
    )?;

    let (welcome_queue, worker) =
        WelcomeEmailQueue::start(Arc::new(gmail_client), composer, &configuration.queue);
    let user_repo = PostgresDb::new(&configuration.database);

    let registration_service = Registration::new(Arc::new(user_repo), Arc::new(welcome_queue));
    let gmail_auth_service = GmailAuthorization::new(Arc::new(oauth_client));

    let application = Application::build(
        registration_service,
        gmail_auth_service,
        &configuration.application,
    )
    .await?;
    let application_task = tokio::spawn(application.run_until_stopped());

    tokio::select! {
        outcome = application_task => match outcome {
            Ok(Ok(())) => tracing::info!("API has exited"),
            Ok(Err(e)) => tracing::error!(error.cause_chain = ?e, error.message = %e, "API failed"),
            Err(e) => tracing::error!(error.cause_chain = ?e, error.message = %e, "API task failed to complete"),
        },
        outcome = worker => if let Err(e) = outcome {
            tracing::error!(error.cause_chain = ?e, error.message = %e, "Welcome email worker failed to complete");
        },
    }
    Ok(())
}
