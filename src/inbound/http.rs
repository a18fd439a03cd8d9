use crate::configuration::ApplicationSettings;
use crate::domain::gmail_auth::ports::GmailAuthService;
use crate::domain::registration::ports::RegistrationService;
use crate::inbound::http::errors::AppError;
use crate::inbound::http::handlers::{authorize, callback, health_check, register};
use crate::inbound::http::state::{SharedGmailAuthState, SharedRegistrationState};
use actix_web::dev::Server;
use actix_web::{web, App, HttpServer};
use std::net::TcpListener;
use tracing_actix_web::TracingLogger;

mod errors;
mod handlers;
pub mod state;

/// Turns body decoding failures into the JSON error envelope instead of
/// actix's plain text answer.
fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .error_handler(|error, _req| AppError::MalformedBody(error.to_string()).into())
}

fn gmail_auth_routes<GS: GmailAuthService>(cfg: &mut web::ServiceConfig) {
    cfg.route("/api/gmail/auth", web::get().to(authorize::<GS>))
        .route("/api/gmail/callback", web::get().to(callback::<GS>));
}

fn run<RS: RegistrationService, GS: GmailAuthService>(
    listener: TcpListener,
    registration_state: SharedRegistrationState<RS>,
    gmail_auth_state: SharedGmailAuthState<GS>,
) -> Result<Server, std::io::Error> {
    let registration_state = web::Data::new(registration_state);
    let gmail_auth_state = web::Data::new(gmail_auth_state);

    let server = HttpServer::new(move || {
        App::new()
            .wrap(TracingLogger::default())
            .app_data(json_config())
            .route("/health_check", web::get().to(health_check))
            .app_data(registration_state.clone())
            .route("/api/register", web::post().to(register::<RS>))
            .app_data(gmail_auth_state.clone())
            .configure(gmail_auth_routes::<GS>)
    })
    .listen(listener)?
    .run();

    Ok(server)
}

fn bind(configuration: &ApplicationSettings) -> Result<(TcpListener, u16), std::io::Error> {
    let address = format!("{}:{}", configuration.host, configuration.port);
    let listener = TcpListener::bind(address)?;
    let port = listener.local_addr()?.port();
    Ok((listener, port))
}

pub struct Application {
    port: u16,
    server: Server,
}

impl Application {
    pub async fn build<RS: RegistrationService, GS: GmailAuthService>(
        registration_service: RS,
        gmail_auth_service: GS,
        configuration: &ApplicationSettings,
    ) -> Result<Self, std::io::Error> {
        let (listener, port) = bind(configuration)?;

        let registration_state = SharedRegistrationState::new(registration_service);
        let gmail_auth_state = SharedGmailAuthState::new(gmail_auth_service);

        let server = run(listener, registration_state, gmail_auth_state)?;

        Ok(Self { port, server })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub async fn run_until_stopped(self) -> Result<(), std::io::Error> {
        self.server.await
    }
}

/// Serves only the Gmail OAuth2 routes and the health check. Used to obtain
/// the first refresh token, before the mail transport can be configured.
pub struct AuthorizationApplication {
    port: u16,
    server: Server,
}

impl AuthorizationApplication {
    pub async fn build<GS: GmailAuthService>(
        gmail_auth_service: GS,
        configuration: &ApplicationSettings,
    ) -> Result<Self, std::io::Error> {
        let (listener, port) = bind(configuration)?;
        let gmail_auth_state = web::Data::new(SharedGmailAuthState::new(gmail_auth_service));

        let server = HttpServer::new(move || {
            App::new()
                .wrap(TracingLogger::default())
                .route("/health_check", web::get().to(health_check))
                .app_data(gmail_auth_state.clone())
                .configure(gmail_auth_routes::<GS>)
        })
        .listen(listener)?
        .run();

        Ok(Self { port, server })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub async fn run_until_stopped(self) -> Result<(), std::io::Error> {
        self.server.await
    }
}
