use secrecy::{ExposeSecret, Secret};
use serde_aux::field_attributes::deserialize_number_from_string;
use sqlx::postgres::{PgConnectOptions, PgSslMode};
use sqlx::ConnectOptions;
use std::convert::{TryFrom, TryInto};

#[derive(serde::Deserialize, Clone, Debug)]
pub struct Settings {
    pub database: DatabaseSettings,
    pub application: ApplicationSettings,
    pub gmail: GmailSettings,
    pub queue: QueueSettings,
    pub general: GeneralSettings,
}

impl Settings {
    pub fn log_level(&self) -> String {
        self.general.log_level.clone()
    }
}

#[derive(serde::Deserialize, Clone, Debug)]
pub struct GeneralSettings {
    pub log_level: String,
}

#[derive(serde::Deserialize, Clone, Debug)]
pub struct ApplicationSettings {
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub port: u16,
    pub host: String,
    pub base_url: String,
    pub app_name: String,
}

#[derive(serde::Deserialize, Clone, Debug)]
pub struct DatabaseSettings {
    pub username: String,
    pub password: Secret<String>,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub port: u16,
    pub host: String,
    pub database_name: String,
    pub require_ssl: bool,
}

impl DatabaseSettings {
    pub fn without_db(&self) -> PgConnectOptions {
        let ssl_mode = if self.require_ssl {
            PgSslMode::Require
        } else {
            PgSslMode::Prefer
        };
        PgConnectOptions::new()
            .host(&self.host)
            .username(&self.username)
            .password(self.password.expose_secret())
            .port(self.port)
            .ssl_mode(ssl_mode)
    }

    pub fn with_db(&self) -> PgConnectOptions {
        self.without_db()
            .database(&self.database_name)
            .log_statements(tracing_log::log::LevelFilter::Trace)
    }
}

/// Google OAuth2 client credentials plus the endpoints the Gmail transport talks to.
/// Endpoints are configurable so tests can point them at a mock server.
#[derive(serde::Deserialize, Clone, Debug)]
pub struct GmailSettings {
    #[serde(default)]
    pub client_id: String,
    #[serde(default = "empty_secret")]
    pub client_secret: Secret<String>,
    pub redirect_uri: String,
    #[serde(default)]
    pub refresh_token: Option<Secret<String>>,
    pub auth_url: String,
    pub token_url: String,
    pub api_base_url: String,
    pub timeout_milliseconds: u64,
}

impl GmailSettings {
    pub fn timeout(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.timeout_milliseconds)
    }

    /// Refresh token, treating an empty value as absent.
    pub fn refresh_token(&self) -> Option<&Secret<String>> {
        self.refresh_token
            .as_ref()
            .filter(|token| !token.expose_secret().trim().is_empty())
    }
}

fn empty_secret() -> Secret<String> {
    Secret::new(String::new())
}

#[derive(serde::Deserialize, Clone, Debug)]
pub struct QueueSettings {
    pub capacity: usize,
    pub max_attempts: u32,
    pub retry_delay_milliseconds: u64,
    pub max_concurrent_deliveries: usize,
}

impl QueueSettings {
    pub fn retry_delay(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.retry_delay_milliseconds)
    }
}

/// Plain environment variables an operator sets after the OAuth2 bootstrap,
/// mapped onto their configuration keys.
const GOOGLE_ENV_OVERRIDES: [(&str, &str); 4] = [
    ("GOOGLE_CLIENT_ID", "gmail.client_id"),
    ("GOOGLE_CLIENT_SECRET", "gmail.client_secret"),
    ("GOOGLE_REDIRECT_URI", "gmail.redirect_uri"),
    ("GOOGLE_REFRESH_TOKEN", "gmail.refresh_token"),
];

pub fn get_configuration() -> Result<Settings, config::ConfigError> {
    let environment: Environment = std::env::var("APP_ENVIRONMENT")
        .unwrap_or_else(|_| "local".into())
        .try_into()
        .map_err(config::ConfigError::Message)?;
    get_configuration_for(environment)
}

/// Loads `configuration/base` and the given environment's file from the current directory,
/// then applies the environment variable overrides.
pub fn get_configuration_for(environment: Environment) -> Result<Settings, config::ConfigError> {
    let mut settings = config::Config::default();
    let base_path = std::env::current_dir().map_err(|e| {
        config::ConfigError::Message(format!("Failed to determine the current directory: {}", e))
    })?;
    let configuration_directory = base_path.join("configuration");

    settings.merge(config::File::from(configuration_directory.join("base")).required(true))?;
    settings.merge(
        config::File::from(configuration_directory.join(environment.as_str())).required(true),
    )?;

    // e.g. `APP_APPLICATION__PORT=5001` sets `Settings.application.port`
    settings.merge(config::Environment::with_prefix("app").separator("__"))?;

    for (variable, key) in GOOGLE_ENV_OVERRIDES {
        if let Ok(value) = std::env::var(variable) {
            settings.set(key, value)?;
        }
    }

    settings.try_into()
}

pub enum Environment {
    Local,
    Production,
}

impl Environment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Local => "local",
            Environment::Production => "production",
        }
    }
}

impl TryFrom<String> for Environment {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        match s.to_lowercase().as_str() {
            "local" => Ok(Self::Local),
            "production" => Ok(Self::Production),
            other => Err(format!(
                "{} is not a supported environment. Use either `local` or `production`.",
                other
            )),
        }
    }
}
