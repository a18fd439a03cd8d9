pub mod gmail_auth;
pub mod registration;
pub mod welcome_email;
