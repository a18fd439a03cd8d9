pub mod gmail_auth;
pub mod health_check;
pub mod register;

pub use gmail_auth::{authorize, callback};
pub use health_check::health_check;
pub use register::register;
