pub mod email;
pub mod name;
pub mod password;
pub mod user;
pub mod validation;
