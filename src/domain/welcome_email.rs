pub mod composer;
pub mod models;
pub mod ports;
