pub mod db;
pub mod gmail;
pub mod queue;
pub mod telemetry;
