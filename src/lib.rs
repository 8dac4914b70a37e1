pub mod cli;
pub mod config;
pub mod error;
pub mod questionnaire;
pub mod telemetry;
