use crate::questionnaire::export::ExportFormat;
use std::env;
use std::fmt;
use std::path::PathBuf;

/// Distinguishes runtime behavior for different stages of the tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "dev" | "development" => Some(Self::Development),
            "prod" | "production" => Some(Self::Production),
            "test" | "ci" => Some(Self::Test),
            _ => None,
        }
    }
}

/// Top-level configuration for the questionnaire tool.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub export: ExportConfig,
    pub telemetry: TelemetryConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = match env::var("APP_ENV") {
            Ok(value) => AppEnvironment::parse(&value)
                .ok_or(ConfigError::InvalidEnvironment { value })?,
            Err(_) => AppEnvironment::Development,
        };

        let output_dir = env::var("APP_OUTPUT_DIR").unwrap_or_else(|_| ".".to_string());
        if output_dir.trim().is_empty() {
            return Err(ConfigError::EmptyOutputDir);
        }

        let format = match env::var("APP_EXPORT_FORMAT") {
            Ok(value) => value
                .parse::<ExportFormat>()
                .map_err(|_| ConfigError::InvalidExportFormat { value })?,
            Err(_) => ExportFormat::default(),
        };

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "warn".to_string());

        Ok(Self {
            environment,
            export: ExportConfig {
                output_dir: PathBuf::from(output_dir),
                format,
            },
            telemetry: TelemetryConfig { log_level },
        })
    }
}

/// Where and how results are written when the user saves them.
#[derive(Debug, Clone)]
pub struct ExportConfig {
    pub output_dir: PathBuf,
    pub format: ExportFormat,
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidEnvironment { value: String },
    EmptyOutputDir,
    InvalidExportFormat { value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidEnvironment { value } => write!(
                f,
                "APP_ENV must be development, test or production, got '{value}'"
            ),
            ConfigError::EmptyOutputDir => write!(f, "APP_OUTPUT_DIR must not be empty"),
            ConfigError::InvalidExportFormat { value } => {
                write!(f, "APP_EXPORT_FORMAT must be json or csv, got '{value}'")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::{Mutex, OnceLock};

    fn env_guard() -> &'static Mutex<()> {
        static GUARD: OnceLock<Mutex<()>> = OnceLock::new();
        GUARD.get_or_init(|| Mutex::new(()))
    }

    fn reset_env() {
        env::remove_var("APP_ENV");
        env::remove_var("APP_OUTPUT_DIR");
        env::remove_var("APP_EXPORT_FORMAT");
        env::remove_var("APP_LOG_LEVEL");
    }

    #[test]
    fn load_uses_defaults_when_env_missing() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        let config = AppConfig::load().expect("config loads with defaults");
        assert_eq!(config.environment, AppEnvironment::Development);
        assert_eq!(config.export.output_dir, PathBuf::from("."));
        assert_eq!(config.export.format, ExportFormat::Json);
        assert_eq!(config.telemetry.log_level, "warn");
    }

    #[test]
    fn reads_export_settings() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("APP_ENV", "ci");
        env::set_var("APP_OUTPUT_DIR", "results");
        env::set_var("APP_EXPORT_FORMAT", "CSV");
        let config = AppConfig::load().expect("config loads");
        reset_env();

        assert_eq!(config.environment, AppEnvironment::Test);
        assert_eq!(config.export.output_dir, PathBuf::from("results"));
        assert_eq!(config.export.format, ExportFormat::Csv);
    }

    #[test]
    fn rejects_unknown_environment() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("APP_ENV", "staging");
        let error = AppConfig::load().expect_err("staging is not a known environment");
        reset_env();

        assert!(matches!(
            error,
            ConfigError::InvalidEnvironment { ref value } if value == "staging"
        ));
    }

    #[test]
    fn rejects_unknown_export_format() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("APP_EXPORT_FORMAT", "xml");
        let error = AppConfig::load().expect_err("xml is not supported");
        reset_env();

        assert!(matches!(
            error,
            ConfigError::InvalidExportFormat { ref value } if value == "xml"
        ));
    }
}
