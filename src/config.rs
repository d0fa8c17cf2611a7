use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;
use thiserror::Error;
use crate::core::{ArtifactError, EncodingMode};

/// Anything that stops the service from starting
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Artifact error: {0}")]
    Artifact(#[from] ArtifactError),
}

/// Application configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub artifacts: ArtifactSettings,
    #[serde(default)]
    pub encoder: EncoderSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    pub workers: Option<usize>,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            workers: None,
        }
    }
}

fn default_host() -> String { "0.0.0.0".to_string() }
fn default_port() -> u16 { 8000 }

/// Locations of the three model artifacts
#[derive(Debug, Clone, Deserialize)]
pub struct ArtifactSettings {
    #[serde(default = "default_model_path")]
    pub model_path: String,
    #[serde(default = "default_scaler_path")]
    pub scaler_path: String,
    #[serde(default = "default_schema_path")]
    pub schema_path: String,
}

impl Default for ArtifactSettings {
    fn default() -> Self {
        Self {
            model_path: default_model_path(),
            scaler_path: default_scaler_path(),
            schema_path: default_schema_path(),
        }
    }
}

impl ArtifactSettings {
    /// All three artifacts under one directory, with their default file names
    pub fn in_dir<P: AsRef<Path>>(dir: P) -> Self {
        let dir = dir.as_ref();
        Self {
            model_path: dir.join(MODEL_FILE).display().to_string(),
            scaler_path: dir.join(SCALER_FILE).display().to_string(),
            schema_path: dir.join(SCHEMA_FILE).display().to_string(),
        }
    }
}

const MODEL_FILE: &str = "churn_logistic_model.json";
const SCALER_FILE: &str = "scaler.json";
const SCHEMA_FILE: &str = "feature_columns.json";

fn default_model_path() -> String { format!("models/{}", MODEL_FILE) }
fn default_scaler_path() -> String { format!("models/{}", SCALER_FILE) }
fn default_schema_path() -> String { format!("models/{}", SCHEMA_FILE) }

#[derive(Debug, Clone, Default, Deserialize)]
pub struct EncoderSettings {
    /// Reject categories outside the trained vocabulary instead of zero-filling
    #[serde(default)]
    pub strict: bool,
}

impl EncoderSettings {
    pub fn mode(&self) -> EncodingMode {
        if self.strict {
            EncodingMode::Strict
        } else {
            EncodingMode::Lenient
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "json".to_string() }

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Local overrides (config/local.toml)
    /// 4. Environment variables (prefixed with CHURN__)
    /// 5. MODEL_DIR, which relocates all three artifacts at once
    pub fn load() -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g., CHURN__SERVER__PORT -> server.port
            .add_source(
                Environment::with_prefix("CHURN")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let settings = substitute_model_dir(settings, std::env::var("MODEL_DIR").ok())?;

        settings.try_deserialize()
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(
                Environment::with_prefix("CHURN")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings.try_deserialize()
    }
}

/// Point every artifact path at `model_dir` when it is set
fn substitute_model_dir(settings: Config, model_dir: Option<String>) -> Result<Config, ConfigError> {
    let Some(dir) = model_dir else {
        return Ok(settings);
    };

    let paths = ArtifactSettings::in_dir(&dir);
    Config::builder()
        .add_source(settings)
        .set_override("artifacts.model_path", paths.model_path)?
        .set_override("artifacts.scaler_path", paths.scaler_path)?
        .set_override("artifacts.schema_path", paths.schema_path)?
        .build()
}
