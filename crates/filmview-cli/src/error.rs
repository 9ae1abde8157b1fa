use thiserror::Error;

use filmview_core::Error as CoreError;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("core error: {0}")]
    Core(#[from] CoreError),
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json serialization error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("config file {path}: {source}")]
    ConfigParse {
        path: String,
        #[source]
        source: toml::de::Error,
    },
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("logging error: {0}")]
    Logging(String),
}

pub type CliResult<T> = std::result::Result<T, CliError>;
