use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ConfigError>;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid config file {}: {message}", path.display())]
    Invalid { path: PathBuf, message: String },

    #[error("Unsupported config file format: {}", .0.display())]
    UnsupportedFormat(PathBuf),
}
