use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error(
        "Config file not found. Looked in:\n\
        - current directory: frontstack.local.kdl, .frontstack.local.kdl, frontstack.kdl, .frontstack.kdl\n\
        - ./.frontstack/ directory\n\
        - ~/.config/frontstack/frontstack.kdl\n\
        Set FRONTSTACK_CONFIG to point at a file directly"
    )]
    ConfigFileNotFound,

    #[error("Config file does not exist: {0}")]
    NotFound(PathBuf),

    #[error("KDL parse error: {0}")]
    KdlParse(#[from] kdl::KdlError),

    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("Invalid value for '{field}': {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ConfigError>;
