//! Core error types

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StackError {
    #[error("Invalid prefix '{prefix}': {reason}")]
    InvalidPrefix { prefix: String, reason: String },

    #[error("Duplicate logical id: {0}")]
    DuplicateLogicalId(String),

    #[error("Duplicate output: {0}")]
    DuplicateOutput(String),

    #[error("Malformed resource '{logical_id}': {message}")]
    MalformedResource { logical_id: String, message: String },

    #[error("Unsupported template format: {0}")]
    UnsupportedFormat(String),

    #[error("Template read error: {path}\nReason: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, StackError>;
