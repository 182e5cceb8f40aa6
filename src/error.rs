use std::path::PathBuf;

use thiserror::Error;

/// Problems with the contents of a shot file. IO and decoder errors are
/// attached as `anyhow` context by the loader.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("row {row}: malformed location '{text}': {reason}")]
    Location {
        row: usize,
        text: String,
        reason: String,
    },

    #[error("missing required column '{0}'")]
    MissingColumn(&'static str),

    #[error("unsupported file extension: .{0}")]
    UnsupportedExtension(String),
}

#[derive(Debug, Error)]
pub enum SecretsError {
    #[error("failed to read secrets file {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid secrets file {path}: {source}")]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
}
