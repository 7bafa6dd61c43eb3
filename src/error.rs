// Error types shared by the library modules. The binary wraps these in
// `anyhow::Error`, so callers that care about the kind can downcast.

use std::path::PathBuf;
use thiserror::Error;

/// Failures while locating or reading the credentials file.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("could not determine the home directory")]
    NoHomeDir,

    #[error("config file {} does not exist", path.display())]
    MissingFile { path: PathBuf },

    #[error("could not read config file {}", path.display())]
    Unreadable {
        path: PathBuf,
        #[source]
        source: ::config::ConfigError,
    },

    #[error("missing api_key in [pastery] section of {}", path.display())]
    MissingKey { path: PathBuf },
}

/// Failures of a single upload. None of these are retried.
#[derive(Error, Debug)]
pub enum UploadError {
    #[error("failed to read input from {origin}")]
    InputRead {
        origin: String,
        #[source]
        source: std::io::Error,
    },

    #[error("request to {endpoint} failed")]
    Transport {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("unexpected response from pastery: {reason}")]
    ResponseFormat { reason: String },
}
