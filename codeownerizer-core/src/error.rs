//! Error types for codeownerizer-core.

use std::path::PathBuf;

use thiserror::Error;

/// Errors from parsing domain values.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A repository reference was not of the form `<org>/<repo>`.
    #[error("invalid repository '{value}'; expected <org>/<repo>")]
    InvalidRepoRef { value: String },
}

/// Errors surfaced by a [`crate::platform::PlatformApi`] implementation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlatformError {
    /// The request never produced an HTTP response (DNS, TLS, timeout...).
    #[error("transport error calling {url}: {message}")]
    Transport { url: String, message: String },

    /// The platform answered with a non-success status.
    #[error("{url} returned HTTP {status}: {message}")]
    Status {
        status: u16,
        url: String,
        message: String,
    },

    /// The response body could not be decoded.
    #[error("failed to decode response from {url}: {message}")]
    Decode { url: String, message: String },

    /// A paginated listing handed back a cursor it had already returned.
    #[error("pagination loop detected while listing {what}: cursor '{cursor}' repeated")]
    PaginationLoop { what: &'static str, cursor: String },
}

impl PlatformError {
    /// HTTP status code, when the platform answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            PlatformError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// All errors that can arise from settings file operations.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// Underlying I/O failure, with the path involved.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// YAML serialization error (save path).
    #[error("YAML serialization error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// YAML parse error on load, with file path and line context from serde_yaml.
    #[error("failed to parse settings at {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    /// `dirs::home_dir()` returned `None`.
    #[error("cannot determine home directory; set $HOME or equivalent")]
    HomeNotFound,
}

pub(crate) fn io_err(path: impl Into<PathBuf>, source: std::io::Error) -> SettingsError {
    SettingsError::Io {
        path: path.into(),
        source,
    }
}
