//! Error types for the briefing view-model layer
//!
//! The shaping functions never fail. Errors only arise at the edges:
//! - Snapshot decoding: malformed backend JSON
//! - Configuration: unreadable file, bad JSON, unknown timezone

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while decoding snapshots or loading configuration.
#[derive(Debug, Error)]
pub enum ViewModelError {
    #[error("Failed to decode {what}: {source}")]
    Json {
        what: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Home directory not found")]
    HomeDirNotFound,

    #[error("Invalid timezone: {0}")]
    InvalidTimezone(String),
}

impl ViewModelError {
    pub(crate) fn json(what: &'static str, source: serde_json::Error) -> Self {
        ViewModelError::Json { what, source }
    }

    /// Returns true if the error came from bad input data rather than the
    /// local environment.
    pub fn is_data_error(&self) -> bool {
        matches!(
            self,
            ViewModelError::Json { .. } | ViewModelError::InvalidTimezone(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, ViewModelError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_errors_are_data_errors() {
        let source = serde_json::from_str::<u32>("nope").unwrap_err();
        let err = ViewModelError::json("focus data", source);
        assert!(err.is_data_error());
        assert!(err.to_string().starts_with("Failed to decode focus data"));
    }

    #[test]
    fn home_dir_is_environment_error() {
        assert!(!ViewModelError::HomeDirNotFound.is_data_error());
    }
}
