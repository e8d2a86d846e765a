//! Common error types for door-control.
//!
//! This module provides a centralized Error enum using thiserror, with
//! conversions from underlying error types used throughout the crate, plus
//! the narrower [`SendError`] that a single command invocation can end in.

use thiserror::Error;

/// Main error type for door-control setup operations.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O errors from tokio or std
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Malformed configuration file
    #[error("Configuration file error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// HTTP client construction errors
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),
}

/// Convenience type alias for Results using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Why a single command invocation failed.
///
/// The `Display` output is exactly what follows `"✗ Error: "` on the status
/// line: the bare status code, or the transport failure description.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SendError {
    /// A response arrived, but with a status outside 2xx.
    #[error("{0}")]
    Status(u16),

    /// The request never completed (unreachable, DNS, timeout).
    #[error("{0}")]
    Transport(String),
}

impl SendError {
    /// Build a transport error from a reqwest failure, keeping the source
    /// chain so the root cause (e.g. "Connection refused") stays visible.
    pub fn from_transport(err: &reqwest::Error) -> Self {
        let mut message = err.to_string();
        let mut source = std::error::Error::source(err);
        while let Some(cause) = source {
            message.push_str(": ");
            message.push_str(&cause.to_string());
            source = std::error::Error::source(cause);
        }
        SendError::Transport(message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_displays_bare_code() {
        assert_eq!(SendError::Status(500).to_string(), "500");
        assert_eq!(SendError::Status(404).to_string(), "404");
    }

    #[test]
    fn transport_displays_message() {
        let err = SendError::Transport("network down".into());
        assert_eq!(err.to_string(), "network down");
    }

    #[test]
    fn config_error_message() {
        let err = Error::Config("bad url".into());
        assert_eq!(err.to_string(), "Configuration error: bad url");
    }
}
