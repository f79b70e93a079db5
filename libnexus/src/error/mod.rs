//! Error types for libnexus
//!
//! Every operation returns one of a small, closed set of error kinds so that
//! callers can branch on the kind instead of parsing messages.

use std::path::{Path, PathBuf};
use thiserror::Error;


/// Main error type for libnexus operations
#[derive(Error, Debug)]
pub enum NexusError {
    /// The configuration file does not exist.
    #[error(
        "Configuration not found at {} - please run 'nexus-cli configure'",
        .path.display()
    )]
    ConfigNotFound { path: PathBuf },

    /// The configuration file exists but could not be read or decoded.
    #[error("Failed to parse configuration{}", describe_path(.path.as_deref()))]
    ConfigParse {
        path: Option<PathBuf>,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Connection-level failures (DNS, refused connection, broken body stream)
    #[error("Transport error: {message}")]
    Transport {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// The registry answered with a status other than the one the operation expects.
    #[error("HTTP Code: {status} ({url})")]
    HttpStatus { status: u16, url: String },

    /// A success response carried a body that is not the expected JSON.
    #[error("Decode error: {message}")]
    Decode {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// The manifest response had no usable `docker-content-digest` header.
    #[error("Registry returned no content digest for {image}:{tag}")]
    MissingDigest { image: String, tag: String },

    /// Invalid input (empty host, empty image name, malformed digest)
    #[error("Validation error: {message}")]
    Validation { message: String },
}

/// Result type alias for libnexus operations
pub type Result<T> = std::result::Result<T, NexusError>;

fn describe_path(path: Option<&Path>) -> String {
    match path {
        Some(p) => format!(" at {}", p.display()),
        None => String::new(),
    }
}

impl NexusError {
    /// Creates a new config-not-found error.
    ///
    /// # Examples
    ///
    /// ```
    /// use libnexus::error::NexusError;
    ///
    /// let err = NexusError::config_not_found("/home/me/.nexus-cli");
    /// assert!(err.to_string().contains("nexus-cli configure"));
    /// ```
    pub fn config_not_found<P: Into<PathBuf>>(path: P) -> Self {
        Self::ConfigNotFound { path: path.into() }
    }

    /// Creates a new config parse error with its underlying cause.
    pub fn config_parse<E>(path: Option<PathBuf>, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::ConfigParse {
            path,
            source: Box::new(source),
        }
    }

    /// Creates a new transport error with a source error.
    ///
    /// # Examples
    ///
    /// ```
    /// use libnexus::error::NexusError;
    ///
    /// let io_err = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "refused");
    /// let err = NexusError::transport_with_source("connection refused", io_err);
    /// assert!(matches!(err, NexusError::Transport { .. }));
    /// ```
    pub fn transport_with_source<S, E>(message: S, source: E) -> Self
    where
        S: Into<String>,
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Transport {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Creates a new unexpected-status error.
    ///
    /// # Examples
    ///
    /// ```
    /// use libnexus::error::NexusError;
    ///
    /// let err = NexusError::http_status(404, "http://nexus/repository/docker/v2/_catalog");
    /// assert_eq!(err.status_code(), Some(404));
    /// ```
    pub fn http_status<S: Into<String>>(status: u16, url: S) -> Self {
        Self::HttpStatus {
            status,
            url: url.into(),
        }
    }

    /// Creates a new decode error with a source error.
    pub fn decode_with_source<S, E>(message: S, source: E) -> Self
    where
        S: Into<String>,
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Decode {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Creates a new missing-digest error.
    pub fn missing_digest<S: Into<String>>(image: S, tag: S) -> Self {
        Self::MissingDigest {
            image: image.into(),
            tag: tag.into(),
        }
    }

    /// Creates a new validation error.
    ///
    /// # Examples
    ///
    /// ```
    /// use libnexus::error::NexusError;
    ///
    /// let err = NexusError::validation("image name cannot be empty");
    /// assert!(matches!(err, NexusError::Validation { .. }));
    /// ```
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Returns the HTTP status code carried by an [`NexusError::HttpStatus`] error.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::HttpStatus { status, .. } => Some(*status),
            _ => None,
        }
    }
}
