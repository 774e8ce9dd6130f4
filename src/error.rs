//! Error types for reddit-things
//!
//! This module defines the error hierarchy for the entire crate.
//! All public APIs return `Result<T, Error>` where Error is defined here.

use crate::http::RequestOptions;
use thiserror::Error;

/// The main error type for reddit-things
#[derive(Error, Debug)]
pub enum Error {
    // ============================================================================
    // Configuration Errors
    // ============================================================================
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    JsonParse(#[from] serde_json::Error),

    // ============================================================================
    // HTTP Errors
    // ============================================================================
    /// A single logical API call failed. Never retried by the client.
    #[error("Request for '{path}' failed: {source}")]
    RequestFailed {
        path: String,
        options: RequestOptions,
        #[source]
        source: Box<Error>,
    },

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP {status}: {body}")]
    HttpStatus { status: u16, body: String },

    // ============================================================================
    // Thing Errors
    // ============================================================================
    #[error("Expected a listing from '{path}', got {found}")]
    NotAListing { path: String, found: String },

    // ============================================================================
    // I/O Errors
    // ============================================================================
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create an HTTP status error
    pub fn http_status(status: u16, body: impl Into<String>) -> Self {
        Self::HttpStatus {
            status,
            body: body.into(),
        }
    }

    /// Wrap a cause into a failed request for `path`
    pub fn request_failed(path: impl Into<String>, options: RequestOptions, cause: Error) -> Self {
        Self::RequestFailed {
            path: path.into(),
            options,
            source: Box::new(cause),
        }
    }

    /// Create a not-a-listing error
    pub fn not_a_listing(path: impl Into<String>, found: impl Into<String>) -> Self {
        Self::NotAListing {
            path: path.into(),
            found: found.into(),
        }
    }

    /// HTTP status code behind this error, if the server answered at all
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::HttpStatus { status, .. } => Some(*status),
            Error::Http(e) => e.status().map(|s| s.as_u16()),
            Error::RequestFailed { source, .. } => source.status(),
            _ => None,
        }
    }
}

/// Result type alias for reddit-things
pub type Result<T> = std::result::Result<T, Error>;
