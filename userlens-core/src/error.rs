//! Error types for userlens-core

use thiserror::Error;

/// Main error type for the userlens-core library
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration error (bad write code, timeout, URL or config file)
    #[error("configuration error: {0}")]
    Config(String),

    /// A required call argument was missing or empty
    #[error("{0}")]
    InvalidInput(String),

    /// Network-level failure talking to the ingestion endpoint
    #[error("request error: {0}")]
    Transport(String),

    /// Request did not complete within the configured timeout
    #[error("request timed out after {0}s")]
    Timeout(u64),

    /// Ingestion endpoint answered with something other than 200
    #[error("{}", api_error_message(.status, .body))]
    Api {
        status: u16,
        /// Parsed JSON error body, if the body was valid JSON
        body: Option<serde_json::Value>,
    },
}

fn api_error_message(status: &u16, body: &Option<serde_json::Value>) -> String {
    match body {
        Some(body) => format!("API error ({}): {}", status, body),
        None => format!(
            "API error ({}): response body was not valid JSON",
            status
        ),
    }
}

/// Result type alias for userlens-core
pub type Result<T> = std::result::Result<T, Error>;
