//! Error types for the attendance admin client
//!
//! Every failure the accounts flows can hit is one of three things from the
//! user's point of view: the request never got a response, the server said
//! no, or the input was rejected locally. The variants below keep enough
//! detail to tell those apart in logs while the screen layer turns all of
//! them into a short notice.
//!
//! # Error Categories
//!
//! - **Transport**: no response (connection refused, timeout, DNS)
//! - **Status**: non-success HTTP status, with the server's `message` if any
//! - **Validation**: local input rejected before any request is made
//! - **Setup**: configuration, I/O and CSV output problems in the binary

use thiserror::Error;

/// Main error type for the attendance admin client
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ClientError {
    /// The request did not produce a response
    #[error("Network error: {message}")]
    Transport {
        /// Description from the HTTP stack
        message: String,
    },

    /// The server answered with a non-success status
    #[error("HTTP {status}{}", .message.as_ref().map(|m| format!(": {}", m)).unwrap_or_default())]
    Status {
        /// HTTP status code
        status: u16,
        /// `message` field of the error body, when present
        message: Option<String>,
    },

    /// The response body could not be decoded
    #[error("Invalid response body: {message}")]
    Decode {
        /// Description of the decoding failure
        message: String,
    },

    /// Local input was rejected; no request was made
    #[error("{message}")]
    Validation {
        /// User-facing explanation
        message: String,
    },

    /// The owning screen was torn down while the request was in flight
    #[error("Request cancelled")]
    Cancelled,

    /// The operation requires a logged-in session with a different role
    #[error("Not authenticated as {required}")]
    NotAuthenticated {
        /// Role that was required
        required: String,
    },

    /// The client configuration is unusable
    #[error("Configuration error: {message}")]
    Config {
        /// Description of the problem
        message: String,
    },

    /// I/O error while reading config or writing output
    #[error("I/O error: {message}")]
    Io {
        /// Description of the I/O error
        message: String,
    },

    /// CSV output error
    #[error("CSV error: {message}")]
    Csv {
        /// Description of the CSV error
        message: String,
    },
}

impl From<std::io::Error> for ClientError {
    fn from(error: std::io::Error) -> Self {
        ClientError::Io {
            message: error.to_string(),
        }
    }
}

impl From<csv::Error> for ClientError {
    fn from(error: csv::Error) -> Self {
        ClientError::Csv {
            message: error.to_string(),
        }
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_decode() {
            ClientError::Decode {
                message: error.to_string(),
            }
        } else if let Some(status) = error.status() {
            ClientError::Status {
                status: status.as_u16(),
                message: None,
            }
        } else {
            ClientError::Transport {
                message: error.to_string(),
            }
        }
    }
}

impl From<toml::de::Error> for ClientError {
    fn from(error: toml::de::Error) -> Self {
        ClientError::Config {
            message: error.to_string(),
        }
    }
}

impl ClientError {
    /// Create a Transport error
    pub fn transport(message: impl Into<String>) -> Self {
        ClientError::Transport {
            message: message.into(),
        }
    }

    /// Create a Status error
    pub fn status(status: u16, message: Option<String>) -> Self {
        ClientError::Status { status, message }
    }

    /// Create a Validation error
    pub fn validation(message: impl Into<String>) -> Self {
        ClientError::Validation {
            message: message.into(),
        }
    }

    /// Create a Config error
    pub fn config(message: impl Into<String>) -> Self {
        ClientError::Config {
            message: message.into(),
        }
    }

    /// Create a NotAuthenticated error
    pub fn not_authenticated(required: &str) -> Self {
        ClientError::NotAuthenticated {
            required: required.to_string(),
        }
    }

    /// Server-provided message, for Status errors that carried one
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ClientError::Status {
                message: Some(message),
                ..
            } => Some(message),
            _ => None,
        }
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, ClientError::Cancelled)
    }
}
