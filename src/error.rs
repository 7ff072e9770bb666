//! Error types for the Faith Hub relay
//!
//! Provides structured error handling with:
//! - Numeric error codes for machine parsing
//! - HTTP status and JSON body mapping for the relay endpoints
//! - User-friendly messages with suggestions
//! - Exit codes for CLI

use std::fmt;
use std::path::PathBuf;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

/// Result type alias for relay operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error text returned to clients for any upstream problem
pub const UPSTREAM_ERROR: &str = "OpenAI API error";

/// Numeric error codes for machine parsing and documentation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u16)]
pub enum ErrorCode {
    // Configuration errors (1xx)
    ConfigNotFound = 100,
    ConfigParseError = 101,
    ConfigValidation = 102,

    // IO errors (2xx)
    IoRead = 200,
    IoWrite = 201,
    IoNotFound = 203,
    IoPermission = 202,

    // Network errors (3xx)
    BindFailed = 300,

    // Request errors (4xx)
    AccessDenied = 403,
    InvalidAssistant = 410,
    EmptyMessage = 411,

    // Upstream errors (5xx)
    UpstreamFailure = 500,
    UpstreamUnavailable = 501,

    // Persona errors (6xx)
    PersonaNotFound = 600,
    PersonaInvalid = 601,

    // Internal errors (9xx)
    InternalError = 900,
}

impl ErrorCode {
    /// Get the string code (e.g., "E100")
    pub fn as_str(&self) -> String {
        format!("E{}", *self as u16)
    }

    /// Get the exit code for CLI (maps to 1-125 range)
    pub fn exit_code(&self) -> i32 {
        match *self as u16 {
            100..=199 => 10, // Config errors
            200..=299 => 20, // IO errors
            300..=399 => 30, // Network errors
            400..=499 => 40, // Request errors
            500..=599 => 50, // Upstream errors
            600..=699 => 60, // Persona errors
            900..=999 => 90, // Internal errors
            _ => 1,
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Main error type for the relay
#[derive(Error, Debug)]
pub enum Error {
    // ─────────────────────────────────────────────────────────────
    // Configuration Errors
    // ─────────────────────────────────────────────────────────────

    /// Configuration file not found
    #[error("Configuration file not found: {path}")]
    ConfigNotFound { path: PathBuf },

    /// Configuration parse error
    #[error("Failed to parse configuration: {message}")]
    ConfigParse {
        message: String,
        #[source]
        source: Option<toml::de::Error>,
    },

    /// Configuration validation error
    #[error("Configuration validation failed: {message}")]
    ConfigValidation { message: String, field: Option<String> },

    /// Generic configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    // ─────────────────────────────────────────────────────────────
    // IO Errors
    // ─────────────────────────────────────────────────────────────

    /// File read error
    #[error("Failed to read file: {path}")]
    IoRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// File write error
    #[error("Failed to write file: {path}")]
    IoWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Generic IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML serialization error
    #[error("TOML serialization error: {0}")]
    Toml(#[from] toml::ser::Error),

    // ─────────────────────────────────────────────────────────────
    // Network Errors
    // ─────────────────────────────────────────────────────────────

    /// Listener could not be bound
    #[error("Failed to bind {addr}: {source}")]
    BindFailed {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    // ─────────────────────────────────────────────────────────────
    // Request Errors
    // ─────────────────────────────────────────────────────────────

    /// Wrong or missing access code
    #[error("Access denied. Please ask {operator} for the current access code.")]
    AccessDenied { operator: String },

    /// Assistant id not present in the persona registry
    #[error("Invalid assistantId")]
    InvalidAssistant { id: String },

    /// Message blank after trimming
    #[error("Empty message")]
    EmptyMessage,

    // ─────────────────────────────────────────────────────────────
    // Upstream Errors
    // ─────────────────────────────────────────────────────────────

    /// Completion API answered with a status other than 200
    #[error("OpenAI API error (status {status})")]
    UpstreamFailure { status: u16, body: String },

    /// Completion API could not be reached or timed out
    #[error("OpenAI API unreachable: {message}")]
    UpstreamUnavailable { message: String },

    // ─────────────────────────────────────────────────────────────
    // Persona Errors
    // ─────────────────────────────────────────────────────────────

    /// Persona not found
    #[error("Persona not found: {id}")]
    PersonaNotFound { id: String },

    /// Bundled persona definition is malformed
    #[error("Invalid persona {id}: {reason}")]
    PersonaInvalid { id: String, reason: String },

    // ─────────────────────────────────────────────────────────────
    // Internal Errors
    // ─────────────────────────────────────────────────────────────

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    // ─────────────────────────────────────────────────────────────
    // Error Classification
    // ─────────────────────────────────────────────────────────────

    /// Get the numeric error code
    pub fn code(&self) -> ErrorCode {
        match self {
            Error::ConfigNotFound { .. } => ErrorCode::ConfigNotFound,
            Error::ConfigParse { .. } => ErrorCode::ConfigParseError,
            Error::ConfigValidation { .. } => ErrorCode::ConfigValidation,
            Error::Config(_) => ErrorCode::ConfigValidation,

            Error::IoRead { .. } => ErrorCode::IoRead,
            Error::IoWrite { .. } => ErrorCode::IoWrite,
            Error::Io(e) => match e.kind() {
                std::io::ErrorKind::NotFound => ErrorCode::IoNotFound,
                std::io::ErrorKind::PermissionDenied => ErrorCode::IoPermission,
                _ => ErrorCode::IoRead,
            },
            Error::Toml(_) => ErrorCode::ConfigParseError,

            Error::BindFailed { .. } => ErrorCode::BindFailed,

            Error::AccessDenied { .. } => ErrorCode::AccessDenied,
            Error::InvalidAssistant { .. } => ErrorCode::InvalidAssistant,
            Error::EmptyMessage => ErrorCode::EmptyMessage,

            Error::UpstreamFailure { .. } => ErrorCode::UpstreamFailure,
            Error::UpstreamUnavailable { .. } => ErrorCode::UpstreamUnavailable,

            Error::PersonaNotFound { .. } => ErrorCode::PersonaNotFound,
            Error::PersonaInvalid { .. } => ErrorCode::PersonaInvalid,

            Error::Internal(_) => ErrorCode::InternalError,
        }
    }

    /// HTTP status this error is reported with
    pub fn status_code(&self) -> StatusCode {
        match self {
            Error::AccessDenied { .. } => StatusCode::FORBIDDEN,
            Error::InvalidAssistant { .. } | Error::EmptyMessage => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Whether the error was caused by the caller's input
    pub fn is_client_error(&self) -> bool {
        self.status_code().is_client_error()
    }

    /// Get the exit code for CLI
    pub fn exit_code(&self) -> i32 {
        self.code().exit_code()
    }

    /// The JSON body sent to HTTP clients.
    ///
    /// Upstream errors share one fixed `error` text; the upstream body (or the
    /// transport failure) travels verbatim in `details`.
    pub fn to_body(&self) -> ErrorBody {
        match self {
            Error::AccessDenied { .. } | Error::InvalidAssistant { .. } | Error::EmptyMessage => {
                ErrorBody {
                    error: self.to_string(),
                    details: None,
                }
            }
            Error::UpstreamFailure { body, .. } => ErrorBody {
                error: UPSTREAM_ERROR.to_string(),
                details: Some(body.clone()),
            },
            Error::UpstreamUnavailable { message } => ErrorBody {
                error: UPSTREAM_ERROR.to_string(),
                details: Some(message.clone()),
            },
            _ => ErrorBody {
                error: "Internal server error".to_string(),
                details: None,
            },
        }
    }

    // ─────────────────────────────────────────────────────────────
    // User-Friendly Messages
    // ─────────────────────────────────────────────────────────────

    /// Get a user-friendly suggestion for how to fix this error
    pub fn suggestion(&self) -> Option<&'static str> {
        match self {
            Error::ConfigNotFound { .. } => Some(
                "Run 'faith-hub config init' to create a default configuration file."
            ),
            Error::ConfigParse { .. } => Some(
                "Check your configuration file syntax. Run 'faith-hub config validate' to see details."
            ),
            Error::ConfigValidation { .. } => Some(
                "Review the configuration file and fix the invalid values."
            ),
            Error::BindFailed { .. } => Some(
                "Another process may already be using this port. Try '--port' with a free port."
            ),
            Error::UpstreamFailure { status: 401, .. } => Some(
                "The completion API rejected the credential. Check that OPENAI_API_KEY is set."
            ),
            Error::UpstreamUnavailable { .. } => Some(
                "Check network access to the completion API or raise 'openai.timeout_secs'."
            ),
            Error::PersonaNotFound { .. } => Some(
                "Run 'faith-hub persona list' to see the available assistants."
            ),
            _ => None,
        }
    }

    /// Format the error for terminal display with colors
    pub fn format_for_terminal(&self) -> String {
        let code = self.code();
        let suggestion = self.suggestion();

        let mut output = format!(
            "\x1b[31mError [{}]\x1b[0m: {}\n",
            code.as_str(),
            self
        );

        if let Some(hint) = suggestion {
            output.push_str(&format!("\n\x1b[33mHint\x1b[0m: {}\n", hint));
        }

        output
    }

    /// Format the error for logging (no colors)
    pub fn format_for_log(&self) -> String {
        format!("[{}] {}", self.code().as_str(), self)
    }
}

// ─────────────────────────────────────────────────────────────────
// Error Constructors (for ergonomic error creation)
// ─────────────────────────────────────────────────────────────────

impl Error {
    /// Create a config not found error
    pub fn config_not_found(path: impl Into<PathBuf>) -> Self {
        Error::ConfigNotFound { path: path.into() }
    }

    /// Create a config validation error
    pub fn config_validation(message: impl Into<String>) -> Self {
        Error::ConfigValidation {
            message: message.into(),
            field: None,
        }
    }

    /// Create a config validation error with field name
    pub fn config_field_invalid(field: impl Into<String>, message: impl Into<String>) -> Self {
        Error::ConfigValidation {
            message: message.into(),
            field: Some(field.into()),
        }
    }

    /// Create an access denied error naming who hands out codes
    pub fn access_denied(operator: impl Into<String>) -> Self {
        Error::AccessDenied {
            operator: operator.into(),
        }
    }

    /// Create a persona validation error
    pub fn persona_invalid(id: impl Into<String>, reason: impl Into<String>) -> Self {
        Error::PersonaInvalid {
            id: id.into(),
            reason: reason.into(),
        }
    }
}

// ─────────────────────────────────────────────────────────────────
// HTTP Rendering
// ─────────────────────────────────────────────────────────────────

/// JSON error payload returned by the relay endpoints
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorBody {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        (self.status_code(), Json(self.to_body())).into_response()
    }
}

// ─────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_format() {
        assert_eq!(ErrorCode::ConfigNotFound.as_str(), "E100");
        assert_eq!(ErrorCode::AccessDenied.as_str(), "E403");
        assert_eq!(ErrorCode::InternalError.as_str(), "E900");
    }

    #[test]
    fn test_error_exit_codes() {
        assert_eq!(ErrorCode::ConfigNotFound.exit_code(), 10);
        assert_eq!(ErrorCode::IoRead.exit_code(), 20);
        assert_eq!(ErrorCode::BindFailed.exit_code(), 30);
        assert_eq!(ErrorCode::UpstreamFailure.exit_code(), 50);
        assert_eq!(ErrorCode::PersonaInvalid.exit_code(), 60);
        assert_eq!(ErrorCode::InternalError.exit_code(), 90);
    }

    #[test]
    fn test_access_denied_message() {
        let err = Error::access_denied("Halifax Elim");
        assert_eq!(
            err.to_string(),
            "Access denied. Please ask Halifax Elim for the current access code."
        );
        assert_eq!(err.status_code(), StatusCode::FORBIDDEN);
        assert!(err.is_client_error());
    }

    #[test]
    fn test_request_error_statuses() {
        let err = Error::InvalidAssistant { id: "nope".into() };
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(err.to_body().error, "Invalid assistantId");

        assert_eq!(Error::EmptyMessage.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(Error::EmptyMessage.to_body().error, "Empty message");
        assert_eq!(Error::EmptyMessage.to_body().details, None);
    }

    #[test]
    fn test_upstream_body_passes_through() {
        let raw = r#"{"error":{"message":"Incorrect API key provided"}}"#;
        let err = Error::UpstreamFailure {
            status: 401,
            body: raw.to_string(),
        };
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!err.is_client_error());

        let body = err.to_body();
        assert_eq!(body.error, UPSTREAM_ERROR);
        assert_eq!(body.details.as_deref(), Some(raw));
    }

    #[test]
    fn test_internal_errors_are_masked() {
        let err = Error::Internal("secret detail".into());
        let body = err.to_body();
        assert_eq!(body.error, "Internal server error");
        assert!(body.details.is_none());
    }

    #[test]
    fn test_error_body_serialization() {
        let json = serde_json::to_value(Error::EmptyMessage.to_body()).unwrap();
        assert_eq!(json, serde_json::json!({"error": "Empty message"}));
    }

    #[test]
    fn test_error_suggestions() {
        let err = Error::config_not_found("/test");
        assert!(err.suggestion().unwrap().contains("config init"));

        let err = Error::UpstreamFailure { status: 401, body: String::new() };
        assert!(err.suggestion().unwrap().contains("OPENAI_API_KEY"));

        let err = Error::UpstreamFailure { status: 429, body: String::new() };
        assert!(err.suggestion().is_none());
    }

    #[test]
    fn test_format_for_terminal() {
        let err = Error::config_not_found("/test/config.toml");
        let formatted = err.format_for_terminal();

        assert!(formatted.contains("E100"));
        assert!(formatted.contains("\x1b[31m"));
        assert!(formatted.contains("Hint"));
    }

    #[test]
    fn test_format_for_log() {
        let err = Error::config_not_found("/test/config.toml");
        let formatted = err.format_for_log();

        assert!(formatted.contains("[E100]"));
        assert!(!formatted.contains("\x1b["));
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();

        assert_eq!(err.code(), ErrorCode::IoNotFound);
    }
}
