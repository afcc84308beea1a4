//! Typed error handling for cardwallet
//!
//! # Error Categories
//!
//! - [`CardError`]: Errors raised by the card store (duplicate number, unknown id)
//! - [`ValidationError`]: Errors raised while validating form input
//! - [`ConfigError`]: Errors raised while loading the application configuration
//!
//! Store and validation errors roll up into [`CardWalletError`], which knows
//! its HTTP status code and renders itself as a JSON body. Config errors only
//! occur before the server starts and are reported by the binary.
//!
//! # Example
//!
//! ```rust,ignore
//! match store.add(new_card) {
//!     Ok(card) => println!("Added {}", card.id),
//!     Err(CardError::DuplicateNumber { .. }) => println!("Card number must be unique"),
//!     Err(e) => eprintln!("Other error: {}", e),
//! }
//! ```

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use std::fmt;
use uuid::Uuid;

/// The main error type for cardwallet
#[derive(Debug)]
pub enum CardWalletError {
    /// Card store errors
    Card(CardError),

    /// Form/input validation errors
    Validation(ValidationError),

    /// Internal errors (poisoned lock, template failure)
    Internal(String),
}

impl fmt::Display for CardWalletError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CardWalletError::Card(e) => write!(f, "{}", e),
            CardWalletError::Validation(e) => write!(f, "{}", e),
            CardWalletError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for CardWalletError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CardWalletError::Card(e) => Some(e),
            CardWalletError::Validation(e) => Some(e),
            CardWalletError::Internal(_) => None,
        }
    }
}

/// Error response structure for HTTP responses
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error code for programmatic handling
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Optional additional details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl CardWalletError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            CardWalletError::Card(e) => e.status_code(),
            CardWalletError::Validation(e) => e.status_code(),
            CardWalletError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            CardWalletError::Card(e) => e.error_code(),
            CardWalletError::Validation(e) => e.error_code(),
            CardWalletError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Convert to an error response
    pub fn to_response(&self) -> ErrorResponse {
        ErrorResponse {
            code: self.error_code().to_string(),
            message: self.to_string(),
            details: self.details(),
        }
    }

    fn details(&self) -> Option<serde_json::Value> {
        match self {
            CardWalletError::Card(CardError::NotFound { id }) => {
                Some(serde_json::json!({ "id": id.to_string() }))
            }
            CardWalletError::Validation(ValidationError::FieldErrors(errors)) => {
                Some(serde_json::json!({ "fields": errors }))
            }
            _ => None,
        }
    }
}

impl IntoResponse for CardWalletError {
    fn into_response(self) -> Response {
        if self.status_code().is_server_error() {
            tracing::error!(code = self.error_code(), "{}", self);
        }
        let status = self.status_code();
        let body = Json(self.to_response());
        (status, body).into_response()
    }
}

// =============================================================================
// Card Errors
// =============================================================================

/// Errors raised by the card store
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CardError {
    /// A card with the same number is already stored
    #[error("Card number must be unique")]
    DuplicateNumber { number: String },

    /// No card carries the given id
    #[error("Card with id '{id}' not found")]
    NotFound { id: Uuid },
}

impl CardError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            CardError::DuplicateNumber { .. } => StatusCode::CONFLICT,
            CardError::NotFound { .. } => StatusCode::NOT_FOUND,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            CardError::DuplicateNumber { .. } => "DUPLICATE_CARD_NUMBER",
            CardError::NotFound { .. } => "CARD_NOT_FOUND",
        }
    }
}

impl From<CardError> for CardWalletError {
    fn from(err: CardError) -> Self {
        CardWalletError::Card(err)
    }
}

// =============================================================================
// Validation Errors
// =============================================================================

/// Errors raised while validating input
#[derive(Debug, Clone, thiserror::Error)]
pub enum ValidationError {
    /// One message per invalid form field
    #[error("Validation errors: {}", join_field_errors(.0))]
    FieldErrors(Vec<FieldValidationError>),

    /// Malformed card id in a path
    #[error("Invalid card id: {value}")]
    InvalidId { value: String },
}

/// A single field validation error
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldValidationError {
    pub field: String,
    pub message: String,
}

fn join_field_errors(errors: &[FieldValidationError]) -> String {
    errors
        .iter()
        .map(|e| format!("{}: {}", e.field, e.message))
        .collect::<Vec<_>>()
        .join(", ")
}

impl ValidationError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ValidationError::FieldErrors(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ValidationError::InvalidId { .. } => StatusCode::BAD_REQUEST,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            ValidationError::FieldErrors(_) => "VALIDATION_FAILED",
            ValidationError::InvalidId { .. } => "INVALID_CARD_ID",
        }
    }
}

impl From<ValidationError> for CardWalletError {
    fn from(err: ValidationError) -> Self {
        CardWalletError::Validation(err)
    }
}

// =============================================================================
// Config Errors
// =============================================================================

/// Errors raised while loading configuration
#[derive(Debug, Clone, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {message}")]
    Io { path: String, message: String },

    #[error("Failed to parse config: {message}")]
    Parse { message: String },

    #[error("Invalid config value for '{field}': {message}")]
    InvalidValue { field: String, message: String },
}

impl From<serde_yaml::Error> for ConfigError {
    fn from(err: serde_yaml::Error) -> Self {
        ConfigError::Parse {
            message: err.to_string(),
        }
    }
}

// =============================================================================
// Conversions from external errors
// =============================================================================

impl From<uuid::Error> for CardWalletError {
    fn from(err: uuid::Error) -> Self {
        CardWalletError::Validation(ValidationError::InvalidId {
            value: err.to_string(),
        })
    }
}

impl From<tera::Error> for CardWalletError {
    fn from(err: tera::Error) -> Self {
        CardWalletError::Internal(format!("template rendering failed: {}", err))
    }
}

/// A specialized Result type for cardwallet operations
pub type CardWalletResult<T> = Result<T, CardWalletError>;
