//! Typed error handling for the rel-rs crate
//!
//! Every failure in this crate is a deterministic function of the input and
//! the immutable registry state, so none of these errors is worth retrying.
//! They are reported synchronously at the offending call site; nothing is
//! logged-and-swallowed here.
//!
//! # Error Categories
//!
//! - [`MappingError`]: lookups against the resource mapping registry
//! - [`IdentifierError`]: request identifiers that cannot be parsed
//! - [`ConvertError`]: the conversion service chain
//! - [`ConfigError`]: malformed declarative configuration

use crate::core::convert::TypeDescriptor;
use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use std::fmt;

/// The main error type for the rel-rs crate
#[derive(Debug)]
pub enum RelError {
    /// Resource mapping lookup errors
    Mapping(MappingError),

    /// Identifier translation errors
    Identifier(IdentifierError),

    /// Conversion service errors
    Convert(ConvertError),

    /// Configuration errors
    Config(ConfigError),
}

impl fmt::Display for RelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RelError::Mapping(e) => write!(f, "{}", e),
            RelError::Identifier(e) => write!(f, "{}", e),
            RelError::Convert(e) => write!(f, "{}", e),
            RelError::Config(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for RelError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RelError::Mapping(e) => Some(e),
            RelError::Identifier(e) => Some(e),
            RelError::Convert(e) => Some(e),
            RelError::Config(e) => Some(e),
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

impl RelError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            // A mapping lookup for an unregistered type is a caller/registry
            // mismatch, not client input
            RelError::Mapping(_) => StatusCode::INTERNAL_SERVER_ERROR,
            RelError::Identifier(_) => StatusCode::BAD_REQUEST,
            RelError::Convert(_) => StatusCode::INTERNAL_SERVER_ERROR,
            RelError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            RelError::Mapping(e) => e.error_code(),
            RelError::Identifier(_) => "INVALID_IDENTIFIER_FORMAT",
            RelError::Convert(e) => e.error_code(),
            RelError::Config(_) => "CONFIG_ERROR",
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

    /// Get additional details for the error
    fn details(&self) -> Option<serde_json::Value> {
        match self {
            RelError::Mapping(MappingError::UnknownEntityType { entity_type }) => {
                Some(serde_json::json!({ "entity_type": entity_type }))
            }
            RelError::Convert(ConvertError::ConverterNotFound { source, target }) => {
                Some(serde_json::json!({
                    "source_type": source.name(),
                    "target_type": target.name()
                }))
            }
            RelError::Identifier(IdentifierError::InvalidFormat {
                value, entity_type, ..
            }) => Some(serde_json::json!({
                "value": value,
                "entity_type": entity_type
            })),
            _ => None,
        }
    }
}

impl IntoResponse for RelError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(self.to_response());
        (status, body).into_response()
    }
}

// =============================================================================
// Mapping Errors
// =============================================================================

/// Errors raised by resource mapping lookups
#[derive(Debug)]
pub enum MappingError {
    /// A mapping was requested for an entity type that was never registered
    UnknownEntityType { entity_type: String },
}

impl MappingError {
    fn error_code(&self) -> &'static str {
        match self {
            MappingError::UnknownEntityType { .. } => "UNKNOWN_ENTITY_TYPE",
        }
    }
}

impl fmt::Display for MappingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MappingError::UnknownEntityType { entity_type } => {
                write!(
                    f,
                    "No resource mapping registered for entity type '{}'",
                    entity_type
                )
            }
        }
    }
}

impl std::error::Error for MappingError {}

impl From<MappingError> for RelError {
    fn from(e: MappingError) -> Self {
        RelError::Mapping(e)
    }
}

// =============================================================================
// Identifier Errors
// =============================================================================

/// Errors raised while translating request identifiers
#[derive(Debug)]
pub enum IdentifierError {
    /// A request-supplied id string cannot be parsed by the selected converter
    InvalidFormat {
        value: String,
        entity_type: String,
        reason: String,
    },
}

impl fmt::Display for IdentifierError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IdentifierError::InvalidFormat {
                value,
                entity_type,
                reason,
            } => write!(
                f,
                "Invalid identifier '{}' for entity type '{}': {}",
                value, entity_type, reason
            ),
        }
    }
}

impl std::error::Error for IdentifierError {}

impl From<IdentifierError> for RelError {
    fn from(e: IdentifierError) -> Self {
        RelError::Identifier(e)
    }
}

// =============================================================================
// Conversion Errors
// =============================================================================

/// Errors raised by the conversion service chain
#[derive(Debug)]
pub enum ConvertError {
    /// No registered conversion service supports the (source, target) pair
    ConverterNotFound {
        source: TypeDescriptor,
        target: TypeDescriptor,
    },

    /// The selected converter rejected the value
    ConversionFailed {
        source: TypeDescriptor,
        target: TypeDescriptor,
        message: String,
    },
}

impl ConvertError {
    fn error_code(&self) -> &'static str {
        match self {
            ConvertError::ConverterNotFound { .. } => "CONVERTER_NOT_FOUND",
            ConvertError::ConversionFailed { .. } => "CONVERSION_FAILED",
        }
    }
}

impl fmt::Display for ConvertError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConvertError::ConverterNotFound { source, target } => write!(
                f,
                "No conversion service registered for {} -> {}",
                source.name(),
                target.name()
            ),
            ConvertError::ConversionFailed {
                source,
                target,
                message,
            } => write!(
                f,
                "Conversion {} -> {} failed: {}",
                source.name(),
                target.name(),
                message
            ),
        }
    }
}

impl std::error::Error for ConvertError {}

impl From<ConvertError> for RelError {
    fn from(e: ConvertError) -> Self {
        RelError::Convert(e)
    }
}

// =============================================================================
// Configuration Errors
// =============================================================================

/// Errors raised while validating the declarative configuration
#[derive(Debug)]
pub enum ConfigError {
    /// The configured base URI cannot be parsed
    InvalidBaseUri { value: String, message: String },

    /// The same entity type was declared twice
    DuplicateEntity { name: String },

    /// Two entity types resolved to the same URI path
    DuplicatePath {
        path: String,
        entity_type: String,
        other: String,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidBaseUri { value, message } => {
                write!(f, "Invalid base URI '{}': {}", value, message)
            }
            ConfigError::DuplicateEntity { name } => {
                write!(f, "Entity type '{}' declared more than once", name)
            }
            ConfigError::DuplicatePath {
                path,
                entity_type,
                other,
            } => write!(
                f,
                "Entity types '{}' and '{}' both resolve to path '{}'",
                entity_type, other, path
            ),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<ConfigError> for RelError {
    fn from(e: ConfigError) -> Self {
        RelError::Config(e)
    }
}
