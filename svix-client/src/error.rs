//! Error types for the Svix client.
//!
//! Every non-success response from the server reaches callers as a [`SvixError`],
//! produced by [`normalize`]. Failures that never got a response (network, bad input,
//! undecodable bodies) have their own [`ClientError`] variants.

use crate::transport::RawFault;
use reqwest::StatusCode;
use serde::Deserialize;
use serde_json::Value;
use std::fmt;
use thiserror::Error;

/// Error code assigned to field-level validation failures.
pub const VALIDATION_ERROR_CODE: &str = "validation_error";

/// Errors that can occur when using the Svix client.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The HTTP client could not be built.
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    /// Server returned an error response.
    #[error("API error: {0}")]
    Api(#[from] SvixError),

    /// The request never produced a response.
    #[error("Transport error: {0}")]
    Transport(String),

    /// Failed to (de)serialize a payload.
    #[error("Failed to deserialize response: {0}")]
    Deserialize(#[from] serde_json::Error),

    /// Invalid URL provided.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Invalid argument rejected before any request was sent.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Invalid response format.
    #[error("Invalid response format: {0}")]
    InvalidResponse(String),
}

impl ClientError {
    /// The normalized API error, if the server answered with a failure.
    pub fn api(&self) -> Option<&SvixError> {
        match self {
            Self::Api(err) => Some(err),
            _ => None,
        }
    }

    /// HTTP status of the failed response, if there was one.
    pub fn status(&self) -> Option<u16> {
        self.api().map(SvixError::status)
    }
}

/// Result type for client operations.
pub type Result<T> = std::result::Result<T, ClientError>;

/// A single field-level entry of a validation failure.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ValidationError {
    /// Path to the offending field, e.g. `["body", "url"]`.
    pub loc: Vec<Value>,
    /// Human-readable message.
    pub msg: String,
    /// Machine-readable kind, e.g. `value_error.missing`.
    #[serde(rename = "type")]
    pub kind: String,
}

impl ValidationError {
    /// Field path joined with dots, e.g. `body.url`.
    pub fn field_path(&self) -> String {
        self.loc
            .iter()
            .map(|segment| match segment {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            })
            .collect::<Vec<_>>()
            .join(".")
    }
}

/// Normalized error returned for every failed API call.
#[derive(Debug, Clone, PartialEq)]
pub struct SvixError {
    status: u16,
    code: Option<String>,
    message: String,
    body: Vec<u8>,
    validation_errors: Vec<ValidationError>,
}

impl SvixError {
    /// HTTP status code.
    pub fn status(&self) -> u16 {
        self.status
    }

    /// Machine-readable error code, when the body carried one.
    pub fn code(&self) -> Option<&str> {
        self.code.as_deref()
    }

    /// Human-readable message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Raw response body.
    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// Raw response body as text (lossy).
    pub fn body_text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    /// Field-level entries of a validation failure; empty otherwise.
    pub fn validation_errors(&self) -> &[ValidationError] {
        &self.validation_errors
    }

    /// Whether this is a field-level validation failure.
    pub fn is_validation(&self) -> bool {
        self.code.as_deref() == Some(VALIDATION_ERROR_CODE)
    }
}

impl fmt::Display for SvixError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.code {
            Some(code) => write!(f, "HTTP {} ({}): {}", self.status, code, self.message),
            None => f.write_str(&self.message),
        }
    }
}

impl std::error::Error for SvixError {}

#[derive(Deserialize)]
struct ValidationBody {
    detail: Vec<ValidationError>,
}

#[derive(Deserialize)]
struct HttpErrorBody {
    code: String,
    detail: String,
}

/// Convert a raw transport fault into a [`SvixError`].
///
/// Total and pure: every fault maps to exactly one error and equal faults map to
/// equal errors.
pub fn normalize(fault: &RawFault) -> SvixError {
    let status = fault.status;
    let body = fault.body.clone();

    if let Ok(validation) = serde_json::from_slice::<ValidationBody>(&fault.body) {
        let message = if validation.detail.is_empty() {
            status_message(status)
        } else {
            validation
                .detail
                .iter()
                .map(|entry| match entry.field_path() {
                    path if path.is_empty() => entry.msg.clone(),
                    path => format!("{}: {}", path, entry.msg),
                })
                .collect::<Vec<_>>()
                .join("; ")
        };

        return SvixError {
            status,
            code: Some(VALIDATION_ERROR_CODE.to_string()),
            message,
            body,
            validation_errors: validation.detail,
        };
    }

    if let Ok(http) = serde_json::from_slice::<HttpErrorBody>(&fault.body) {
        return SvixError {
            status,
            code: Some(http.code),
            message: http.detail,
            body,
            validation_errors: Vec::new(),
        };
    }

    SvixError {
        status,
        code: None,
        message: status_message(status),
        body,
        validation_errors: Vec::new(),
    }
}

/// Message derived from the status line alone, e.g. `HTTP 404 Not Found`.
fn status_message(status: u16) -> String {
    match StatusCode::from_u16(status)
        .ok()
        .and_then(|s| s.canonical_reason())
    {
        Some(reason) => format!("HTTP {} {}", status, reason),
        None => format!("HTTP {}", status),
    }
}
