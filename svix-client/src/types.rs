//! Request and response models.
//!
//! Field names follow the service's camelCase JSON. Response models are passed to
//! callers exactly as decoded.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashMap;

/// Options for create operations.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostOptions {
    /// Sent as the `idempotency-key` header.
    pub idempotency_key: Option<String>,
}

impl PostOptions {
    /// Options carrying an idempotency key.
    pub fn idempotent(key: impl Into<String>) -> Self {
        Self {
            idempotency_key: Some(key.into()),
        }
    }
}

// ============================================================================
// Applications
// ============================================================================

/// Payload for creating or replacing an application.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationIn {
    /// Display name.
    pub name: String,
    /// Messages per second allowed for the application.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rate_limit: Option<u16>,
    /// Caller-assigned unique identifier.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uid: Option<String>,
}

/// An application as stored by the service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationOut {
    /// Service-assigned identifier (`app_...`).
    pub id: String,
    /// Caller-assigned unique identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uid: Option<String>,
    /// Display name.
    pub name: String,
    /// Messages per second allowed for the application.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rate_limit: Option<u16>,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Last update time.
    pub updated_at: DateTime<Utc>,
    /// Fields returned by the server that this model does not name.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

// ============================================================================
// Endpoints
// ============================================================================

/// Payload for creating an endpoint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EndpointIn {
    /// Destination URL.
    pub url: String,
    /// Endpoint version.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<u16>,
    /// Free-form description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Only deliver these event types.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter_types: Option<Vec<String>>,
    /// Only deliver messages on these channels.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub channels: Option<Vec<String>>,
    /// Messages per second delivered to the endpoint.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rate_limit: Option<u16>,
    /// Caller-assigned unique identifier.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uid: Option<String>,
    /// Arbitrary key-value pairs stored with the endpoint.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<HashMap<String, String>>,
    /// Whether delivery is paused.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub disabled: Option<bool>,
    /// Signing secret; generated by the service when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secret: Option<String>,
}

/// Payload for replacing an endpoint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EndpointUpdate {
    /// Destination URL.
    pub url: String,
    /// Endpoint version.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<u16>,
    /// Free-form description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Only deliver these event types.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter_types: Option<Vec<String>>,
    /// Only deliver messages on these channels.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub channels: Option<Vec<String>>,
    /// Messages per second delivered to the endpoint.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rate_limit: Option<u16>,
    /// Caller-assigned unique identifier.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uid: Option<String>,
    /// Arbitrary key-value pairs stored with the endpoint.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<HashMap<String, String>>,
    /// Whether delivery is paused.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub disabled: Option<bool>,
}

/// An endpoint as stored by the service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EndpointOut {
    /// Service-assigned identifier (`ep_...`).
    pub id: String,
    /// Destination URL.
    pub url: String,
    /// Endpoint version.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<u16>,
    /// Free-form description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Only deliver these event types.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter_types: Option<Vec<String>>,
    /// Only deliver messages on these channels.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub channels: Option<Vec<String>>,
    /// Messages per second delivered to the endpoint.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rate_limit: Option<u16>,
    /// Caller-assigned unique identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uid: Option<String>,
    /// Arbitrary key-value pairs stored with the endpoint.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<HashMap<String, String>>,
    /// Whether delivery is paused.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disabled: Option<bool>,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Last update time.
    pub updated_at: DateTime<Utc>,
    /// Fields returned by the server that this model does not name.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Signing secret of an endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EndpointSecretOut {
    /// Base64 secret, prefixed with `whsec_`.
    pub key: String,
    /// Fields returned by the server that this model does not name.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Payload for rotating an endpoint's signing secret.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EndpointSecretRotateIn {
    /// New secret; generated by the service when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
}

/// Custom headers sent with every delivery to an endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EndpointHeadersIn {
    /// Header name to value.
    pub headers: HashMap<String, String>,
}

/// Custom headers of an endpoint as returned by the service.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EndpointHeadersOut {
    /// Header name to value; sensitive values are omitted.
    pub headers: HashMap<String, String>,
    /// Names of headers whose values are hidden.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sensitive: Option<Vec<String>>,
    /// Fields returned by the server that this model does not name.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Payload for re-sending failed messages to an endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecoverIn {
    /// Recover failures from this time on.
    pub since: DateTime<Utc>,
    /// Recover failures up to this time.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub until: Option<DateTime<Utc>>,
}

// ============================================================================
// Event types
// ============================================================================

/// Payload for creating an event type.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventTypeIn {
    /// Event type name, e.g. `user.signup`.
    pub name: String,
    /// Free-form description.
    pub description: String,
    /// Whether the event type is hidden from listings.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub archived: Option<bool>,
    /// JSON schemas keyed by version.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schemas: Option<Value>,
}

/// Payload for replacing an event type.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventTypeUpdate {
    /// Free-form description.
    pub description: String,
    /// Whether the event type is hidden from listings.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub archived: Option<bool>,
    /// JSON schemas keyed by version.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schemas: Option<Value>,
}

/// An event type as stored by the service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventTypeOut {
    /// Event type name.
    pub name: String,
    /// Free-form description.
    pub description: String,
    /// Whether the event type is hidden from listings.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub archived: Option<bool>,
    /// JSON schemas keyed by version.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schemas: Option<Value>,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Last update time.
    pub updated_at: DateTime<Utc>,
    /// Fields returned by the server that this model does not name.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

// ============================================================================
// Messages
// ============================================================================

/// Payload for sending a message.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageIn {
    /// Caller-assigned unique identifier.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event_id: Option<String>,
    /// Event type name.
    pub event_type: String,
    /// Message body.
    pub payload: Value,
    /// Channels the message is published on.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub channels: Option<Vec<String>>,
}

/// A message as stored by the service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageOut {
    /// Service-assigned identifier (`msg_...`).
    pub id: String,
    /// Caller-assigned unique identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event_id: Option<String>,
    /// Event type name.
    pub event_type: String,
    /// Message body; empty when listed without content.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payload: Option<Value>,
    /// Channels the message was published on.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub channels: Option<Vec<String>>,
    /// Creation time.
    pub timestamp: DateTime<Utc>,
    /// Fields returned by the server that this model does not name.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Delivery state of a message to an endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "i16", into = "i16")]
pub enum MessageStatus {
    /// Delivered.
    Success,
    /// Waiting for the next attempt.
    Pending,
    /// All attempts failed.
    Fail,
    /// An attempt is in flight.
    Sending,
}

impl From<MessageStatus> for i16 {
    fn from(status: MessageStatus) -> Self {
        match status {
            MessageStatus::Success => 0,
            MessageStatus::Pending => 1,
            MessageStatus::Fail => 2,
            MessageStatus::Sending => 3,
        }
    }
}

impl TryFrom<i16> for MessageStatus {
    type Error = String;

    fn try_from(value: i16) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Success),
            1 => Ok(Self::Pending),
            2 => Ok(Self::Fail),
            3 => Ok(Self::Sending),
            other => Err(format!("unknown message status {}", other)),
        }
    }
}

/// What caused a delivery attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "i16", into = "i16")]
pub enum MessageAttemptTriggerType {
    /// Regular delivery or automatic retry.
    Scheduled,
    /// Resend requested by a user.
    Manual,
}

impl From<MessageAttemptTriggerType> for i16 {
    fn from(trigger: MessageAttemptTriggerType) -> Self {
        match trigger {
            MessageAttemptTriggerType::Scheduled => 0,
            MessageAttemptTriggerType::Manual => 1,
        }
    }
}

impl TryFrom<i16> for MessageAttemptTriggerType {
    type Error = String;

    fn try_from(value: i16) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Scheduled),
            1 => Ok(Self::Manual),
            other => Err(format!("unknown trigger type {}", other)),
        }
    }
}

/// Class of the HTTP status an endpoint answered with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatusCodeClass {
    /// No response was received.
    CodeNone,
    /// 1xx.
    Code1xx,
    /// 2xx.
    Code2xx,
    /// 3xx.
    Code3xx,
    /// 4xx.
    Code4xx,
    /// 5xx.
    Code5xx,
}

impl StatusCodeClass {
    /// Numeric value used in query strings.
    pub fn as_i16(self) -> i16 {
        match self {
            Self::CodeNone => 0,
            Self::Code1xx => 100,
            Self::Code2xx => 200,
            Self::Code3xx => 300,
            Self::Code4xx => 400,
            Self::Code5xx => 500,
        }
    }
}

// ============================================================================
// Message attempts
// ============================================================================

/// One delivery attempt of a message to an endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageAttemptOut {
    /// Service-assigned identifier (`atmpt_...`).
    pub id: String,
    /// Message that was delivered.
    pub msg_id: String,
    /// Endpoint that was called.
    pub endpoint_id: String,
    /// Response body returned by the endpoint.
    pub response: String,
    /// Response status returned by the endpoint.
    pub response_status_code: i16,
    /// Outcome of the attempt.
    pub status: MessageStatus,
    /// What caused the attempt.
    pub trigger_type: MessageAttemptTriggerType,
    /// When the attempt was made.
    pub timestamp: DateTime<Utc>,
    /// Fields returned by the server that this model does not name.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A message together with its delivery state for one endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EndpointMessageOut {
    /// The message.
    #[serde(flatten)]
    pub message: MessageOut,
    /// Delivery state for the endpoint.
    pub status: MessageStatus,
    /// When the next attempt is scheduled.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_attempt: Option<DateTime<Utc>>,
}

/// An endpoint together with the delivery state of one message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageEndpointOut {
    /// The endpoint.
    #[serde(flatten)]
    pub endpoint: EndpointOut,
    /// Delivery state of the message.
    pub status: MessageStatus,
    /// When the next attempt is scheduled.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_attempt: Option<DateTime<Utc>>,
}

// ============================================================================
// Authentication
// ============================================================================

/// One-time login link to the consumer dashboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardAccessOut {
    /// Login URL.
    pub url: String,
    /// Session token embedded in the URL.
    pub token: String,
    /// Fields returned by the server that this model does not name.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
