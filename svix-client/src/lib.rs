//! Async Rust client for the Svix webhook API.
//!
//! A [`Svix`] client owns one authenticated configuration and exposes one facade per
//! resource: applications, endpoints, event types, messages, delivery attempts and
//! dashboard authentication. Every facade shares the same transport and reports server
//! faults the same way.
//!
//! # Features
//!
//! - Bearer token authentication with region-aware default server
//! - Cursor pagination with typed cursors ([`ListOptions`], [`Page`], [`collect_all`])
//! - Idempotency keys on create operations ([`PostOptions`])
//! - Uniform server errors ([`SvixError`]) regardless of resource
//! - Pluggable [`Transport`] for testing
//!
//! # Example
//!
//! ```no_run
//! use svix_client::{ApplicationIn, EndpointIn, MessageIn, Svix};
//! use serde_json::json;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let svix = Svix::new("testsk_abc.eu", None)?;
//!
//! let app = svix
//!     .applications()
//!     .create(&ApplicationIn {
//!         name: "Acme".to_string(),
//!         ..Default::default()
//!     })
//!     .await?;
//!
//! svix.endpoints()
//!     .create(
//!         &app.id,
//!         &EndpointIn {
//!             url: "https://acme.example.com/webhooks".to_string(),
//!             ..Default::default()
//!         },
//!     )
//!     .await?;
//!
//! let msg = svix
//!     .messages()
//!     .create(
//!         &app.id,
//!         &MessageIn {
//!             event_type: "invoice.paid".to_string(),
//!             payload: json!({"invoice": "in_1"}),
//!             ..Default::default()
//!         },
//!     )
//!     .await?;
//! println!("Sent {}", msg.id);
//! # Ok(())
//! # }
//! ```
//!
//! # Error Handling
//!
//! All operations return `Result<T, ClientError>`. Faults reported by the server are
//! normalized into [`SvixError`]:
//!
//! ```no_run
//! # use svix_client::{ClientError, Svix};
//! # async fn example(svix: &Svix) -> Result<(), ClientError> {
//! match svix.applications().get("app_missing").await {
//!     Ok(app) => println!("Found: {}", app.name),
//!     Err(ClientError::Api(err)) if err.status() == 404 => println!("Application not found"),
//!     Err(ClientError::Api(err)) if err.is_validation() => {
//!         for entry in err.validation_errors() {
//!             println!("{}: {}", entry.field_path(), entry.msg);
//!         }
//!     }
//!     Err(e) => println!("Error: {}", e),
//! }
//! # Ok(())
//! # }
//! ```

mod applications;
mod authentication;
mod client;
mod config;
mod endpoints;
mod error;
mod event_types;
mod facade;
mod message_attempts;
mod messages;
pub mod pagination;
pub mod transport;
pub mod types;

pub use applications::Applications;
pub use authentication::Authentication;
pub use client::{Configuration, Svix};
pub use config::{default_server_url, SvixOptions, DEFAULT_SERVER_URL, DEFAULT_TIMEOUT};
pub use endpoints::Endpoints;
pub use error::{normalize, ClientError, Result, SvixError, ValidationError, VALIDATION_ERROR_CODE};
pub use event_types::{EventTypeListOptions, EventTypes};
pub use message_attempts::{EndpointMessageListOptions, MessageAttemptListOptions, MessageAttempts};
pub use messages::{MessageListOptions, Messages};
pub use pagination::{collect_all, Cursor, ListOptions, Page};
pub use transport::{
    ApiRequest, Credentials, HttpTransport, RawFault, Transport, TransportError, TransportFuture,
};
pub use types::{
    ApplicationIn, ApplicationOut, DashboardAccessOut, EndpointHeadersIn, EndpointHeadersOut,
    EndpointIn, EndpointMessageOut, EndpointOut, EndpointSecretOut, EndpointSecretRotateIn,
    EndpointUpdate, EventTypeIn, EventTypeOut, EventTypeUpdate, MessageAttemptOut,
    MessageAttemptTriggerType, MessageEndpointOut, MessageIn, MessageOut, MessageStatus,
    PostOptions, RecoverIn, StatusCodeClass,
};
