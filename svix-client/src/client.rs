//! Client root and the configuration shared by its facades.

use crate::applications::Applications;
use crate::authentication::Authentication;
use crate::config::SvixOptions;
use crate::endpoints::Endpoints;
use crate::error::{ClientError, Result};
use crate::event_types::EventTypes;
use crate::message_attempts::MessageAttempts;
use crate::messages::Messages;
use crate::transport::{ApiRequest, Credentials, HttpTransport, Transport, TransportError};
use serde_json::Value;
use std::fmt;
use std::sync::Arc;
use url::Url;

/// Authenticated transport configuration, read-only once built.
///
/// One instance is created per [`Svix`] and shared by reference with every facade.
#[derive(Clone)]
pub struct Configuration {
    credentials: Credentials,
    transport: Arc<dyn Transport>,
}

impl Configuration {
    /// Credentials installed at construction.
    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    pub(crate) async fn execute(&self, request: ApiRequest) -> std::result::Result<Value, TransportError> {
        self.transport.execute(&self.credentials, request).await
    }
}

impl fmt::Debug for Configuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Configuration")
            .field("credentials", &self.credentials)
            .finish_non_exhaustive()
    }
}

/// A client for the Svix API.
///
/// # Example
///
/// ```no_run
/// use svix_client::{ApplicationIn, Svix, SvixOptions};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let svix = Svix::new(
///     std::env::var("SVIX_AUTH_TOKEN")?,
///     Some(SvixOptions::from_env()),
/// )?;
///
/// let app = svix
///     .applications()
///     .create(&ApplicationIn {
///         name: "My app".to_string(),
///         ..Default::default()
///     })
///     .await?;
/// println!("Created {}", app.id);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Svix {
    config: Arc<Configuration>,
    applications: Applications,
    authentication: Authentication,
    endpoints: Endpoints,
    event_types: EventTypes,
    messages: Messages,
    message_attempts: MessageAttempts,
}

impl Svix {
    /// Create a client that talks HTTP through reqwest.
    ///
    /// No request is made; the token is only checked on first use.
    ///
    /// # Errors
    ///
    /// Returns an error if the token is empty, the server URL is invalid, or the
    /// HTTP client cannot be created.
    pub fn new(token: impl Into<String>, options: Option<SvixOptions>) -> Result<Self> {
        let options = options.unwrap_or_default();
        let transport = HttpTransport::new(&options)?;
        Self::with_transport(token, Some(options), Arc::new(transport))
    }

    /// Create a client on top of a custom transport.
    ///
    /// # Errors
    ///
    /// Returns an error if the token is empty or the server URL is invalid.
    pub fn with_transport(
        token: impl Into<String>,
        options: Option<SvixOptions>,
        transport: Arc<dyn Transport>,
    ) -> Result<Self> {
        let token = token.into();
        if token.trim().is_empty() {
            return Err(ClientError::InvalidArgument(
                "auth token must not be empty".to_string(),
            ));
        }

        let options = options.unwrap_or_default();
        let base_url = parse_base_url(&options.resolve_server_url(&token))?;
        tracing::debug!(base_url = %base_url, "Initialized Svix client");

        let config = Arc::new(Configuration {
            credentials: Credentials::new(token, base_url),
            transport,
        });

        Ok(Self {
            applications: Applications::new(config.clone()),
            authentication: Authentication::new(config.clone()),
            endpoints: Endpoints::new(config.clone()),
            event_types: EventTypes::new(config.clone()),
            messages: Messages::new(config.clone()),
            message_attempts: MessageAttempts::new(config.clone()),
            config,
        })
    }

    /// Shared configuration used by every facade.
    pub fn configuration(&self) -> &Configuration {
        &self.config
    }

    /// Application operations.
    pub fn applications(&self) -> &Applications {
        &self.applications
    }

    /// Authentication operations.
    pub fn authentication(&self) -> &Authentication {
        &self.authentication
    }

    /// Endpoint operations.
    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    /// Event type operations.
    pub fn event_types(&self) -> &EventTypes {
        &self.event_types
    }

    /// Message operations.
    pub fn messages(&self) -> &Messages {
        &self.messages
    }

    /// Delivery attempt operations.
    pub fn message_attempts(&self) -> &MessageAttempts {
        &self.message_attempts
    }
}

/// Validate a server URL.
fn parse_base_url(raw: &str) -> Result<Url> {
    let url = Url::parse(raw)
        .map_err(|e| ClientError::InvalidUrl(format!("{}: {}", raw, e)))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ClientError::InvalidUrl(format!(
            "URL must start with http:// or https://, got: {}",
            raw
        )));
    }
    if url.cannot_be_a_base() || url.host_str().is_none() {
        return Err(ClientError::InvalidUrl(format!("URL has no host: {}", raw)));
    }

    Ok(url)
}
