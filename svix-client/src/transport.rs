//! Transport abstraction for API requests.
//!
//! Facades never talk to the network directly. They hand an [`ApiRequest`] to a
//! [`Transport`] and get back either the decoded JSON body or a [`TransportError`].
//! [`HttpTransport`] is the production implementation; tests plug in their own.

use crate::config::SvixOptions;
use crate::error::{ClientError, Result};
use reqwest::{Client as HttpClient, Method, StatusCode};
use serde::Serialize;
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use url::Url;

/// Future returned by [`Transport::execute`].
pub type TransportFuture<'a> =
    Pin<Box<dyn Future<Output = std::result::Result<Value, TransportError>> + Send + 'a>>;

/// Bearer token and server location shared by every facade of a client.
#[derive(Clone)]
pub struct Credentials {
    token: String,
    base_url: Url,
}

impl Credentials {
    pub(crate) fn new(token: String, base_url: Url) -> Self {
        Self { token, base_url }
    }

    /// The bearer token.
    pub fn token(&self) -> &str {
        &self.token
    }

    /// The server base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Build a full URL from an API path such as `api/v1/app`.
    pub fn url(&self, path: &str) -> String {
        let path = path.strip_prefix('/').unwrap_or(path);
        format!("{}/{}", self.base_url.as_str().trim_end_matches('/'), path)
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("token", &"<redacted>")
            .field("base_url", &self.base_url.as_str())
            .finish()
    }
}

/// A single API operation, ready to be sent.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    /// HTTP method.
    pub method: Method,
    /// Path relative to the base URL, without a leading slash.
    pub path: String,
    /// Query parameters in the order they should be sent.
    pub query: Vec<(String, String)>,
    /// Value for the `idempotency-key` header.
    pub idempotency_key: Option<String>,
    /// JSON request body.
    pub body: Option<Value>,
}

impl ApiRequest {
    /// Create a request with no query, headers or body.
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            idempotency_key: None,
            body: None,
        }
    }

    /// Create a GET request.
    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    /// Create a POST request.
    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    /// Create a PUT request.
    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::PUT, path)
    }

    /// Create a PATCH request.
    pub fn patch(path: impl Into<String>) -> Self {
        Self::new(Method::PATCH, path)
    }

    /// Create a DELETE request.
    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    /// Append query parameters.
    #[must_use]
    pub fn with_query(mut self, pairs: impl IntoIterator<Item = (String, String)>) -> Self {
        self.query.extend(pairs);
        self
    }

    /// Set the idempotency key.
    #[must_use]
    pub fn with_idempotency_key(mut self, key: Option<String>) -> Self {
        self.idempotency_key = key;
        self
    }

    /// Serialize `body` as the JSON request body.
    ///
    /// # Errors
    ///
    /// Returns an error if the payload cannot be represented as JSON.
    pub fn with_json<T: Serialize + ?Sized>(mut self, body: &T) -> Result<Self> {
        self.body = Some(serde_json::to_value(body)?);
        Ok(self)
    }
}

/// A non-success response, exactly as the server sent it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawFault {
    /// HTTP status code.
    pub status: u16,
    /// Response headers (lowercase names).
    pub headers: HashMap<String, String>,
    /// Raw response body.
    pub body: Vec<u8>,
}

impl RawFault {
    /// Create a fault with no headers.
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            headers: HashMap::new(),
            body: body.into(),
        }
    }

    /// Create a fault with a JSON body.
    pub fn json(status: u16, body: &Value) -> Self {
        Self::new(status, body.to_string()).with_header("content-type", "application/json")
    }

    /// Add a header.
    #[must_use]
    pub fn with_header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }
}

/// Failure reported by a [`Transport`].
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TransportError {
    /// The server answered with a non-success status.
    #[error("server returned status {}", .0.status)]
    Fault(RawFault),
    /// The request never produced a response.
    #[error("network error: {0}")]
    Network(String),
    /// A success response whose body is not valid JSON.
    #[error("invalid response body: {0}")]
    InvalidBody(String),
}

/// Performs one API operation against the server.
///
/// Implementations must be safe to share between tasks; the client holds a single
/// instance behind an `Arc` and calls it concurrently.
pub trait Transport: Send + Sync {
    /// Send `request` authenticated with `credentials`.
    ///
    /// Resolves to the JSON body on success (`Value::Null` when the body is empty).
    fn execute<'a>(&'a self, credentials: &'a Credentials, request: ApiRequest)
        -> TransportFuture<'a>;
}

/// reqwest-backed transport used by [`crate::Svix::new`].
#[derive(Debug, Clone)]
pub struct HttpTransport {
    http: HttpClient,
}

impl HttpTransport {
    /// Build a transport honoring the timeout in `options`.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created.
    pub fn new(options: &SvixOptions) -> Result<Self> {
        let http = HttpClient::builder()
            .timeout(options.timeout())
            .user_agent(user_agent())
            .build()
            .map_err(ClientError::Http)?;

        Ok(Self { http })
    }

    async fn send(
        &self,
        credentials: &Credentials,
        request: ApiRequest,
    ) -> std::result::Result<Value, TransportError> {
        let url = credentials.url(&request.path);
        tracing::trace!(method = %request.method, url = %url, "Sending HTTP request");

        let mut builder = self
            .http
            .request(request.method, &url)
            .bearer_auth(credentials.token())
            .header("svix-req-id", rand::random::<u32>().to_string());

        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        if let Some(key) = request.idempotency_key {
            builder = builder.header("idempotency-key", key);
        }
        if let Some(body) = request.body {
            builder = builder.json(&body);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| TransportError::Network(e.to_string()))?;

        let status = response.status();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|v| (name.as_str().to_string(), v.to_string()))
            })
            .collect();
        let body = response
            .bytes()
            .await
            .map_err(|e| TransportError::Network(e.to_string()))?;

        if !status.is_success() {
            return Err(TransportError::Fault(RawFault {
                status: status.as_u16(),
                headers,
                body: body.to_vec(),
            }));
        }

        if status == StatusCode::NO_CONTENT || body.is_empty() {
            return Ok(Value::Null);
        }

        serde_json::from_slice(&body).map_err(|e| TransportError::InvalidBody(e.to_string()))
    }
}

impl Transport for HttpTransport {
    fn execute<'a>(
        &'a self,
        credentials: &'a Credentials,
        request: ApiRequest,
    ) -> TransportFuture<'a> {
        Box::pin(self.send(credentials, request))
    }
}

/// `User-Agent` sent with every request.
pub fn user_agent() -> String {
    format!("svix-libs/{}/rust", env!("CARGO_PKG_VERSION"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn credentials(base: &str) -> Credentials {
        Credentials::new("tok".to_string(), Url::parse(base).unwrap())
    }

    #[test]
    fn test_url_building() {
        let creds = credentials("https://api.svix.com");
        assert_eq!(creds.url("api/v1/app"), "https://api.svix.com/api/v1/app");
        assert_eq!(creds.url("/api/v1/app"), "https://api.svix.com/api/v1/app");
    }

    #[test]
    fn test_url_building_keeps_base_path() {
        let creds = credentials("http://localhost:8071/proxy/");
        assert_eq!(
            creds.url("api/v1/app"),
            "http://localhost:8071/proxy/api/v1/app"
        );
    }

    #[test]
    fn test_credentials_debug_redacts_token() {
        let creds = Credentials::new(
            "sk_secret".to_string(),
            Url::parse("https://api.svix.com").unwrap(),
        );
        let debug = format!("{:?}", creds);
        assert!(!debug.contains("sk_secret"));
        assert!(debug.contains("api.svix.com"));
    }

    #[test]
    fn test_request_builders() {
        let request = ApiRequest::post("api/v1/app")
            .with_query(vec![("get_if_exists".to_string(), "true".to_string())])
            .with_idempotency_key(Some("key-1".to_string()))
            .with_json(&json!({"name": "demo"}))
            .unwrap();

        assert_eq!(request.method, Method::POST);
        assert_eq!(request.path, "api/v1/app");
        assert_eq!(request.query.len(), 1);
        assert_eq!(request.idempotency_key.as_deref(), Some("key-1"));
        assert_eq!(request.body, Some(json!({"name": "demo"})));
    }

    #[test]
    fn test_raw_fault_json() {
        let fault = RawFault::json(409, &json!({"code": "conflict"}));
        assert_eq!(fault.status, 409);
        assert_eq!(
            fault.headers.get("content-type").map(String::as_str),
            Some("application/json")
        );
        assert_eq!(fault.body, br#"{"code":"conflict"}"#.to_vec());
    }

    #[test]
    fn test_user_agent() {
        assert!(user_agent().starts_with("svix-libs/"));
        assert!(user_agent().ends_with("/rust"));
    }
}
