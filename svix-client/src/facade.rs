//! Operations shared by every resource facade.
//!
//! Each resource type only knows its paths and payload types; sending the request,
//! normalizing faults and decoding the result happens here, once.

use crate::client::Configuration;
use crate::error::{normalize, ClientError, Result};
use crate::pagination::{ListOptions, Page};
use crate::transport::{ApiRequest, TransportError};
use crate::types::PostOptions;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;

/// Executor bound to a client's shared configuration.
#[derive(Debug, Clone)]
pub(crate) struct Facade {
    config: Arc<Configuration>,
}

impl Facade {
    pub(crate) fn new(config: Arc<Configuration>) -> Self {
        Self { config }
    }

    /// Send one request; the only place a transport failure is translated.
    async fn call(&self, request: ApiRequest) -> Result<Value> {
        tracing::debug!(method = %request.method, path = %request.path, "Sending API request");

        match self.config.execute(request).await {
            Ok(value) => Ok(value),
            Err(TransportError::Fault(fault)) => {
                let err = normalize(&fault);
                tracing::debug!(status = err.status(), code = ?err.code(), "API request failed");
                Err(ClientError::Api(err))
            }
            Err(TransportError::Network(cause)) => Err(ClientError::Transport(cause)),
            Err(TransportError::InvalidBody(cause)) => Err(ClientError::InvalidResponse(cause)),
        }
    }

    /// Send a request and decode its body.
    pub(crate) async fn fetch<O: DeserializeOwned>(&self, request: ApiRequest) -> Result<O> {
        let value = self.call(request).await?;
        Ok(serde_json::from_value(value)?)
    }

    /// Send a request whose body, if any, is ignored.
    pub(crate) async fn send(&self, request: ApiRequest) -> Result<()> {
        self.call(request).await.map(|_| ())
    }

    /// GET one page of a collection.
    pub(crate) async fn list<T: DeserializeOwned>(
        &self,
        path: String,
        options: &ListOptions<T>,
        filters: Vec<(String, String)>,
    ) -> Result<Page<T>> {
        let request = ApiRequest::get(path)
            .with_query(options.query()?)
            .with_query(filters);
        self.fetch(request).await
    }

    /// POST a new resource.
    pub(crate) async fn create<I, O>(&self, path: String, body: &I, options: PostOptions) -> Result<O>
    where
        I: Serialize + ?Sized,
        O: DeserializeOwned,
    {
        let request = ApiRequest::post(path)
            .with_idempotency_key(options.idempotency_key)
            .with_json(body)?;
        self.fetch(request).await
    }

    /// GET a single resource.
    pub(crate) async fn get<O: DeserializeOwned>(&self, path: String) -> Result<O> {
        self.fetch(ApiRequest::get(path)).await
    }

    /// PUT a full replacement.
    pub(crate) async fn update<I, O>(&self, path: String, body: &I) -> Result<O>
    where
        I: Serialize + ?Sized,
        O: DeserializeOwned,
    {
        self.fetch(ApiRequest::put(path).with_json(body)?).await
    }

    /// PUT a replacement whose response carries no body.
    pub(crate) async fn replace<I: Serialize + ?Sized>(&self, path: String, body: &I) -> Result<()> {
        self.send(ApiRequest::put(path).with_json(body)?).await
    }

    /// PATCH a partial update whose response carries no body.
    pub(crate) async fn patch<I: Serialize + ?Sized>(&self, path: String, body: &I) -> Result<()> {
        self.send(ApiRequest::patch(path).with_json(body)?).await
    }

    /// DELETE a resource.
    pub(crate) async fn delete(&self, path: String) -> Result<()> {
        self.send(ApiRequest::delete(path)).await
    }

    /// POST an action with an optional payload and no response body.
    pub(crate) async fn action<I: Serialize + ?Sized>(
        &self,
        path: String,
        body: Option<&I>,
    ) -> Result<()> {
        let request = match body {
            Some(body) => ApiRequest::post(path).with_json(body)?,
            None => ApiRequest::post(path),
        };
        self.send(request).await
    }
}

/// Check that a path identifier is present and percent-encode it.
pub(crate) fn path_id(name: &str, value: &str) -> Result<String> {
    if value.trim().is_empty() {
        return Err(ClientError::InvalidArgument(format!(
            "{} must not be empty",
            name
        )));
    }
    Ok(urlencoding::encode(value).into_owned())
}

/// Render a boolean query filter.
pub(crate) fn flag(name: &str, value: Option<bool>) -> Option<(String, String)> {
    value.map(|v| (name.to_string(), v.to_string()))
}

/// Render an RFC 3339 timestamp filter.
pub(crate) fn timestamp(name: &str, value: Option<DateTime<Utc>>) -> Option<(String, String)> {
    value.map(|v| (name.to_string(), v.to_rfc3339_opts(SecondsFormat::Secs, true)))
}

/// Render a list filter as one repeated parameter per value.
pub(crate) fn repeated(name: &str, values: Option<&[String]>) -> Vec<(String, String)> {
    values
        .unwrap_or_default()
        .iter()
        .map(|v| (name.to_string(), v.clone()))
        .collect()
}
