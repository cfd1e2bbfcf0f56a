//! Endpoint operations.

use crate::client::Configuration;
use crate::error::Result;
use crate::facade::{path_id, Facade};
use crate::pagination::{ListOptions, Page};
use crate::types::{
    EndpointHeadersIn, EndpointHeadersOut, EndpointIn, EndpointOut, EndpointSecretOut,
    EndpointSecretRotateIn, EndpointUpdate, PostOptions, RecoverIn,
};
use std::sync::Arc;

/// Delivery destinations registered under an application.
#[derive(Debug, Clone)]
pub struct Endpoints {
    facade: Facade,
}

fn collection(app_id: &str) -> Result<String> {
    Ok(format!("api/v1/app/{}/endpoint", path_id("app_id", app_id)?))
}

fn member(app_id: &str, endpoint_id: &str) -> Result<String> {
    Ok(format!(
        "{}/{}",
        collection(app_id)?,
        path_id("endpoint_id", endpoint_id)?
    ))
}

impl Endpoints {
    pub(crate) fn new(config: Arc<Configuration>) -> Self {
        Self {
            facade: Facade::new(config),
        }
    }

    /// List the endpoints of an application.
    ///
    /// # Errors
    ///
    /// Returns an error if `app_id` is blank, `options.limit` is zero or the request fails.
    pub async fn list(
        &self,
        app_id: &str,
        options: ListOptions<EndpointOut>,
    ) -> Result<Page<EndpointOut>> {
        self.facade
            .list(collection(app_id)?, &options, Vec::new())
            .await
    }

    /// Register an endpoint.
    ///
    /// # Example
    ///
    /// ```no_run
    /// # use svix_client::{EndpointIn, Svix};
    /// # async fn example(svix: &Svix) -> Result<(), Box<dyn std::error::Error>> {
    /// let endpoint = svix
    ///     .endpoints()
    ///     .create(
    ///         "app_2Jx",
    ///         &EndpointIn {
    ///             url: "https://example.com/webhooks".to_string(),
    ///             filter_types: Some(vec!["invoice.paid".to_string()]),
    ///             ..Default::default()
    ///         },
    ///     )
    ///     .await?;
    /// println!("Registered {}", endpoint.id);
    /// # Ok(())
    /// # }
    /// ```
    pub async fn create(&self, app_id: &str, endpoint: &EndpointIn) -> Result<EndpointOut> {
        self.create_with_options(app_id, endpoint, PostOptions::default())
            .await
    }

    /// Register an endpoint, sending an idempotency key.
    pub async fn create_with_options(
        &self,
        app_id: &str,
        endpoint: &EndpointIn,
        options: PostOptions,
    ) -> Result<EndpointOut> {
        self.facade
            .create(collection(app_id)?, endpoint, options)
            .await
    }

    pub async fn get(&self, app_id: &str, endpoint_id: &str) -> Result<EndpointOut> {
        self.facade.get(member(app_id, endpoint_id)?).await
    }

    /// Replace an endpoint's settings. The signing secret is left as is.
    pub async fn update(
        &self,
        app_id: &str,
        endpoint_id: &str,
        endpoint: &EndpointUpdate,
    ) -> Result<EndpointOut> {
        self.facade
            .update(member(app_id, endpoint_id)?, endpoint)
            .await
    }

    pub async fn delete(&self, app_id: &str, endpoint_id: &str) -> Result<()> {
        self.facade.delete(member(app_id, endpoint_id)?).await
    }

    /// Get the secret used to sign deliveries to the endpoint.
    pub async fn get_secret(&self, app_id: &str, endpoint_id: &str) -> Result<EndpointSecretOut> {
        self.facade
            .get(format!("{}/secret", member(app_id, endpoint_id)?))
            .await
    }

    /// Rotate the signing secret.
    ///
    /// The previous secret stays valid for a grace period on the service side.
    pub async fn rotate_secret(
        &self,
        app_id: &str,
        endpoint_id: &str,
        rotate: &EndpointSecretRotateIn,
    ) -> Result<()> {
        self.facade
            .action(
                format!("{}/secret/rotate", member(app_id, endpoint_id)?),
                Some(rotate),
            )
            .await
    }

    /// Re-send every failed message in the given time window.
    pub async fn recover(&self, app_id: &str, endpoint_id: &str, recover: &RecoverIn) -> Result<()> {
        self.facade
            .action(
                format!("{}/recover", member(app_id, endpoint_id)?),
                Some(recover),
            )
            .await
    }

    /// Get the custom headers sent with each delivery.
    pub async fn get_headers(&self, app_id: &str, endpoint_id: &str) -> Result<EndpointHeadersOut> {
        self.facade
            .get(format!("{}/headers", member(app_id, endpoint_id)?))
            .await
    }

    /// Replace all custom headers.
    pub async fn update_headers(
        &self,
        app_id: &str,
        endpoint_id: &str,
        headers: &EndpointHeadersIn,
    ) -> Result<()> {
        self.facade
            .replace(format!("{}/headers", member(app_id, endpoint_id)?), headers)
            .await
    }

    /// Add or overwrite some custom headers, keeping the others.
    pub async fn patch_headers(
        &self,
        app_id: &str,
        endpoint_id: &str,
        headers: &EndpointHeadersIn,
    ) -> Result<()> {
        self.facade
            .patch(format!("{}/headers", member(app_id, endpoint_id)?), headers)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ClientError;

    #[test]
    fn test_paths() {
        assert_eq!(collection("app_1").unwrap(), "api/v1/app/app_1/endpoint");
        assert_eq!(
            member("app_1", "ep_1").unwrap(),
            "api/v1/app/app_1/endpoint/ep_1"
        );
    }

    #[test]
    fn test_blank_endpoint_id() {
        match member("app_1", " ") {
            Err(ClientError::InvalidArgument(msg)) => assert!(msg.contains("endpoint_id")),
            other => panic!("Expected InvalidArgument, got {:?}", other),
        }
    }
}
