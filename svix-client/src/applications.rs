//! Application operations.

use crate::client::Configuration;
use crate::error::Result;
use crate::facade::{path_id, Facade};
use crate::pagination::{ListOptions, Page};
use crate::transport::ApiRequest;
use crate::types::{ApplicationIn, ApplicationOut, PostOptions};
use std::sync::Arc;

/// Applications of the account, one per customer receiving webhooks.
#[derive(Debug, Clone)]
pub struct Applications {
    facade: Facade,
}

impl Applications {
    pub(crate) fn new(config: Arc<Configuration>) -> Self {
        Self {
            facade: Facade::new(config),
        }
    }

    /// List applications.
    ///
    /// # Arguments
    ///
    /// * `options` - Cursor and page size
    ///
    /// # Returns
    ///
    /// Returns one page of applications in server order.
    ///
    /// # Errors
    ///
    /// Returns an error if `options.limit` is zero or the request fails.
    ///
    /// # Example
    ///
    /// ```no_run
    /// # use svix_client::{ListOptions, Svix};
    /// # async fn example(svix: &Svix) -> Result<(), Box<dyn std::error::Error>> {
    /// let page = svix.applications().list(ListOptions::default().with_limit(20)).await?;
    /// for app in page.items {
    ///     println!("{}: {}", app.id, app.name);
    /// }
    /// # Ok(())
    /// # }
    /// ```
    pub async fn list(&self, options: ListOptions<ApplicationOut>) -> Result<Page<ApplicationOut>> {
        self.facade
            .list("api/v1/app".to_string(), &options, Vec::new())
            .await
    }

    /// Create an application.
    ///
    /// # Errors
    ///
    /// Returns [`crate::ClientError::Api`] if the service rejects the payload, e.g. a
    /// `409` when the `uid` is already taken.
    pub async fn create(&self, application: &ApplicationIn) -> Result<ApplicationOut> {
        self.create_with_options(application, PostOptions::default())
            .await
    }

    /// Create an application, sending an idempotency key.
    ///
    /// # Example
    ///
    /// ```no_run
    /// # use svix_client::{ApplicationIn, PostOptions, Svix};
    /// # async fn example(svix: &Svix) -> Result<(), Box<dyn std::error::Error>> {
    /// let app = svix
    ///     .applications()
    ///     .create_with_options(
    ///         &ApplicationIn {
    ///             name: "Acme".to_string(),
    ///             uid: Some("acme".to_string()),
    ///             ..Default::default()
    ///         },
    ///         PostOptions::idempotent("create-acme"),
    ///     )
    ///     .await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn create_with_options(
        &self,
        application: &ApplicationIn,
        options: PostOptions,
    ) -> Result<ApplicationOut> {
        self.facade
            .create("api/v1/app".to_string(), application, options)
            .await
    }

    /// Create an application, or return the existing one with the same `uid`.
    pub async fn get_or_create(
        &self,
        application: &ApplicationIn,
        options: PostOptions,
    ) -> Result<ApplicationOut> {
        let request = ApiRequest::post("api/v1/app")
            .with_query([("get_if_exists".to_string(), "true".to_string())])
            .with_idempotency_key(options.idempotency_key)
            .with_json(application)?;
        self.facade.fetch(request).await
    }

    /// Get an application by id or uid.
    ///
    /// # Errors
    ///
    /// Returns an error if `app_id` is blank, or a `404` API error if it does not exist.
    pub async fn get(&self, app_id: &str) -> Result<ApplicationOut> {
        let app_id = path_id("app_id", app_id)?;
        self.facade.get(format!("api/v1/app/{}", app_id)).await
    }

    /// Replace an application.
    pub async fn update(&self, app_id: &str, application: &ApplicationIn) -> Result<ApplicationOut> {
        let app_id = path_id("app_id", app_id)?;
        self.facade
            .update(format!("api/v1/app/{}", app_id), application)
            .await
    }

    /// Delete an application and everything under it.
    pub async fn delete(&self, app_id: &str) -> Result<()> {
        let app_id = path_id("app_id", app_id)?;
        self.facade.delete(format!("api/v1/app/{}", app_id)).await
    }
}
