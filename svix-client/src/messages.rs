//! Message operations.

use crate::client::Configuration;
use crate::error::Result;
use crate::facade::{flag, path_id, repeated, timestamp, Facade};
use crate::pagination::{ListOptions, Page};
use crate::types::{MessageIn, MessageOut, PostOptions};
use chrono::{DateTime, Utc};
use std::sync::Arc;

/// Filters for [`Messages::list`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MessageListOptions {
    /// Cursor and page size.
    pub page: ListOptions<MessageOut>,
    /// Only messages of these event types.
    pub event_types: Option<Vec<String>>,
    /// Only messages published on this channel.
    pub channel: Option<String>,
    /// Only messages created before this time.
    pub before: Option<DateTime<Utc>>,
    /// Only messages created after this time.
    pub after: Option<DateTime<Utc>>,
    /// Include payloads; `false` returns lighter items.
    pub with_content: Option<bool>,
}

impl MessageListOptions {
    fn filters(&self) -> Vec<(String, String)> {
        let mut filters = repeated("event_types", self.event_types.as_deref());
        filters.extend(self.channel.clone().map(|c| ("channel".to_string(), c)));
        filters.extend(timestamp("before", self.before));
        filters.extend(timestamp("after", self.after));
        filters.extend(flag("with_content", self.with_content));
        filters
    }
}

impl From<ListOptions<MessageOut>> for MessageListOptions {
    fn from(page: ListOptions<MessageOut>) -> Self {
        Self {
            page,
            ..Default::default()
        }
    }
}

/// Messages sent to an application's endpoints.
#[derive(Debug, Clone)]
pub struct Messages {
    facade: Facade,
}

impl Messages {
    pub(crate) fn new(config: Arc<Configuration>) -> Self {
        Self {
            facade: Facade::new(config),
        }
    }

    /// List the messages of an application, newest first.
    ///
    /// Accepts plain [`ListOptions`] or [`MessageListOptions`].
    pub async fn list(
        &self,
        app_id: &str,
        options: impl Into<MessageListOptions>,
    ) -> Result<Page<MessageOut>> {
        let app_id = path_id("app_id", app_id)?;
        let options = options.into();
        self.facade
            .list(
                format!("api/v1/app/{}/msg", app_id),
                &options.page,
                options.filters(),
            )
            .await
    }

    /// Send a message to every matching endpoint of an application.
    ///
    /// # Example
    ///
    /// ```no_run
    /// # use svix_client::{MessageIn, Svix};
    /// # use serde_json::json;
    /// # async fn example(svix: &Svix) -> Result<(), Box<dyn std::error::Error>> {
    /// let msg = svix
    ///     .messages()
    ///     .create(
    ///         "app_2Jx",
    ///         &MessageIn {
    ///             event_type: "invoice.paid".to_string(),
    ///             payload: json!({"invoice": "in_1", "amount": 4200}),
    ///             ..Default::default()
    ///         },
    ///     )
    ///     .await?;
    /// println!("Sent {}", msg.id);
    /// # Ok(())
    /// # }
    /// ```
    pub async fn create(&self, app_id: &str, message: &MessageIn) -> Result<MessageOut> {
        self.create_with_options(app_id, message, PostOptions::default())
            .await
    }

    /// Send a message, sending an idempotency key.
    pub async fn create_with_options(
        &self,
        app_id: &str,
        message: &MessageIn,
        options: PostOptions,
    ) -> Result<MessageOut> {
        let app_id = path_id("app_id", app_id)?;
        self.facade
            .create(format!("api/v1/app/{}/msg", app_id), message, options)
            .await
    }

    /// Get a message by id or event id.
    pub async fn get(&self, app_id: &str, msg_id: &str) -> Result<MessageOut> {
        let app_id = path_id("app_id", app_id)?;
        let msg_id = path_id("msg_id", msg_id)?;
        self.facade
            .get(format!("api/v1/app/{}/msg/{}", app_id, msg_id))
            .await
    }
}
