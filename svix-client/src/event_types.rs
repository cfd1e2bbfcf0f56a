//! Event type operations.

use crate::client::Configuration;
use crate::error::Result;
use crate::facade::{flag, path_id, Facade};
use crate::pagination::{ListOptions, Page};
use crate::types::{EventTypeIn, EventTypeOut, EventTypeUpdate, PostOptions};
use std::sync::Arc;

/// Filters for [`EventTypes::list`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EventTypeListOptions {
    /// Cursor and page size.
    pub page: ListOptions<EventTypeOut>,
    /// Also return archived event types.
    pub include_archived: Option<bool>,
    /// Return schemas with each event type.
    pub with_content: Option<bool>,
}

impl From<ListOptions<EventTypeOut>> for EventTypeListOptions {
    fn from(page: ListOptions<EventTypeOut>) -> Self {
        Self {
            page,
            ..Default::default()
        }
    }
}

/// Event types known to the account.
#[derive(Debug, Clone)]
pub struct EventTypes {
    facade: Facade,
}

impl EventTypes {
    pub(crate) fn new(config: Arc<Configuration>) -> Self {
        Self {
            facade: Facade::new(config),
        }
    }

    /// List event types.
    ///
    /// Accepts plain [`ListOptions`] or [`EventTypeListOptions`].
    ///
    /// # Example
    ///
    /// ```no_run
    /// # use svix_client::{collect_all, EventTypeListOptions, ListOptions, Svix};
    /// # async fn example(svix: &Svix) -> svix_client::Result<()> {
    /// let all = collect_all(ListOptions::default().with_limit(100), |page| {
    ///     svix.event_types().list(EventTypeListOptions {
    ///         page,
    ///         include_archived: Some(true),
    ///         ..Default::default()
    ///     })
    /// })
    /// .await?;
    /// println!("{} event types", all.len());
    /// # Ok(())
    /// # }
    /// ```
    pub async fn list(&self, options: impl Into<EventTypeListOptions>) -> Result<Page<EventTypeOut>> {
        let options = options.into();
        let filters = [
            flag("include_archived", options.include_archived),
            flag("with_content", options.with_content),
        ]
        .into_iter()
        .flatten()
        .collect();

        self.facade
            .list("api/v1/event-type".to_string(), &options.page, filters)
            .await
    }

    pub async fn create(&self, event_type: &EventTypeIn) -> Result<EventTypeOut> {
        self.create_with_options(event_type, PostOptions::default())
            .await
    }

    pub async fn create_with_options(
        &self,
        event_type: &EventTypeIn,
        options: PostOptions,
    ) -> Result<EventTypeOut> {
        self.facade
            .create("api/v1/event-type".to_string(), event_type, options)
            .await
    }

    pub async fn get(&self, event_type_name: &str) -> Result<EventTypeOut> {
        let name = path_id("event_type_name", event_type_name)?;
        self.facade.get(format!("api/v1/event-type/{}", name)).await
    }

    pub async fn update(
        &self,
        event_type_name: &str,
        event_type: &EventTypeUpdate,
    ) -> Result<EventTypeOut> {
        let name = path_id("event_type_name", event_type_name)?;
        self.facade
            .update(format!("api/v1/event-type/{}", name), event_type)
            .await
    }

    /// Archive an event type. Archived types are hidden from listings by default.
    pub async fn delete(&self, event_type_name: &str) -> Result<()> {
        let name = path_id("event_type_name", event_type_name)?;
        self.facade
            .delete(format!("api/v1/event-type/{}", name))
            .await
    }
}
