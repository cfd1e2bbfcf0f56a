//! Delivery attempt operations.
//!
//! Attempts can be viewed from either side: the attempts made for one message, or the
//! attempts made against one endpoint. Both lists accept the same filters.

use crate::client::Configuration;
use crate::error::Result;
use crate::facade::{flag, path_id, repeated, timestamp, Facade};
use crate::pagination::{ListOptions, Page};
use crate::types::{
    EndpointMessageOut, MessageAttemptOut, MessageEndpointOut, MessageStatus, StatusCodeClass,
};
use chrono::{DateTime, Utc};
use std::sync::Arc;

/// Filters for listing delivery attempts.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MessageAttemptListOptions {
    /// Cursor and page size.
    pub page: ListOptions<MessageAttemptOut>,
    /// Only attempts with this outcome.
    pub status: Option<MessageStatus>,
    /// Only attempts whose response falls in this class.
    pub status_code_class: Option<StatusCodeClass>,
    /// Only attempts for messages of these event types.
    pub event_types: Option<Vec<String>>,
    /// Only attempts for messages on this channel.
    pub channel: Option<String>,
    /// Only attempts made before this time.
    pub before: Option<DateTime<Utc>>,
    /// Only attempts made after this time.
    pub after: Option<DateTime<Utc>>,
}

impl From<ListOptions<MessageAttemptOut>> for MessageAttemptListOptions {
    fn from(page: ListOptions<MessageAttemptOut>) -> Self {
        Self {
            page,
            ..Default::default()
        }
    }
}

impl MessageAttemptListOptions {
    fn filters(&self) -> Vec<(String, String)> {
        let mut filters = Vec::new();
        filters.extend(status(self.status));
        if let Some(class) = self.status_code_class {
            filters.push(("status_code_class".to_string(), class.as_i16().to_string()));
        }
        filters.extend(repeated("event_types", self.event_types.as_deref()));
        filters.extend(self.channel.clone().map(|c| ("channel".to_string(), c)));
        filters.extend(timestamp("before", self.before));
        filters.extend(timestamp("after", self.after));
        filters
    }
}

/// Filters for [`MessageAttempts::list_attempted_messages`].
///
/// Unlike attempt listings, this route has no response-class filter but can leave out
/// message payloads.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EndpointMessageListOptions {
    /// Cursor and page size.
    pub page: ListOptions<EndpointMessageOut>,
    /// Only messages whose delivery to the endpoint has this state.
    pub status: Option<MessageStatus>,
    /// Only messages of these event types.
    pub event_types: Option<Vec<String>>,
    /// Only messages on this channel.
    pub channel: Option<String>,
    /// Only messages created before this time.
    pub before: Option<DateTime<Utc>>,
    /// Only messages created after this time.
    pub after: Option<DateTime<Utc>>,
    /// Include payloads; `false` returns lighter items.
    pub with_content: Option<bool>,
}

impl From<ListOptions<EndpointMessageOut>> for EndpointMessageListOptions {
    fn from(page: ListOptions<EndpointMessageOut>) -> Self {
        Self {
            page,
            ..Default::default()
        }
    }
}

impl EndpointMessageListOptions {
    fn filters(&self) -> Vec<(String, String)> {
        let mut filters = Vec::new();
        filters.extend(status(self.status));
        filters.extend(repeated("event_types", self.event_types.as_deref()));
        filters.extend(self.channel.clone().map(|c| ("channel".to_string(), c)));
        filters.extend(timestamp("before", self.before));
        filters.extend(timestamp("after", self.after));
        filters.extend(flag("with_content", self.with_content));
        filters
    }
}

fn status(value: Option<MessageStatus>) -> Option<(String, String)> {
    value.map(|s| ("status".to_string(), i16::from(s).to_string()))
}

/// Delivery attempts of messages to endpoints.
#[derive(Debug, Clone)]
pub struct MessageAttempts {
    facade: Facade,
}

impl MessageAttempts {
    pub(crate) fn new(config: Arc<Configuration>) -> Self {
        Self {
            facade: Facade::new(config),
        }
    }

    /// List the attempts made to deliver one message.
    ///
    /// # Example
    ///
    /// ```no_run
    /// # use svix_client::{MessageAttemptListOptions, MessageStatus, Svix};
    /// # async fn example(svix: &Svix) -> Result<(), Box<dyn std::error::Error>> {
    /// let failed = svix
    ///     .message_attempts()
    ///     .list_by_msg(
    ///         "app_2Jx",
    ///         "msg_9Qa",
    ///         MessageAttemptListOptions {
    ///             status: Some(MessageStatus::Fail),
    ///             ..Default::default()
    ///         },
    ///     )
    ///     .await?;
    /// for attempt in failed.items {
    ///     println!("{} -> {}", attempt.endpoint_id, attempt.response_status_code);
    /// }
    /// # Ok(())
    /// # }
    /// ```
    pub async fn list_by_msg(
        &self,
        app_id: &str,
        msg_id: &str,
        options: impl Into<MessageAttemptListOptions>,
    ) -> Result<Page<MessageAttemptOut>> {
        let app_id = path_id("app_id", app_id)?;
        let msg_id = path_id("msg_id", msg_id)?;
        let options = options.into();
        self.facade
            .list(
                format!("api/v1/app/{}/attempt/msg/{}", app_id, msg_id),
                &options.page,
                options.filters(),
            )
            .await
    }

    /// List the attempts made against one endpoint.
    pub async fn list_by_endpoint(
        &self,
        app_id: &str,
        endpoint_id: &str,
        options: impl Into<MessageAttemptListOptions>,
    ) -> Result<Page<MessageAttemptOut>> {
        let app_id = path_id("app_id", app_id)?;
        let endpoint_id = path_id("endpoint_id", endpoint_id)?;
        let options = options.into();
        self.facade
            .list(
                format!("api/v1/app/{}/attempt/endpoint/{}", app_id, endpoint_id),
                &options.page,
                options.filters(),
            )
            .await
    }

    /// List the messages delivered to an endpoint, with their delivery state.
    pub async fn list_attempted_messages(
        &self,
        app_id: &str,
        endpoint_id: &str,
        options: impl Into<EndpointMessageListOptions>,
    ) -> Result<Page<EndpointMessageOut>> {
        let app_id = path_id("app_id", app_id)?;
        let endpoint_id = path_id("endpoint_id", endpoint_id)?;
        let options = options.into();
        self.facade
            .list(
                format!("api/v1/app/{}/endpoint/{}/msg", app_id, endpoint_id),
                &options.page,
                options.filters(),
            )
            .await
    }

    /// List the endpoints a message was sent to, with their delivery state.
    pub async fn list_attempted_destinations(
        &self,
        app_id: &str,
        msg_id: &str,
        options: ListOptions<MessageEndpointOut>,
    ) -> Result<Page<MessageEndpointOut>> {
        let app_id = path_id("app_id", app_id)?;
        let msg_id = path_id("msg_id", msg_id)?;
        self.facade
            .list(
                format!("api/v1/app/{}/msg/{}/endpoint", app_id, msg_id),
                &options,
                Vec::new(),
            )
            .await
    }

    pub async fn get(
        &self,
        app_id: &str,
        msg_id: &str,
        attempt_id: &str,
    ) -> Result<MessageAttemptOut> {
        let app_id = path_id("app_id", app_id)?;
        let msg_id = path_id("msg_id", msg_id)?;
        let attempt_id = path_id("attempt_id", attempt_id)?;
        self.facade
            .get(format!(
                "api/v1/app/{}/msg/{}/attempt/{}",
                app_id, msg_id, attempt_id
            ))
            .await
    }

    /// Queue a new delivery of a message to one endpoint.
    pub async fn resend(&self, app_id: &str, msg_id: &str, endpoint_id: &str) -> Result<()> {
        let app_id = path_id("app_id", app_id)?;
        let msg_id = path_id("msg_id", msg_id)?;
        let endpoint_id = path_id("endpoint_id", endpoint_id)?;
        self.facade
            .action::<()>(
                format!(
                    "api/v1/app/{}/msg/{}/endpoint/{}/resend",
                    app_id, msg_id, endpoint_id
                ),
                None,
            )
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filters_use_numeric_codes() {
        let options = MessageAttemptListOptions {
            status: Some(MessageStatus::Fail),
            status_code_class: Some(StatusCodeClass::Code5xx),
            ..Default::default()
        };
        assert_eq!(
            options.filters(),
            vec![
                ("status".to_string(), "2".to_string()),
                ("status_code_class".to_string(), "500".to_string()),
            ]
        );
    }

    #[test]
    fn test_attempted_message_filters() {
        let options = EndpointMessageListOptions {
            status: Some(MessageStatus::Pending),
            channel: Some("project_1".to_string()),
            with_content: Some(false),
            ..Default::default()
        };
        assert_eq!(
            options.filters(),
            vec![
                ("status".to_string(), "1".to_string()),
                ("channel".to_string(), "project_1".to_string()),
                ("with_content".to_string(), "false".to_string()),
            ]
        );
    }
}
