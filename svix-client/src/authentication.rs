//! Consumer dashboard sessions.

use crate::client::Configuration;
use crate::error::Result;
use crate::facade::{path_id, Facade};
use crate::transport::ApiRequest;
use crate::types::DashboardAccessOut;
use std::sync::Arc;

/// Login links and sessions for the consumer dashboard.
#[derive(Debug, Clone)]
pub struct Authentication {
    facade: Facade,
}

impl Authentication {
    pub(crate) fn new(config: Arc<Configuration>) -> Self {
        Self {
            facade: Facade::new(config),
        }
    }

    /// Get a one-time login link to the consumer dashboard of an application.
    pub async fn dashboard_access(&self, app_id: &str) -> Result<DashboardAccessOut> {
        let app_id = path_id("app_id", app_id)?;
        let request = ApiRequest::post(format!("api/v1/auth/dashboard-access/{}", app_id));
        self.facade.fetch(request).await
    }

    /// Invalidate the token the client was built with.
    ///
    /// Only dashboard session tokens can be logged out.
    pub async fn logout(&self) -> Result<()> {
        self.facade
            .action::<()>("api/v1/auth/logout".to_string(), None)
            .await
    }
}
