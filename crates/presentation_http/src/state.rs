//! Application state shared across handlers

use std::sync::Arc;

use application::{AccountService, DatabaseHealthPort, RouteService};
use infrastructure::{AppConfig, PageRenderer};

use crate::session::SessionStore;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub route_service: Arc<RouteService>,
    pub account_service: Arc<AccountService>,
    pub sessions: Arc<SessionStore>,
    pub pages: PageRenderer,
    /// Readiness check target
    pub database: Arc<dyn DatabaseHealthPort>,
    pub config: Arc<AppConfig>,
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("route_service", &self.route_service)
            .field("sessions", &self.sessions.len())
            .finish_non_exhaustive()
    }
}
