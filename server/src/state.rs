//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into Axum handlers via the `State` extractor. It
//! holds the database pool, the parsed config, and the auth event channel.
//! Clone is required by Axum; every field is cheap to clone.

use std::sync::Arc;

use sqlx::PgPool;

use crate::config::Config;
use crate::services::events::AuthEvents;

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub config: Arc<Config>,
    pub events: AuthEvents,
}

impl AppState {
    #[must_use]
    pub fn new(pool: PgPool, config: Config) -> Self {
        let events = AuthEvents::new(config.auth_events_capacity);
        Self { pool, config: Arc::new(config), events }
    }
}

// =============================================================================
// TEST HELPERS
// =============================================================================
