//! Application state shared across handlers.

use std::sync::Arc;

use sqlx::PgPool;

use crate::config::AppConfig;
use crate::services::geocoder::GeocoderClient;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: AppConfig,
    pool: PgPool,
    geocoder: GeocoderClient,
}

impl AppState {
    #[must_use]
    pub fn new(config: AppConfig, pool: PgPool, geocoder: GeocoderClient) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                config,
                pool,
                geocoder,
            }),
        }
    }

    #[must_use]
    pub fn config(&self) -> &AppConfig {
        &self.inner.config
    }

    #[must_use]
    pub fn pool(&self) -> &PgPool {
        &self.inner.pool
    }

    #[must_use]
    pub fn geocoder(&self) -> &GeocoderClient {
        &self.inner.geocoder
    }
}
