//! Shared application state injected into handlers.

use std::sync::Arc;

use sqlx::PgPool;

use crate::application::services::{LinkService, VisitService};
use crate::config::Config;
use crate::infrastructure::persistence::{PgLinkRepository, PgVisitRepository};

#[derive(Clone)]
pub struct AppState {
    pub link_service: Arc<LinkService>,
    pub visit_service: Arc<VisitService>,
    /// Trust `X-Forwarded-For` / `X-Real-IP` for the visit address.
    pub behind_proxy: bool,
}

impl AppState {
    /// Wires the PostgreSQL repositories into the services.
    pub fn new(pool: PgPool, config: &Config) -> Self {
        let pool = Arc::new(pool);

        let link_service = LinkService::new(
            Arc::new(PgLinkRepository::new(pool.clone())),
            &config.base_url,
        )
        .with_code_policy(config.short_code_length, config.short_code_max_attempts);

        let visit_service = VisitService::new(Arc::new(PgVisitRepository::new(pool)));

        Self {
            link_service: Arc::new(link_service),
            visit_service: Arc::new(visit_service),
            behind_proxy: config.behind_proxy,
        }
    }
}
