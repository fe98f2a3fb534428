//! Liveness probe.

/// `GET /ping` answers `pong` without touching the datastore.
pub async fn ping_handler() -> &'static str {
    "pong"
}
