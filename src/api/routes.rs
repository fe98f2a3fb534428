//! API route configuration.

use crate::api::handlers::{
    create_link_handler, delete_link_handler, get_link_handler, list_links_handler,
    list_visits_handler, update_link_handler,
};
use crate::state::AppState;
use axum::{Router, routing::get};

/// Routes mounted under `/api`.
///
/// # Endpoints
///
/// - `GET    /links`        - List links (paged)
/// - `POST   /links`        - Create a link
/// - `GET    /links/{id}`   - Fetch a link
/// - `PUT    /links/{id}`   - Replace a link
/// - `DELETE /links/{id}`   - Delete a link and its visits
/// - `GET    /link_visits`  - List recorded redirects (paged)
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/links", get(list_links_handler).post(create_link_handler))
        .route(
            "/links/{id}",
            get(get_link_handler)
                .put(update_link_handler)
                .delete(delete_link_handler),
        )
        .route("/link_visits", get(list_visits_handler))
}
