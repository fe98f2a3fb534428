//! Handler for visit listing.

use axum::{Json, extract::State, http::HeaderMap};

use crate::api::dto::visit::VisitResponse;
use crate::api::extract::RangeParam;
use crate::api::handlers::links::content_range_headers;
use crate::error::AppError;
use crate::state::AppState;

/// Lists recorded redirects ordered by id.
///
/// # Endpoint
///
/// `GET /api/link_visits`
///
/// Paging follows `GET /api/links`, reported as
/// `Content-Range: link_visits <from>-<to>/<total>`.
pub async fn list_visits_handler(
    State(state): State<AppState>,
    RangeParam(range): RangeParam,
) -> Result<(HeaderMap, Json<Vec<VisitResponse>>), AppError> {
    let page = state.visit_service.list_visits(range).await?;

    let headers = content_range_headers(&page.content_range("link_visits"))?;
    let page = page.map(VisitResponse::from);

    Ok((headers, Json(page.items)))
}
