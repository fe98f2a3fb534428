//! Handler for short URL redirect.

use axum::{
    extract::{Path, State},
    http::{HeaderMap, HeaderValue, StatusCode, header},
    response::IntoResponse,
};

use crate::api::extract::ClientIp;
use crate::domain::entities::NewVisit;
use crate::error::AppError;
use crate::state::AppState;
use crate::utils::client_ip::header_str;

/// Counter of visits that could not be stored.
pub const VISIT_RECORD_FAILURES: &str = "shorty_visit_record_failures_total";

/// Redirects a short code to its original URL.
///
/// # Endpoint
///
/// `GET /r/{short_name}`
///
/// # Request Flow
///
/// 1. Trim the code and look the link up by exact match
/// 2. Build the `Location` value from the stored URL
/// 3. Store a visit with the caller address, `User-Agent`, `Referer` and the
///    status about to be sent
/// 4. Answer `302 Found` with `Location: <original_url>`
///
/// A failed visit insert is logged and counted but does not block the
/// redirect.
///
/// # Errors
///
/// Returns 404 Not Found if the code is blank or unknown, and 500 without
/// recording a visit if the stored URL is not a valid header value.
pub async fn redirect_handler(
    State(state): State<AppState>,
    Path(short_name): Path<String>,
    ClientIp(ip): ClientIp,
    headers: HeaderMap,
) -> Result<impl IntoResponse, AppError> {
    let link = state
        .link_service
        .get_link_by_short_name(&short_name)
        .await?;

    let location = HeaderValue::try_from(link.original_url.as_str()).map_err(|e| {
        AppError::Internal(format!("link {} has an unusable target URL: {e}", link.id))
    })?;

    let status = StatusCode::FOUND;

    let visit = NewVisit {
        link_id: link.id,
        ip,
        user_agent: header_str(&headers, &header::USER_AGENT)
            .unwrap_or_default()
            .to_string(),
        referer: header_str(&headers, &header::REFERER)
            .unwrap_or_default()
            .to_string(),
        status: i32::from(status.as_u16()),
    };

    if let Err(e) = state.visit_service.record(visit).await {
        tracing::error!(error = ?e, link_id = link.id, "Failed to record visit");
        metrics::counter!(VISIT_RECORD_FAILURES).increment(1);
    }

    Ok((status, [(header::LOCATION, location)]))
}
