//! Handlers for link management endpoints.

use axum::{
    Json,
    extract::{Path, State},
    http::{HeaderMap, HeaderValue, StatusCode, header},
};
use validator::Validate;

use crate::api::dto::link::{CreateLinkRequest, LinkResponse, UpdateLinkRequest};
use crate::api::extract::{BodySource, LinkPayload, RangeParam};
use crate::domain::entities::Link;
use crate::error::AppError;
use crate::state::AppState;

/// Lists links ordered by id.
///
/// # Endpoint
///
/// `GET /api/links`
///
/// # Paging
///
/// An optional `[from,to]` window is taken from the `range` query parameter or
/// the `Range` header. The response carries a `Content-Range` header:
///
/// ```text
/// Content-Range: links 0-9/12
/// ```
///
/// # Errors
///
/// Returns 400 Bad Request if the range is malformed.
pub async fn list_links_handler(
    State(state): State<AppState>,
    RangeParam(range): RangeParam,
) -> Result<(HeaderMap, Json<Vec<LinkResponse>>), AppError> {
    let page = state.link_service.list_links(range).await?;

    let headers = content_range_headers(&page.content_range("links"))?;
    let page = page.map(|link| to_response(&state, link));

    Ok((headers, Json(page.items)))
}

/// Creates a short link.
///
/// # Endpoint
///
/// `POST /api/links`
///
/// # Request Body
///
/// JSON or `application/x-www-form-urlencoded`:
///
/// ```json
/// {
///   "original_url": "https://example.com/some/long/path",
///   "short_name": "exmpl"   // optional, generated when absent
/// }
/// ```
///
/// # Errors
///
/// Returns 400 Bad Request if the body cannot be decoded.
/// Returns 422 Unprocessable Entity if a field fails validation.
/// Returns 409 Conflict if the short code is taken (JSON body), or 422 with a
/// `short_name` field error (form body).
pub async fn create_link_handler(
    State(state): State<AppState>,
    payload: LinkPayload<CreateLinkRequest>,
) -> Result<(StatusCode, Json<LinkResponse>), AppError> {
    let source = payload.source;
    let req = payload.body.normalized();
    req.validate()?;

    let link = state
        .link_service
        .create_link(req.original_url, req.short_name)
        .await
        .map_err(|e| match source {
            BodySource::Form => e.into_field_error(),
            BodySource::Json => e,
        })?;

    Ok((StatusCode::CREATED, Json(to_response(&state, link))))
}

/// Fetches one link.
///
/// `GET /api/links/{id}`
pub async fn get_link_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<LinkResponse>, AppError> {
    let id = parse_id(&id)?;
    let link = state.link_service.get_link(id).await?;

    Ok(Json(to_response(&state, link)))
}

/// Replaces the URL and short code of a link.
///
/// # Endpoint
///
/// `PUT /api/links/{id}`
///
/// # Errors
///
/// Returns 400 Bad Request for a bad id or an undecodable body.
/// Returns 422 Unprocessable Entity if a field fails validation.
/// Returns 404 Not Found if the link does not exist.
/// Returns 409 Conflict if the short code belongs to another link.
pub async fn update_link_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: LinkPayload<UpdateLinkRequest>,
) -> Result<Json<LinkResponse>, AppError> {
    let id = parse_id(&id)?;
    let req = payload.body.normalized();
    req.validate()?;

    let link = state.link_service.update_link(id, req.into()).await?;

    Ok(Json(to_response(&state, link)))
}

/// Deletes a link and, through the datastore, all of its visits.
///
/// `DELETE /api/links/{id}` answers 204 No Content.
pub async fn delete_link_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    let id = parse_id(&id)?;
    state.link_service.delete_link(id).await?;

    Ok(StatusCode::NO_CONTENT)
}

fn to_response(state: &AppState, link: Link) -> LinkResponse {
    let short_url = state.link_service.short_url(&link.short_name);
    LinkResponse::new(link, short_url)
}

/// Parses a path id. Only positive integers name a row.
pub(crate) fn parse_id(raw: &str) -> Result<i64, AppError> {
    match raw.trim().parse::<i64>() {
        Ok(id) if id > 0 => Ok(id),
        _ => Err(AppError::invalid_id()),
    }
}

/// Builds the `Content-Range` response header.
pub(crate) fn content_range_headers(value: &str) -> Result<HeaderMap, AppError> {
    let value = HeaderValue::from_str(value)
        .map_err(|e| AppError::Internal(format!("invalid Content-Range value: {e}")))?;

    let mut headers = HeaderMap::new();
    headers.insert(header::CONTENT_RANGE, value);
    Ok(headers)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_id() {
        assert_eq!(parse_id("42").unwrap(), 42);
        assert_eq!(parse_id(" 7 ").unwrap(), 7);
    }

    #[test]
    fn test_parse_id_rejects_non_positive_and_garbage() {
        for raw in ["0", "-3", "abc", "", "1.5", "99999999999999999999"] {
            let err = parse_id(raw).unwrap_err();
            assert_eq!(err.to_string(), "invalid id", "{raw}");
        }
    }

    #[test]
    fn test_content_range_header() {
        let headers = content_range_headers("links 0-2/3").unwrap();
        assert_eq!(headers[header::CONTENT_RANGE], "links 0-2/3");
    }
}
