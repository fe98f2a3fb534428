//! Request extractors shared by the API handlers.

use axum::{
    Form, Json,
    extract::{ConnectInfo, FromRequest, FromRequestParts, Query, Request},
    http::{header, request::Parts},
};
use serde::{Deserialize, de::DeserializeOwned};
use std::{convert::Infallible, net::SocketAddr};

use crate::domain::pagination::RangeSpec;
use crate::error::AppError;
use crate::state::AppState;
use crate::utils::client_ip::{header_str, resolve_client_ip};

#[derive(Deserialize)]
struct RangeQuery {
    range: Option<String>,
}

/// Optional `[from,to]` listing window.
///
/// Read from the `range` query parameter, or from the `Range` header when the
/// parameter is absent. A blank value counts as absent. A present but
/// malformed value is rejected with `400 invalid range`.
#[derive(Debug, Clone, Copy)]
pub struct RangeParam(pub Option<RangeSpec>);

impl<S> FromRequestParts<S> for RangeParam
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let Query(query) = Query::<RangeQuery>::try_from_uri(&parts.uri)
            .map_err(|_| AppError::invalid_range())?;

        let raw = query
            .range
            .as_deref()
            .map(str::trim)
            .filter(|raw| !raw.is_empty())
            .or_else(|| {
                header_str(&parts.headers, &header::RANGE)
                    .map(str::trim)
                    .filter(|raw| !raw.is_empty())
            });

        raw.map(RangeSpec::parse)
            .transpose()
            .map(RangeParam)
    }
}

/// Address of the caller, resolved per the proxy setting in [`AppState`].
#[derive(Debug, Clone)]
pub struct ClientIp(pub String);

impl FromRequestParts<AppState> for ClientIp {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let peer = parts
            .extensions
            .get::<ConnectInfo<SocketAddr>>()
            .map(|ConnectInfo(addr)| *addr);

        Ok(ClientIp(resolve_client_ip(
            &parts.headers,
            peer,
            state.behind_proxy,
        )))
    }
}

/// Content type a [`LinkPayload`] was decoded from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodySource {
    Json,
    Form,
}

/// Request body accepted either as JSON or as a urlencoded form.
///
/// Any decoding failure, including an unsupported or missing content type,
/// is rejected with `400 invalid request`.
#[derive(Debug)]
pub struct LinkPayload<T> {
    pub body: T,
    pub source: BodySource,
}

impl<S, T> FromRequest<S> for LinkPayload<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let source = match body_source(&req) {
            Some(source) => source,
            None => return Err(AppError::invalid_request()),
        };

        let body = match source {
            BodySource::Json => Json::<T>::from_request(req, state)
                .await
                .map(|Json(body)| body)
                .map_err(|rejection| {
                    tracing::debug!(%rejection, "Rejected JSON body");
                    AppError::invalid_request()
                })?,
            BodySource::Form => Form::<T>::from_request(req, state)
                .await
                .map(|Form(body)| body)
                .map_err(|rejection| {
                    tracing::debug!(%rejection, "Rejected form body");
                    AppError::invalid_request()
                })?,
        };

        Ok(Self { body, source })
    }
}

fn body_source(req: &Request) -> Option<BodySource> {
    let content_type = header_str(req.headers(), &header::CONTENT_TYPE)?;
    let mime = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();

    if mime == "application/x-www-form-urlencoded" {
        Some(BodySource::Form)
    } else if mime == "application/json" || mime.ends_with("+json") {
        Some(BodySource::Json)
    } else {
        None
    }
}
