//! Application error type and its HTTP mapping.
//!
//! Every handler returns `Result<_, AppError>`. The response body is one of two
//! envelopes:
//!
//! - `{"error": "<message>"}` for single-cause failures
//! - `{"errors": {"<field>": "<message>"}}` for field validation failures

use std::collections::BTreeMap;

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use validator::{ValidationErrors, ValidationErrorsKind};

use crate::utils::db_error::{ConstraintViolation, SHORT_NAME_CONSTRAINT};

/// Field name to message, ordered for stable output.
pub type FieldErrors = BTreeMap<String, String>;

/// Message reported for a short code clash in the form context.
pub const SHORT_NAME_IN_USE: &str = "short name already in use";

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Malformed request: unparseable body, bad id, bad range.
    #[error("{0}")]
    BadRequest(String),

    #[error("validation failed")]
    Validation(FieldErrors),

    #[error("{0}")]
    NotFound(String),

    /// The datastore rejected a write because the short code is already taken.
    #[error("short_name already exists")]
    ShortNameTaken,

    /// Every generated short code collided with an existing one.
    #[error("failed to generate unique short_name after {attempts} attempts")]
    CodeSpaceExhausted { attempts: u32 },

    #[error("{0}")]
    Internal(String),

    #[error("database error")]
    Database(#[source] sqlx::Error),
}

impl AppError {
    pub fn invalid_request() -> Self {
        Self::BadRequest("invalid request".to_string())
    }

    pub fn invalid_range() -> Self {
        Self::BadRequest("invalid range".to_string())
    }

    pub fn invalid_id() -> Self {
        Self::BadRequest("invalid id".to_string())
    }

    pub fn not_found() -> Self {
        Self::NotFound("not found".to_string())
    }

    pub fn field(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation(FieldErrors::from([(field.into(), message.into())]))
    }

    /// Re-reports a short code conflict as a per-field validation error.
    ///
    /// Used by the form submission path, which renders every rejection as a
    /// field message. Other variants pass through untouched.
    pub fn into_field_error(self) -> Self {
        match self {
            Self::ShortNameTaken => Self::field("short_name", SHORT_NAME_IN_USE),
            other => other,
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::ShortNameTaken => StatusCode::CONFLICT,
            Self::CodeSpaceExhausted { .. } | Self::Internal(_) | Self::Database(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    error: &'a str,
}

#[derive(Serialize)]
struct FieldErrorsBody {
    errors: FieldErrors,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        match self {
            Self::Validation(errors) => {
                (status, Json(FieldErrorsBody { errors })).into_response()
            }
            Self::Database(e) => {
                tracing::error!(error = %e, "Database error");
                (status, Json(ErrorBody { error: "db error" })).into_response()
            }
            Self::CodeSpaceExhausted { attempts } => {
                tracing::error!(attempts, "Short code generation exhausted");
                let body = ErrorBody {
                    error: "failed to generate unique short_name",
                };
                (status, Json(body)).into_response()
            }
            Self::Internal(message) => {
                tracing::error!(%message, "Internal error");
                let body = ErrorBody {
                    error: "internal server error",
                };
                (status, Json(body)).into_response()
            }
            other => {
                let message = other.to_string();
                (status, Json(ErrorBody { error: &message })).into_response()
            }
        }
    }
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        if e.violates_unique(SHORT_NAME_CONSTRAINT) {
            return Self::ShortNameTaken;
        }

        Self::Database(e)
    }
}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        let fields = errors
            .errors()
            .iter()
            .filter_map(|(field, kind)| {
                let ValidationErrorsKind::Field(list) = kind else {
                    return None;
                };
                let first = list.first()?;
                let message = first
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("{field} is invalid"));
                Some((field.to_string(), message))
            })
            .collect();

        Self::Validation(fields)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;
    use serde_json::Value;
    use validator::ValidationError;

    async fn body_json(err: AppError) -> (StatusCode, Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_bad_request_envelope() {
        let (status, body) = body_json(AppError::invalid_request()).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "invalid request");
    }

    #[tokio::test]
    async fn test_validation_envelope() {
        let (status, body) =
            body_json(AppError::field("original_url", "original_url is invalid")).await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["errors"]["original_url"], "original_url is invalid");
        assert!(body.get("error").is_none());
    }

    #[tokio::test]
    async fn test_short_name_taken_is_conflict() {
        let (status, body) = body_json(AppError::ShortNameTaken).await;

        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["error"], "short_name already exists");
    }

    #[tokio::test]
    async fn test_short_name_taken_in_form_context() {
        let (status, body) = body_json(AppError::ShortNameTaken.into_field_error()).await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["errors"]["short_name"], SHORT_NAME_IN_USE);
    }

    #[tokio::test]
    async fn test_into_field_error_keeps_other_variants() {
        let err = AppError::not_found().into_field_error();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_internal_errors_hide_details() {
        let (status, body) = body_json(AppError::Internal("secret detail".into())).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "internal server error");

        let (status, body) = body_json(AppError::Database(sqlx::Error::PoolTimedOut)).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "db error");
    }

    #[tokio::test]
    async fn test_code_space_exhausted_is_distinct() {
        let err = AppError::CodeSpaceExhausted { attempts: 10 };
        let (status, body) = body_json(err).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "failed to generate unique short_name");
    }

    #[test]
    fn test_non_constraint_sqlx_error_is_database() {
        let err = AppError::from(sqlx::Error::RowNotFound);
        assert!(matches!(err, AppError::Database(_)));
    }

    #[test]
    fn test_validation_errors_conversion_uses_message() {
        let mut errors = ValidationErrors::new();
        errors.add(
            "short_name",
            ValidationError::new("short_name").with_message("short_name is invalid".into()),
        );
        errors.add("original_url", ValidationError::new("url"));

        let AppError::Validation(fields) = AppError::from(errors) else {
            panic!("expected validation error");
        };

        assert_eq!(fields["short_name"], "short_name is invalid");
        assert_eq!(fields["original_url"], "original_url is invalid");
    }
}
