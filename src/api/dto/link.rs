//! DTOs for link endpoints.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::sync::LazyLock;
use url::Url;
use validator::{Validate, ValidationError};

use crate::domain::entities::{Link, UpdateLink};

/// Short codes: 3 to 32 characters of `[a-zA-Z0-9_-]`.
static SHORT_NAME_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z0-9_-]{3,32}$").unwrap());

/// Body of `POST /api/links`, as JSON or as a urlencoded form.
///
/// Missing fields deserialize to their defaults so that absent values are
/// reported as validation failures rather than parse failures.
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(default)]
pub struct CreateLinkRequest {
    #[validate(custom(function = "validate_original_url"))]
    pub original_url: String,

    /// Generated when absent or blank.
    #[validate(custom(function = "validate_short_name"))]
    pub short_name: Option<String>,
}

impl CreateLinkRequest {
    /// Trims both fields and drops a blank short code.
    pub fn normalized(self) -> Self {
        Self {
            original_url: self.original_url.trim().to_string(),
            short_name: self
                .short_name
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty()),
        }
    }
}

/// Body of `PUT /api/links/{id}`. Both fields are required.
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(default)]
pub struct UpdateLinkRequest {
    #[validate(custom(function = "validate_original_url"))]
    pub original_url: String,

    #[validate(custom(function = "validate_short_name"))]
    pub short_name: String,
}

impl UpdateLinkRequest {
    pub fn normalized(self) -> Self {
        Self {
            original_url: self.original_url.trim().to_string(),
            short_name: self.short_name.trim().to_string(),
        }
    }
}

impl From<UpdateLinkRequest> for UpdateLink {
    fn from(req: UpdateLinkRequest) -> Self {
        UpdateLink {
            original_url: req.original_url,
            short_name: req.short_name,
        }
    }
}

/// JSON representation of a link.
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct LinkResponse {
    pub id: i64,
    pub original_url: String,
    pub short_name: String,
    pub short_url: String,
}

impl LinkResponse {
    pub fn new(link: Link, short_url: String) -> Self {
        Self {
            id: link.id,
            original_url: link.original_url,
            short_name: link.short_name,
            short_url,
        }
    }
}

/// Returns `true` if `value` is a well-formed short code.
pub fn is_valid_short_name(value: &str) -> bool {
    SHORT_NAME_REGEX.is_match(value)
}

fn field_error(code: &'static str, message: &'static str) -> ValidationError {
    ValidationError::new(code).with_message(Cow::Borrowed(message))
}

/// Requires an absolute `http` or `https` URL with a host.
fn validate_original_url(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(field_error("required", "original_url is required"));
    }

    // The URL parser drops tabs and newlines silently, but the raw value is
    // what ends up in the `Location` header.
    if value.chars().any(char::is_control) {
        return Err(field_error("url", "original_url is invalid"));
    }

    let url = Url::parse(value).map_err(|_| field_error("url", "original_url is invalid"))?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(field_error(
            "url_scheme",
            "original_url must start with http or https",
        ));
    }

    if url.host_str().is_none_or(str::is_empty) {
        return Err(field_error("url", "original_url is invalid"));
    }

    Ok(())
}

fn validate_short_name(value: &str) -> Result<(), ValidationError> {
    if value.is_empty() {
        return Err(field_error("required", "short_name is required"));
    }

    if !is_valid_short_name(value) {
        return Err(field_error("short_name", "short_name is invalid"));
    }

    Ok(())
}
