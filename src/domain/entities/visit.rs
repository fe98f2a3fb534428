//! Visit entity representing a single served redirect.

use chrono::{DateTime, Utc};

/// A redirect served for a link.
///
/// Visits are written once and never modified; they disappear only when their
/// link is deleted. Request metadata that was not available is stored as an
/// empty string.
#[derive(Debug, Clone, PartialEq)]
pub struct Visit {
    pub id: i64,
    pub link_id: i64,
    pub ip: String,
    pub user_agent: String,
    pub referer: String,
    /// HTTP status of the redirect that was served.
    pub status: i32,
    pub created_at: DateTime<Utc>,
}

/// Input data for recording a visit. The timestamp is set by the datastore.
#[derive(Debug, Clone, PartialEq)]
pub struct NewVisit {
    pub link_id: i64,
    pub ip: String,
    pub user_agent: String,
    pub referer: String,
    pub status: i32,
}
