//! DTOs for visit listing.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::entities::Visit;

/// JSON representation of a recorded redirect.
#[derive(Debug, Serialize, Deserialize)]
pub struct VisitResponse {
    pub id: i64,
    pub link_id: i64,
    pub created_at: DateTime<Utc>,
    pub ip: String,
    pub user_agent: String,
    pub status: i32,
}

impl From<Visit> for VisitResponse {
    fn from(v: Visit) -> Self {
        Self {
            id: v.id,
            link_id: v.link_id,
            created_at: v.created_at,
            ip: v.ip,
            user_agent: v.user_agent,
            status: v.status,
        }
    }
}
