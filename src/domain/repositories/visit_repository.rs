//! Repository trait for visit data access.

use crate::domain::entities::{NewVisit, Visit};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for recorded redirects.
///
/// Listings are ordered by ascending id.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait VisitRepository: Send + Sync {
    /// Records a visit.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Database`] if the link no longer exists or the
    /// insert fails.
    async fn create(&self, new_visit: NewVisit) -> Result<Visit, AppError>;

    /// Counts all visits.
    async fn count(&self) -> Result<i64, AppError>;

    /// Lists every visit.
    async fn list_all(&self) -> Result<Vec<Visit>, AppError>;

    /// Lists at most `limit` visits starting at `offset`.
    async fn list_range(&self, offset: i64, limit: i64) -> Result<Vec<Visit>, AppError>;
}
