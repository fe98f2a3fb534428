//! Repository trait for link data access.

use crate::domain::entities::{Link, NewLink, UpdateLink};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for managing links.
///
/// Listings are ordered by ascending id.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgLinkRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LinkRepository: Send + Sync {
    /// Counts all links.
    async fn count(&self) -> Result<i64, AppError>;

    /// Lists every link.
    async fn list_all(&self) -> Result<Vec<Link>, AppError>;

    /// Lists at most `limit` links starting at `offset`.
    async fn list_range(&self, offset: i64, limit: i64) -> Result<Vec<Link>, AppError>;

    /// Finds a link by id.
    async fn find_by_id(&self, id: i64) -> Result<Option<Link>, AppError>;

    /// Finds a link by exact short code.
    async fn find_by_short_name(&self, short_name: &str) -> Result<Option<Link>, AppError>;

    /// Inserts a link.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::ShortNameTaken`] if the short code is already used.
    /// Returns [`AppError::Database`] on other database errors.
    async fn create(&self, new_link: NewLink) -> Result<Link, AppError>;

    /// Overwrites both fields of an existing link.
    ///
    /// Returns `Ok(None)` if no link has this id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::ShortNameTaken`] if the new short code belongs to
    /// another link; the stored row is left unchanged.
    async fn update(&self, id: i64, update: UpdateLink) -> Result<Option<Link>, AppError>;

    /// Deletes a link and, through the foreign key, all of its visits.
    ///
    /// Returns the number of deleted links (0 or 1).
    async fn delete(&self, id: i64) -> Result<u64, AppError>;
}
