//! Visit recording and listing.

use std::sync::Arc;

use crate::domain::entities::{NewVisit, Visit};
use crate::domain::pagination::{Page, RangeSpec, Window};
use crate::domain::repositories::VisitRepository;
use crate::error::AppError;

/// Service for redirect visit records.
pub struct VisitService {
    visit_repository: Arc<dyn VisitRepository>,
}

impl VisitService {
    pub fn new(visit_repository: Arc<dyn VisitRepository>) -> Self {
        Self { visit_repository }
    }

    /// Stores one visit.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Database`] if the insert fails, including when the
    /// referenced link no longer exists.
    pub async fn record(&self, visit: NewVisit) -> Result<Visit, AppError> {
        self.visit_repository.create(visit).await
    }

    /// Lists visits ordered by id, optionally restricted to a range window.
    pub async fn list_visits(&self, range: Option<RangeSpec>) -> Result<Page<Visit>, AppError> {
        let total = self.visit_repository.count().await?;

        let page = match Window::plan(range, total) {
            Window::All => Page::new(self.visit_repository.list_all().await?, 0, total),
            Window::Slice { offset, limit } => Page::new(
                self.visit_repository.list_range(offset, limit).await?,
                offset,
                total,
            ),
            Window::Empty => Page::empty(total),
        };

        Ok(page)
    }
}
