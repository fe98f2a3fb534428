//! Link CRUD service.

use std::sync::Arc;

use crate::domain::entities::{Link, NewLink, UpdateLink};
use crate::domain::pagination::{Page, RangeSpec, Window};
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;
use crate::utils::code_generator::{DEFAULT_CODE_LENGTH, generate_code};

/// Default number of insert attempts with generated codes.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 10;

/// Service for creating, reading, replacing and deleting links.
///
/// Input is expected to be validated by the caller. Uniqueness of short codes
/// is left to the datastore: a clash surfaces as [`AppError::ShortNameTaken`].
pub struct LinkService {
    link_repository: Arc<dyn LinkRepository>,
    base_url: String,
    code_length: usize,
    max_attempts: u32,
}

impl LinkService {
    /// Creates a new link service.
    ///
    /// `base_url` prefixes every short URL; a trailing slash is dropped.
    pub fn new(link_repository: Arc<dyn LinkRepository>, base_url: &str) -> Self {
        Self {
            link_repository,
            base_url: base_url.trim_end_matches('/').to_string(),
            code_length: DEFAULT_CODE_LENGTH,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }

    /// Overrides the generated code length and the number of insert attempts.
    pub fn with_code_policy(mut self, code_length: usize, max_attempts: u32) -> Self {
        self.code_length = code_length;
        self.max_attempts = max_attempts;
        self
    }

    /// Builds the public short URL for a code: `<base_url>/r/<short_name>`.
    pub fn short_url(&self, short_name: &str) -> String {
        format!("{}/r/{}", self.base_url, short_name)
    }

    /// Lists links ordered by id, optionally restricted to a range window.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Database`] on database errors.
    pub async fn list_links(&self, range: Option<RangeSpec>) -> Result<Page<Link>, AppError> {
        let total = self.link_repository.count().await?;

        let page = match Window::plan(range, total) {
            Window::All => Page::new(self.link_repository.list_all().await?, 0, total),
            Window::Slice { offset, limit } => Page::new(
                self.link_repository.list_range(offset, limit).await?,
                offset,
                total,
            ),
            Window::Empty => Page::empty(total),
        };

        Ok(page)
    }

    /// Retrieves a link by id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no link has this id.
    pub async fn get_link(&self, id: i64) -> Result<Link, AppError> {
        self.link_repository
            .find_by_id(id)
            .await?
            .ok_or_else(AppError::not_found)
    }

    /// Retrieves a link by short code. Surrounding whitespace is ignored.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the code is blank or unknown.
    pub async fn get_link_by_short_name(&self, short_name: &str) -> Result<Link, AppError> {
        let short_name = short_name.trim();
        if short_name.is_empty() {
            return Err(AppError::not_found());
        }

        self.link_repository
            .find_by_short_name(short_name)
            .await?
            .ok_or_else(AppError::not_found)
    }

    /// Creates a link.
    ///
    /// # Code Selection
    ///
    /// - If `short_name` is provided it is inserted as is
    /// - Otherwise a random code is generated; on a clash a fresh code is
    ///   tried, up to the configured number of attempts
    ///
    /// # Errors
    ///
    /// Returns [`AppError::ShortNameTaken`] if the provided code is in use.
    /// Returns [`AppError::CodeSpaceExhausted`] if every generated code clashed.
    pub async fn create_link(
        &self,
        original_url: String,
        short_name: Option<String>,
    ) -> Result<Link, AppError> {
        let link = match short_name {
            Some(short_name) => {
                self.link_repository
                    .create(NewLink {
                        original_url,
                        short_name,
                    })
                    .await?
            }
            None => self.create_with_generated_code(original_url).await?,
        };

        tracing::info!(id = link.id, short_name = %link.short_name, "Link created");
        Ok(link)
    }

    /// Replaces the URL and short code of a link.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no link has this id.
    /// Returns [`AppError::ShortNameTaken`] if the code belongs to another link.
    pub async fn update_link(&self, id: i64, update: UpdateLink) -> Result<Link, AppError> {
        self.link_repository
            .update(id, update)
            .await?
            .ok_or_else(AppError::not_found)
    }

    /// Deletes a link together with its visits.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no link has this id.
    pub async fn delete_link(&self, id: i64) -> Result<(), AppError> {
        if self.link_repository.delete(id).await? == 0 {
            return Err(AppError::not_found());
        }

        tracing::info!(id, "Link deleted");
        Ok(())
    }

    async fn create_with_generated_code(&self, original_url: String) -> Result<Link, AppError> {
        for attempt in 1..=self.max_attempts {
            let short_name = generate_code(self.code_length)
                .map_err(|e| AppError::Internal(format!("random source failed: {e}")))?;

            let new_link = NewLink {
                original_url: original_url.clone(),
                short_name,
            };

            match self.link_repository.create(new_link).await {
                Err(AppError::ShortNameTaken) => {
                    tracing::debug!(attempt, "Generated short code collided, retrying");
                }
                result => return result,
            }
        }

        Err(AppError::CodeSpaceExhausted {
            attempts: self.max_attempts,
        })
    }
}
