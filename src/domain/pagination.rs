//! Range windows over id-ordered collections.
//!
//! Clients select a slice with a `[from,to]` pair. The window starts at offset
//! `from` and holds `to - from` rows. Responses describe the returned slice
//! with a `Content-Range` value:
//!
//! ```text
//! links 0-9/12     ten rows starting at offset 0, twelve in total
//! links */12       nothing returned, twelve in total
//! ```

use crate::error::AppError;

/// A validated `[from,to]` range specifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RangeSpec {
    from: i64,
    to: i64,
}

impl RangeSpec {
    /// Builds a range, rejecting negative bounds and `to < from`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::BadRequest`] with `invalid range`.
    pub fn new(from: i64, to: i64) -> Result<Self, AppError> {
        if from < 0 || to < 0 || to < from {
            return Err(AppError::invalid_range());
        }

        Ok(Self { from, to })
    }

    /// Parses a JSON two-element array literal such as `[0,10]`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::BadRequest`] with `invalid range` if the input is not
    /// exactly two integers or violates [`RangeSpec::new`].
    pub fn parse(raw: &str) -> Result<Self, AppError> {
        let [from, to]: [i64; 2] =
            serde_json::from_str(raw.trim()).map_err(|_| AppError::invalid_range())?;

        Self::new(from, to)
    }

    pub fn from(&self) -> i64 {
        self.from
    }

    pub fn to(&self) -> i64 {
        self.to
    }

    /// Number of rows the window asks for.
    pub fn limit(&self) -> i64 {
        self.to - self.from
    }
}

/// What to fetch from storage for a listing request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Window {
    /// No range given: the whole collection.
    All,
    /// `limit` rows starting at `offset`.
    Slice { offset: i64, limit: i64 },
    /// The range cannot contain any row; skip the query.
    Empty,
}

impl Window {
    /// Decides the storage window for an optional range over `total` rows.
    pub fn plan(range: Option<RangeSpec>, total: i64) -> Self {
        match range {
            None => Self::All,
            Some(r) if r.limit() == 0 || r.from() >= total => Self::Empty,
            Some(r) => Self::Slice {
                offset: r.from(),
                limit: r.limit(),
            },
        }
    }
}

/// A slice of an ordered collection together with the collection size.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub offset: i64,
    pub total: i64,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, offset: i64, total: i64) -> Self {
        Self {
            items,
            offset,
            total,
        }
    }

    pub fn empty(total: i64) -> Self {
        Self::new(Vec::new(), 0, total)
    }

    /// Formats the `Content-Range` value for this page of `resource`.
    pub fn content_range(&self, resource: &str) -> String {
        if self.items.is_empty() {
            return format!("{resource} */{}", self.total);
        }

        let end = self.offset + self.items.len() as i64 - 1;
        format!("{resource} {}-{end}/{}", self.offset, self.total)
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            offset: self.offset,
            total: self.total,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_range() {
        let range = RangeSpec::parse("[0,10]").unwrap();
        assert_eq!(range.from(), 0);
        assert_eq!(range.to(), 10);
        assert_eq!(range.limit(), 10);
    }

    #[test]
    fn test_parse_tolerates_whitespace() {
        let range = RangeSpec::parse("  [ 5 , 9 ] ").unwrap();
        assert_eq!(range.from(), 5);
        assert_eq!(range.limit(), 4);
    }

    #[test]
    fn test_parse_rejects_malformed_input() {
        for raw in ["", "0,10", "[0]", "[0,10,20]", "[\"a\",1]", "[0.5,2]", "bytes=0-10"] {
            let err = RangeSpec::parse(raw).unwrap_err();
            assert!(matches!(err, AppError::BadRequest(_)), "{raw}");
        }
    }

    #[test]
    fn test_parse_rejects_negative_bounds() {
        assert!(RangeSpec::parse("[-1,10]").is_err());
        assert!(RangeSpec::parse("[0,-10]").is_err());
    }

    #[test]
    fn test_parse_rejects_reversed_bounds() {
        let err = RangeSpec::parse("[10,5]").unwrap_err();
        assert_eq!(err.to_string(), "invalid range");
    }

    #[test]
    fn test_plan_without_range_is_all() {
        assert_eq!(Window::plan(None, 3), Window::All);
        assert_eq!(Window::plan(None, 0), Window::All);
    }

    #[test]
    fn test_plan_slice() {
        let range = RangeSpec::new(2, 7).unwrap();
        assert_eq!(
            Window::plan(Some(range), 12),
            Window::Slice {
                offset: 2,
                limit: 5
            }
        );
    }

    #[test]
    fn test_plan_zero_length_is_empty() {
        let range = RangeSpec::new(3, 3).unwrap();
        assert_eq!(Window::plan(Some(range), 12), Window::Empty);
    }

    #[test]
    fn test_plan_past_the_end_is_empty() {
        let range = RangeSpec::new(12, 20).unwrap();
        assert_eq!(Window::plan(Some(range), 12), Window::Empty);

        let range = RangeSpec::new(0, 10).unwrap();
        assert_eq!(Window::plan(Some(range), 0), Window::Empty);
    }

    #[test]
    fn test_content_range_full_window() {
        let page = Page::new((0..10).collect(), 0, 12);
        assert_eq!(page.content_range("link_visits"), "link_visits 0-9/12");
    }

    #[test]
    fn test_content_range_short_window() {
        let page = Page::new(vec!['a', 'b', 'c'], 0, 3);
        assert_eq!(page.content_range("links"), "links 0-2/3");

        let page = Page::new(vec!['x', 'y'], 10, 12);
        assert_eq!(page.content_range("links"), "links 10-11/12");
    }

    #[test]
    fn test_content_range_empty() {
        let page: Page<i64> = Page::empty(0);
        assert_eq!(page.content_range("links"), "links */0");

        let page: Page<i64> = Page::empty(7);
        assert_eq!(page.content_range("links"), "links */7");
    }

    #[test]
    fn test_map_keeps_window() {
        let page = Page::new(vec![1, 2], 4, 9).map(|n| n * 10);
        assert_eq!(page.items, vec![10, 20]);
        assert_eq!(page.offset, 4);
        assert_eq!(page.total, 9);
    }
}
