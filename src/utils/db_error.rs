//! Datastore constraint classification.
//!
//! Handlers and services never look at driver error codes directly. They ask a
//! failed write which kind of constraint, if any, it ran into.

/// Unique constraint guarding `links.short_name`.
pub const SHORT_NAME_CONSTRAINT: &str = "links_short_name_key";

/// Capability of a driver error to report the constraint it violated.
pub trait ConstraintViolation {
    /// True if the write ran into a unique constraint.
    fn is_unique_violation(&self) -> bool;

    /// Name of the violated constraint when the driver reports it.
    fn constraint_name(&self) -> Option<&str>;

    /// True if this failure is a unique violation on `constraint`.
    ///
    /// A driver that does not report constraint names matches on kind alone.
    fn violates_unique(&self, constraint: &str) -> bool {
        self.is_unique_violation() && self.constraint_name().is_none_or(|name| name == constraint)
    }
}

impl ConstraintViolation for sqlx::Error {
    fn is_unique_violation(&self) -> bool {
        // Postgres reports SQLSTATE 23505.
        self.as_database_error()
            .is_some_and(|db_err| db_err.kind() == sqlx::error::ErrorKind::UniqueViolation)
    }

    fn constraint_name(&self) -> Option<&str> {
        self.as_database_error()?.constraint()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Reported(bool, Option<&'static str>);

    impl ConstraintViolation for Reported {
        fn is_unique_violation(&self) -> bool {
            self.0
        }

        fn constraint_name(&self) -> Option<&str> {
            self.1
        }
    }

    #[test]
    fn test_violates_matching_name() {
        let err = Reported(true, Some(SHORT_NAME_CONSTRAINT));
        assert!(err.violates_unique(SHORT_NAME_CONSTRAINT));
    }

    #[test]
    fn test_violates_other_constraint_name() {
        let err = Reported(true, Some("links_pkey"));
        assert!(!err.violates_unique(SHORT_NAME_CONSTRAINT));
    }

    #[test]
    fn test_violates_without_reported_name() {
        let err = Reported(true, None);
        assert!(err.violates_unique(SHORT_NAME_CONSTRAINT));
    }

    #[test]
    fn test_other_failure_is_not_unique() {
        let err = Reported(false, Some(SHORT_NAME_CONSTRAINT));
        assert!(!err.violates_unique(SHORT_NAME_CONSTRAINT));
    }

    #[test]
    fn test_non_database_sqlx_error_has_no_constraint() {
        let err = sqlx::Error::PoolTimedOut;
        assert!(!err.is_unique_violation());
        assert_eq!(err.constraint_name(), None);
    }
}
