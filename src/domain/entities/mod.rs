//! Core domain entities.
//!
//! - [`Link`] - A short code to URL mapping
//! - [`Visit`] - A recorded redirect served for a link
//!
//! Creation inputs live in separate structs (`NewLink`, `NewVisit`) and link
//! replacement in `UpdateLink`.

pub mod link;
pub mod visit;

pub use link::{Link, NewLink, UpdateLink};
pub use visit::{NewVisit, Visit};
