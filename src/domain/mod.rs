//! Domain layer containing business entities and data access contracts.
//!
//! # Architecture
//!
//! - [`entities`] - Core data structures (links and their visits)
//! - [`pagination`] - Range windows over ordered collections
//! - [`repositories`] - Data access trait definitions
//!
//! Entities and range planning are plain data. Repository traits and range
//! parsing report failures as [`crate::error::AppError`], which carries the
//! HTTP mapping and wraps driver errors. Repository traits are implemented in
//! `crate::infrastructure::persistence`.

pub mod entities;
pub mod pagination;
pub mod repositories;
