//! Application layer services implementing business logic.
//!
//! Services coordinate repository calls and the rules that sit above storage:
//! short code generation, not-found reporting and range windows. HTTP handlers
//! only talk to these services.
//!
//! # Available Services
//!
//! - [`services::link_service::LinkService`] - Link CRUD and short URL derivation
//! - [`services::visit_service::VisitService`] - Visit recording and listing

pub mod services;
