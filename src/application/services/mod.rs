//! Business logic services for the application layer.

pub mod link_service;
pub mod visit_service;

pub use link_service::LinkService;
pub use visit_service::VisitService;
