//! Utility functions shared across layers.
//!
//! - [`code_generator`] - Random short code generation
//! - [`db_error`] - Datastore constraint classification
//! - [`client_ip`] - Client address resolution for visit records

pub mod client_ip;
pub mod code_generator;
pub mod db_error;
