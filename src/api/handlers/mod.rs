//! HTTP request handlers for API endpoints.
//!
//! Each handler module corresponds to a logical grouping of endpoints.

pub mod links;
pub mod ping;
pub mod redirect;
pub mod visits;

pub use links::{
    create_link_handler, delete_link_handler, get_link_handler, list_links_handler,
    update_link_handler,
};
pub use ping::ping_handler;
pub use redirect::redirect_handler;
pub use visits::list_visits_handler;
