//! Server module for building the card wallet HTTP server
//!
//! `ServerBuilder` wires the shared card store, configuration and page
//! templates into one router serving:
//! - HTML pages for adding, listing and viewing cards
//! - A JSON API over the same store and form rules

pub mod builder;
pub mod exposure;
pub mod state;
pub mod templates;

pub use builder::ServerBuilder;
pub use exposure::{HtmlExposure, RestExposure};
pub use state::AppState;
