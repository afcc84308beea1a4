//! Transport exposures built on top of [`AppState`](crate::server::AppState)
//!
//! - [`html`]: server-rendered pages for a browser
//! - [`rest`]: JSON API over the same store and form logic

pub mod html;
pub mod rest;

pub use html::HtmlExposure;
pub use rest::RestExposure;
