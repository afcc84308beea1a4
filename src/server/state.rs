//! Shared state handed to every request handler

use crate::config::AppConfig;
use crate::storage::SharedCardStore;
use chrono::NaiveDate;
use std::sync::Arc;
use tera::Tera;

/// Application state
///
/// Cloned per request; every clone points at the same card store.
#[derive(Clone)]
pub struct AppState {
    pub store: SharedCardStore,
    pub config: Arc<AppConfig>,
    pub templates: Arc<Tera>,
}

impl AppState {
    /// Date submissions are validated against
    pub fn today(&self) -> NaiveDate {
        chrono::Local::now().date_naive()
    }
}
