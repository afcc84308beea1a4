//! # Card Wallet
//!
//! A small credit-card manager served over HTTP.
//!
//! ## Features
//!
//! - **In-memory card store**: unique numbers, ids never reused
//! - **Add-card form**: schema validation with per-field messages
//! - **Number input**: four digit groups with Visa/Mastercard detection
//! - **Expiry helpers**: `MM/YY` parsing, formatting and input masking
//! - **Queries**: filter by expiry, type and name, sort by expiry or type
//! - **Configuration-Based**: listener and form rules from YAML
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use cardwallet::prelude::*;
//!
//! let store = SharedCardStore::new();
//! let mut form = CardForm::new();
//! form.number.paste("4111111111111111");
//! form.holder = "Jane Doe".to_string();
//! // ...
//! let outcome = form.submit(today, &FormRules::default(), |card| store.add(card))?;
//! ```

pub mod config;
pub mod core;
pub mod server;
pub mod storage;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Core Types ===
    pub use crate::core::{
        Card, CardError, CardFilter, CardForm, CardFormInput, CardQueryParams, CardSort, CardType,
        CardWalletError, CardWalletResult, Comparing, ExpiryFilter, FormRules, NewCard,
        NumberGroups, QueryableStore, SubmitOutcome, ValidationError,
    };

    // === Expiry Helpers ===
    pub use crate::core::expiry::{format_expiry, mask_expiry_input, parse_expiry};

    // === Validation ===
    pub use crate::core::validation::{FieldRules, FormSchema, UnknownTypePolicy};

    // === Storage ===
    pub use crate::storage::{CardStore, SharedCardStore};

    // === Configuration ===
    pub use crate::config::AppConfig;

    // === Server ===
    pub use crate::server::{AppState, ServerBuilder};

    // === Re-exports from dependencies ===
    pub use chrono::NaiveDate;
    pub use uuid::Uuid;
}
