//! Core module containing the card model, input handling and validation

pub mod card;
pub mod error;
pub mod expiry;
pub mod form;
pub mod number_input;
pub mod query;
pub mod store;
pub mod validation;

pub use card::{Card, CardType, NewCard};
pub use error::{CardError, CardWalletError, CardWalletResult, ValidationError};
pub use form::{CardForm, CardFormInput, FormRules, SubmitOutcome};
pub use number_input::NumberGroups;
pub use query::{CardFilter, CardQueryParams, CardSort, Comparing, ExpiryFilter};
pub use store::QueryableStore;
