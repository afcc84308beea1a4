//! Add-card form: raw values, schema validation and submission
//!
//! The form keeps what the user typed, validates it against the card schema
//! and, when valid, hands a [`NewCard`] to the store. A store rejection is
//! kept as the top-level alert and leaves the typed values in place.

use super::card::{Card, NewCard};
use super::error::{CardError, CardWalletError, CardWalletResult, FieldValidationError};
use super::expiry::mask_expiry_input;
use super::number_input::NumberGroups;
use super::validation::{FieldRules, FormSchema, UnknownTypePolicy, filters, validators};
use chrono::NaiveDate;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::OnceLock;

/// Rules that vary with configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormRules {
    pub unknown_type_policy: UnknownTypePolicy,
    /// First expiry year that is no longer accepted
    pub max_year: i32,
}

impl Default for FormRules {
    fn default() -> Self {
        Self {
            unknown_type_policy: UnknownTypePolicy::default(),
            max_year: 2050,
        }
    }
}

/// Build the add-card schema for submissions made on `today`
pub fn card_schema(today: NaiveDate, rules: &FormRules) -> FormSchema {
    static CVV_REGEX: OnceLock<Regex> = OnceLock::new();
    let cvv = CVV_REGEX
        .get_or_init(|| Regex::new(r"^[0-9]{3}$").unwrap())
        .clone();

    FormSchema::new()
        .field(
            "number",
            FieldRules::new()
                .filter(filters::digits())
                .validate(validators::required("Card number is required"))
                .validate(validators::card_number_length(
                    rules.unknown_type_policy,
                    "Card number is invalid",
                )),
        )
        .field(
            "holder",
            FieldRules::new()
                .validate(validators::required("Holder name is required"))
                .validate(validators::min_length(4, "Holder name must be longer than 4")),
        )
        .field(
            "cvv",
            FieldRules::new()
                .validate(validators::required("CVV is required"))
                .validate(validators::pattern(cvv, "CVV is invalid")),
        )
        .field(
            "exp_date",
            FieldRules::new()
                .filter(filters::trim())
                .validate(validators::required("Expiration date is required"))
                .validate(validators::expiry_in_future(
                    today,
                    rules.max_year,
                    "Expiration date is invalid",
                )),
        )
        .field("name", FieldRules::new().filter(filters::trim()))
}

/// Raw add-card values as posted by the page or the JSON API
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CardFormInput {
    pub number0: String,
    pub number1: String,
    pub number2: String,
    pub number3: String,
    pub holder: String,
    pub cvv: String,
    pub exp_date: String,
    pub name: String,
}

/// What happened to a submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Stored; the form was reset
    Added(Card),
    /// At least one field is invalid; the store was not called
    Invalid(Vec<FieldValidationError>),
    /// The store refused the card; the form keeps its values
    Rejected(CardError),
}

/// Add-card form state
#[derive(Debug, Clone, Default)]
pub struct CardForm {
    pub number: NumberGroups,
    pub holder: String,
    pub cvv: String,
    pub exp_date: String,
    pub name: String,
    errors: Vec<FieldValidationError>,
    submit_error: Option<String>,
}

impl CardForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_input(input: CardFormInput) -> Self {
        Self {
            number: NumberGroups::from_groups(&[
                input.number0,
                input.number1,
                input.number2,
                input.number3,
            ]),
            holder: input.holder,
            cvv: input.cvv,
            exp_date: input.exp_date,
            name: input.name,
            ..Self::default()
        }
    }

    /// Current values in their posted form
    pub fn input(&self) -> CardFormInput {
        let [number0, number1, number2, number3] = self.number.groups().clone();
        CardFormInput {
            number0,
            number1,
            number2,
            number3,
            holder: self.holder.clone(),
            cvv: self.cvv.clone(),
            exp_date: self.exp_date.clone(),
            name: self.name.clone(),
        }
    }

    /// Apply an expiry keystroke through the separator mask
    pub fn type_exp_date(&mut self, raw: &str) {
        self.exp_date = mask_expiry_input(raw, &self.exp_date);
    }

    /// Field errors from the last validation
    pub fn errors(&self) -> &[FieldValidationError] {
        &self.errors
    }

    /// Error message for one field, if it is invalid
    pub fn error_for(&self, field: &str) -> Option<&str> {
        self.errors
            .iter()
            .find(|e| e.field == field)
            .map(|e| e.message.as_str())
    }

    /// Top-level alert left by a rejected submission
    pub fn submit_error(&self) -> Option<&str> {
        self.submit_error.as_deref()
    }

    /// Whether the submit control is enabled
    ///
    /// Submission is synchronous and holds `&mut self`, so a second submit
    /// cannot start while one is in flight; only field errors disable it.
    pub fn can_submit(&self) -> bool {
        self.errors.is_empty()
    }

    /// Run the schema and remember the field errors
    pub fn validate(
        &mut self,
        today: NaiveDate,
        rules: &FormRules,
    ) -> Result<NewCard, Vec<FieldValidationError>> {
        let result = card_schema(today, rules)
            .validate_and_filter(&self.values())
            .map(|values| self.build_card(values));

        self.errors = match &result {
            Ok(_) => Vec::new(),
            Err(errors) => errors.clone(),
        };
        result
    }

    /// Validate and, when valid, hand the card to `add`
    ///
    /// `add` is not called for an invalid form. A [`CardWalletError::Card`]
    /// from `add` is a rejection shown to the user; any other error is
    /// returned as is.
    pub fn submit<F>(
        &mut self,
        today: NaiveDate,
        rules: &FormRules,
        add: F,
    ) -> CardWalletResult<SubmitOutcome>
    where
        F: FnOnce(NewCard) -> CardWalletResult<Card>,
    {
        let card = match self.validate(today, rules) {
            Ok(card) => card,
            Err(errors) => return Ok(SubmitOutcome::Invalid(errors)),
        };

        self.submit_error = None;
        match add(card) {
            Ok(card) => {
                *self = Self::default();
                Ok(SubmitOutcome::Added(card))
            }
            Err(CardWalletError::Card(e)) => {
                tracing::warn!(error = %e, "card submission rejected");
                self.submit_error = Some(e.to_string());
                Ok(SubmitOutcome::Rejected(e))
            }
            Err(e) => Err(e),
        }
    }

    fn values(&self) -> BTreeMap<String, String> {
        BTreeMap::from([
            ("number".to_string(), self.number.number()),
            ("holder".to_string(), self.holder.clone()),
            ("cvv".to_string(), self.cvv.clone()),
            ("exp_date".to_string(), self.exp_date.clone()),
            ("name".to_string(), self.name.clone()),
        ])
    }

    fn build_card(&self, mut values: BTreeMap<String, String>) -> NewCard {
        let mut take = |field: &str| values.remove(field).unwrap_or_default();
        let number = take("number");
        let name = take("name");
        NewCard {
            number,
            holder: take("holder"),
            cvv: take("cvv"),
            exp_date: take("exp_date"),
            name: Some(name).filter(|n| !n.is_empty()),
        }
    }
}
