//! JSON API exposure
//!
//! Card CRUD over the shared store plus the keystroke helpers that drive
//! the add-card inputs:
//!
//! - `GET    /api/cards`                    list, same query string as `/cards`
//! - `POST   /api/cards`                    submit the add-card form
//! - `GET    /api/cards/{id}`               one card
//! - `DELETE /api/cards/{id}`               delete, no-op for unknown ids
//! - `POST   /api/form/validate`            field errors without submitting
//! - `POST   /api/input/expiry`             separator mask for the expiry field
//! - `POST   /api/input/number`             change one number group
//! - `POST   /api/input/number/backspace`   backspace on a number group
//! - `POST   /api/input/number/paste`       paste over all groups (feature flag)

use crate::core::card::Card;
use crate::core::error::{CardError, CardWalletResult, ValidationError};
use crate::core::expiry::mask_expiry_input;
use crate::core::form::{CardForm, CardFormInput, SubmitOutcome};
use crate::core::number_input::NumberGroups;
use crate::core::query::CardQueryParams;
use crate::server::state::AppState;
use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
};
use serde::Deserialize;
use serde_json::{Value, json};
use uuid::Uuid;

/// Keystroke on the expiry field
#[derive(Debug, Deserialize)]
pub struct ExpiryKeystroke {
    #[serde(rename = "new")]
    pub new_value: String,
    #[serde(rename = "old", default)]
    pub old_value: String,
}

/// Keystroke on one number group
#[derive(Debug, Deserialize)]
pub struct NumberKeystroke {
    #[serde(default)]
    pub groups: Vec<String>,
    pub index: usize,
    #[serde(default)]
    pub value: String,
}

/// Clipboard paste into the number groups
#[derive(Debug, Deserialize)]
pub struct NumberPaste {
    #[serde(default)]
    pub groups: Vec<String>,
    pub text: String,
}

/// REST API exposure implementation
pub struct RestExposure;

impl RestExposure {
    pub fn build_router(state: AppState) -> Router {
        Router::new()
            .route("/health", get(Self::health_check))
            .route("/healthz", get(Self::health_check))
            .route("/api/cards", get(Self::list_cards).post(Self::create_card))
            .route(
                "/api/cards/{id}",
                get(Self::get_card).delete(Self::delete_card),
            )
            .route("/api/form/validate", post(Self::validate_form))
            .route("/api/input/expiry", post(Self::mask_expiry))
            .route("/api/input/number", post(Self::change_number_group))
            .route(
                "/api/input/number/backspace",
                post(Self::number_backspace),
            )
            .route("/api/input/number/paste", post(Self::paste_number))
            .with_state(state)
    }

    async fn health_check() -> Json<Value> {
        Json(json!({
            "status": "ok",
            "service": "cardwallet"
        }))
    }

    async fn list_cards(
        State(state): State<AppState>,
        Query(params): Query<CardQueryParams>,
    ) -> CardWalletResult<Json<Value>> {
        let cards = state.store.query(&params.filter(), params.sort())?;
        Ok(Json(json!({
            "count": cards.len(),
            "cards": cards,
        })))
    }

    async fn create_card(
        State(state): State<AppState>,
        Json(input): Json<CardFormInput>,
    ) -> CardWalletResult<(StatusCode, Json<Card>)> {
        let mut form = CardForm::from_input(input);
        let rules = state.config.form.rules();

        match form.submit(state.today(), &rules, |card| state.store.add(card))? {
            SubmitOutcome::Added(card) => Ok((StatusCode::CREATED, Json(card))),
            SubmitOutcome::Invalid(errors) => Err(ValidationError::FieldErrors(errors).into()),
            SubmitOutcome::Rejected(e) => Err(e.into()),
        }
    }

    async fn get_card(
        State(state): State<AppState>,
        Path(id): Path<String>,
    ) -> CardWalletResult<Json<Card>> {
        let id = Uuid::parse_str(&id)?;
        state
            .store
            .get_by_id(&id)?
            .map(Json)
            .ok_or_else(|| CardError::NotFound { id }.into())
    }

    async fn delete_card(
        State(state): State<AppState>,
        Path(id): Path<String>,
    ) -> CardWalletResult<StatusCode> {
        let id = Uuid::parse_str(&id)?;
        state.store.delete(&id)?;
        Ok(StatusCode::NO_CONTENT)
    }

    async fn validate_form(
        State(state): State<AppState>,
        Json(input): Json<CardFormInput>,
    ) -> Json<Value> {
        let mut form = CardForm::from_input(input);
        let valid = form
            .validate(state.today(), &state.config.form.rules())
            .is_ok();

        Json(json!({
            "valid": valid,
            "errors": form.errors(),
            "type": form.number.card_type(),
            "can_submit": form.can_submit(),
        }))
    }

    async fn mask_expiry(Json(keystroke): Json<ExpiryKeystroke>) -> Json<Value> {
        Json(json!({
            "value": mask_expiry_input(&keystroke.new_value, &keystroke.old_value),
        }))
    }

    async fn change_number_group(Json(keystroke): Json<NumberKeystroke>) -> Json<Value> {
        let mut input = NumberGroups::from_groups(&keystroke.groups).focused(keystroke.index);
        input.change(keystroke.index, &keystroke.value);
        Json(number_state(&input))
    }

    async fn number_backspace(Json(keystroke): Json<NumberKeystroke>) -> Json<Value> {
        let mut input = NumberGroups::from_groups(&keystroke.groups).focused(keystroke.index);
        input.backspace(keystroke.index);
        Json(number_state(&input))
    }

    async fn paste_number(
        State(state): State<AppState>,
        Json(paste): Json<NumberPaste>,
    ) -> Json<Value> {
        let mut input = NumberGroups::from_groups(&paste.groups);
        let applied = state.config.form.paste_autofill;
        if applied {
            input.paste(&paste.text);
        }

        let mut body = number_state(&input);
        body["applied"] = json!(applied);
        Json(body)
    }
}

fn number_state(input: &NumberGroups) -> Value {
    json!({
        "groups": input.groups(),
        "number": input.number(),
        "type": input.card_type(),
        "focus": input.focus(),
    })
}
