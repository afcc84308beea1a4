//! Server-rendered pages
//!
//! - `GET /` add-card form, `POST /` submits it
//! - `GET /cards` filtered and sorted card list
//! - `GET /card/{id}` one card, number masked
//! - `POST /card/{id}/delete` delete then back to the list

use crate::core::card::Card;
use crate::core::error::CardWalletResult;
use crate::core::form::{CardForm, CardFormInput, SubmitOutcome};
use crate::core::query::CardQueryParams;
use crate::server::state::AppState;
use axum::{
    Form, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tera::Context;
use uuid::Uuid;

/// Fields that can carry an inline error on the add-card form
const FORM_FIELDS: [&str; 4] = ["number", "holder", "cvv", "exp_date"];

/// Card as shown on the list and detail pages
#[derive(Debug, Serialize)]
struct CardView<'a> {
    id: Uuid,
    name: &'a str,
    masked_number: String,
    exp_date: &'a str,
    holder: &'a str,
    type_label: &'static str,
}

impl<'a> From<&'a Card> for CardView<'a> {
    fn from(card: &'a Card) -> Self {
        Self {
            id: card.id,
            name: card.display_name(),
            masked_number: card.masked_number(),
            exp_date: &card.exp_date,
            holder: &card.holder,
            type_label: card.type_label(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct IndexParams {
    added: bool,
}

/// HTML page exposure
pub struct HtmlExposure;

impl HtmlExposure {
    pub fn build_router(state: AppState) -> Router {
        Router::new()
            .route("/", get(Self::index).post(Self::submit))
            .route("/cards", get(Self::list))
            .route("/card/{id}", get(Self::detail))
            .route("/card/{id}/delete", post(Self::delete))
            .with_state(state)
    }

    async fn index(
        State(state): State<AppState>,
        Query(params): Query<IndexParams>,
    ) -> CardWalletResult<Html<String>> {
        Self::render_form(&state, &CardForm::new(), params.added)
    }

    async fn submit(
        State(state): State<AppState>,
        Form(input): Form<CardFormInput>,
    ) -> CardWalletResult<Response> {
        let mut form = CardForm::from_input(input);
        let rules = state.config.form.rules();

        let outcome = form.submit(state.today(), &rules, |card| state.store.add(card))?;
        let response = match outcome {
            SubmitOutcome::Added(_) => Redirect::to("/?added=true").into_response(),
            SubmitOutcome::Invalid(_) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                Self::render_form(&state, &form, false)?,
            )
                .into_response(),
            SubmitOutcome::Rejected(_) => {
                (StatusCode::CONFLICT, Self::render_form(&state, &form, false)?).into_response()
            }
        };
        Ok(response)
    }

    async fn list(
        State(state): State<AppState>,
        Query(params): Query<CardQueryParams>,
    ) -> CardWalletResult<Html<String>> {
        let filter = params.filter();
        let sort = params.sort();
        let cards = state.store.query(&filter, sort)?;
        let views: Vec<CardView> = cards.iter().map(CardView::from).collect();

        let mut ctx = Context::new();
        ctx.insert("cards", &views);
        ctx.insert("total", &state.store.len()?);
        ctx.insert("exp_date", params.exp_date.as_deref().unwrap_or(""));
        ctx.insert("comp", &params.comp.unwrap_or_default());
        ctx.insert(
            "card_type",
            filter.card_type.map(|t| t.label()).unwrap_or(""),
        );
        ctx.insert("name", params.name.as_deref().unwrap_or(""));
        ctx.insert("sort", &sort);

        Ok(Html(state.templates.render("list.html", &ctx)?))
    }

    async fn detail(
        State(state): State<AppState>,
        Path(id): Path<String>,
    ) -> CardWalletResult<Response> {
        let card = match Uuid::parse_str(&id) {
            Ok(id) => state.store.get_by_id(&id)?,
            Err(_) => None,
        };

        let mut ctx = Context::new();
        ctx.insert("card", &card.as_ref().map(CardView::from));
        let page = Html(state.templates.render("detail.html", &ctx)?);

        let status = if card.is_some() {
            StatusCode::OK
        } else {
            StatusCode::NOT_FOUND
        };
        Ok((status, page).into_response())
    }

    async fn delete(
        State(state): State<AppState>,
        Path(id): Path<String>,
    ) -> CardWalletResult<Redirect> {
        let id = Uuid::parse_str(&id)?;
        state.store.delete(&id)?;
        Ok(Redirect::to("/cards"))
    }

    fn render_form(
        state: &AppState,
        form: &CardForm,
        added: bool,
    ) -> CardWalletResult<Html<String>> {
        let mut ctx = Context::new();
        ctx.insert("form", &form.input());
        ctx.insert("added", &added);
        ctx.insert(
            "card_type",
            form.number.card_type().map(|t| t.label()).unwrap_or(""),
        );
        ctx.insert("submit_error", &form.submit_error());

        let errors: BTreeMap<&str, &str> = FORM_FIELDS
            .into_iter()
            .map(|field| (field, form.error_for(field).unwrap_or("")))
            .collect();
        ctx.insert("errors", &errors);

        Ok(Html(state.templates.render("index.html", &ctx)?))
    }
}
