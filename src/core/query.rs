//! Card list filters, sort keys and their query-string form

use super::card::{Card, CardType};
use super::expiry::parse_expiry;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Comparison applied by an expiry filter
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Comparing {
    Less,
    #[default]
    More,
    Equal,
}

impl Comparing {
    fn accepts(&self, ordering: Ordering) -> bool {
        match self {
            Comparing::Less => ordering == Ordering::Less,
            Comparing::More => ordering == Ordering::Greater,
            Comparing::Equal => ordering == Ordering::Equal,
        }
    }
}

/// Compare card expiry against a target `MM/YY`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpiryFilter {
    pub date: String,
    pub comp: Comparing,
}

/// Filter over the card list; present predicates are combined with AND
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardFilter {
    pub exp_date: Option<ExpiryFilter>,
    #[serde(rename = "type")]
    pub card_type: Option<CardType>,
    /// Requested type that names no known network; matches no card
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unknown_type: Option<String>,
    /// Substring of the card name; empty matches every card
    pub name: Option<String>,
}

impl CardFilter {
    pub fn is_empty(&self) -> bool {
        self.exp_date.is_none()
            && self.card_type.is_none()
            && self.unknown_type.is_none()
            && self.name.as_deref().is_none_or(str::is_empty)
    }

    /// Build a predicate for the filter
    ///
    /// The target date is parsed once. A target that does not parse matches
    /// no card, and neither does an unknown type.
    pub fn matcher(&self) -> impl Fn(&Card) -> bool + '_ {
        let target: Option<(Option<NaiveDate>, Comparing)> = self
            .exp_date
            .as_ref()
            .map(|f| (parse_expiry(&f.date), f.comp));

        move |card: &Card| {
            let expiry_ok = match &target {
                None => true,
                Some((None, _)) => false,
                Some((Some(date), comp)) => parse_expiry(&card.exp_date)
                    .is_some_and(|card_date| comp.accepts(card_date.cmp(date))),
            };

            let type_ok = self.unknown_type.is_none()
                && self
                    .card_type
                    .is_none_or(|wanted| card.card_type == Some(wanted));

            let name_ok = match self.name.as_deref() {
                None | Some("") => true,
                Some(needle) => card.name.as_deref().unwrap_or("").contains(needle),
            };

            expiry_ok && type_ok && name_ok
        }
    }
}

/// Sort key for the card list
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CardSort {
    /// Keep insertion order
    #[default]
    None,
    /// Ascending calendar order of expiry
    ExpDate,
    /// Ascending type label, untyped cards first
    Type,
}

impl CardSort {
    /// Stable in-place sort
    pub fn apply(&self, cards: &mut [Card]) {
        match self {
            CardSort::None => {}
            CardSort::ExpDate => cards.sort_by_cached_key(|c| parse_expiry(&c.exp_date)),
            CardSort::Type => cards.sort_by(|a, b| a.type_label().cmp(b.type_label())),
        }
    }
}

/// Query-string form of a filter and sort
///
/// # Example
/// ```text
/// GET /cards?exp_date=06/24&comp=more&type=visa&name=work&sort=exp_date
/// ```
/// Empty values are treated as absent, so an HTML form can submit every
/// control unconditionally.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct CardQueryParams {
    pub exp_date: Option<String>,
    pub comp: Option<Comparing>,
    #[serde(rename = "type")]
    pub card_type: Option<String>,
    pub name: Option<String>,
    pub sort: Option<String>,
}

impl CardQueryParams {
    pub fn filter(&self) -> CardFilter {
        let exp_date = non_empty(&self.exp_date).map(|date| ExpiryFilter {
            date: date.to_string(),
            comp: self.comp.unwrap_or_default(),
        });

        let mut card_type = None;
        let mut unknown_type = None;
        if let Some(t) = non_empty(&self.card_type) {
            match t.parse() {
                Ok(parsed) => card_type = Some(parsed),
                Err(e) => {
                    tracing::warn!("type filter matches no card: {}", e);
                    unknown_type = Some(t.to_string());
                }
            }
        }

        CardFilter {
            exp_date,
            card_type,
            unknown_type,
            name: non_empty(&self.name).map(String::from),
        }
    }

    pub fn sort(&self) -> CardSort {
        match non_empty(&self.sort) {
            Some("exp_date") | Some("expDate") => CardSort::ExpDate,
            Some("type") => CardSort::Type,
            _ => CardSort::None,
        }
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}
