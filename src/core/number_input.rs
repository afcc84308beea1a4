//! Card number entry split over four fixed-width digit groups
//!
//! Each keystroke replaces one group, re-derives the card type from the
//! joined digits and reports where input focus should go next.

use super::card::CardType;
use super::validation::filters::{digits_only, truncate};
use serde::{Deserialize, Serialize};

/// Number of digit groups
pub const GROUP_COUNT: usize = 4;

/// Digits per group
pub const GROUP_WIDTH: usize = 4;

/// Card number input state
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NumberGroups {
    groups: [String; GROUP_COUNT],
    focus: usize,
    card_type: Option<CardType>,
}

impl NumberGroups {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from raw group values, sanitizing each one
    pub fn from_groups<S: AsRef<str>>(groups: &[S]) -> Self {
        let mut input = Self::new();
        for (i, raw) in groups.iter().take(GROUP_COUNT).enumerate() {
            input.groups[i] = sanitize_group(raw.as_ref());
        }
        input.card_type = CardType::detect(&input.number());
        input
    }

    /// Move focus to group `index`, clamped to the last group
    pub fn focused(mut self, index: usize) -> Self {
        self.focus = index.min(GROUP_COUNT - 1);
        self
    }

    pub fn groups(&self) -> &[String; GROUP_COUNT] {
        &self.groups
    }

    /// Index of the group that holds focus
    pub fn focus(&self) -> usize {
        self.focus
    }

    pub fn card_type(&self) -> Option<CardType> {
        self.card_type
    }

    /// All groups joined into one digit string
    pub fn number(&self) -> String {
        self.groups.concat()
    }

    /// Handle a change of group `index`
    ///
    /// Non-digits are stripped and the value is cut to the group width. A
    /// full group moves focus forward, an emptied group moves it back.
    /// Out-of-range indexes are ignored.
    pub fn change(&mut self, index: usize, raw: &str) {
        if index >= GROUP_COUNT {
            return;
        }

        let value = sanitize_group(raw);
        let len = value.len();
        self.groups[index] = value;
        self.card_type = CardType::detect(&self.number());
        self.focus = index;

        if len == GROUP_WIDTH && index + 1 < GROUP_COUNT {
            self.focus = index + 1;
        }
        if len == 0 && index > 0 {
            self.focus = index - 1;
        }
    }

    /// Handle a backspace keypress on group `index`
    ///
    /// Only an empty group hands focus back to its predecessor; otherwise
    /// the keypress edits the group and arrives as a [`change`](Self::change).
    pub fn backspace(&mut self, index: usize) {
        if index < GROUP_COUNT && index > 0 && self.groups[index].is_empty() {
            self.focus = index - 1;
        }
    }

    /// Spread pasted text over all groups
    ///
    /// Up to 16 digits are kept and chunked by group width; each chunk
    /// overwrites the group at the same position, groups past the pasted
    /// digits keep their value. Focus lands on the last filled group.
    pub fn paste(&mut self, raw: &str) {
        let digits = truncate(&digits_only(raw), GROUP_COUNT * GROUP_WIDTH);
        if digits.is_empty() {
            return;
        }

        let chunks: Vec<String> = digits
            .as_bytes()
            .chunks(GROUP_WIDTH)
            .map(|chunk| String::from_utf8_lossy(chunk).into_owned())
            .collect();

        for (i, chunk) in chunks.iter().enumerate() {
            self.groups[i] = chunk.clone();
        }
        self.card_type = CardType::detect(&self.number());
        self.focus = chunks.len() - 1;
    }
}

fn sanitize_group(raw: &str) -> String {
    truncate(&digits_only(raw), GROUP_WIDTH)
}
