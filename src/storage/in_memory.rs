//! In-memory card store
//!
//! [`CardStore`] is the plain collection. [`SharedCardStore`] is the
//! process-scoped handle passed to every request handler; it guards one
//! `CardStore` with a RwLock so each operation sees the last completed
//! mutation.

use crate::core::card::{Card, NewCard};
use crate::core::error::{CardError, CardWalletError, CardWalletResult};
use crate::core::query::{CardFilter, CardSort};
use crate::core::store::QueryableStore;
use std::collections::HashSet;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};
use uuid::Uuid;

/// Cards in insertion order
#[derive(Debug, Default)]
pub struct CardStore {
    cards: Vec<Card>,
    issued_ids: HashSet<Uuid>,
}

impl CardStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a card under a fresh id
    ///
    /// Fails with [`CardError::DuplicateNumber`] when a stored card already
    /// carries the same number; the store is left untouched.
    pub fn add(&mut self, card: NewCard) -> Result<Card, CardError> {
        if self.get_by_number(&card.number).is_some() {
            return Err(CardError::DuplicateNumber {
                number: card.number,
            });
        }

        let card = card.into_card(self.fresh_id());
        self.cards.push(card.clone());

        tracing::info!(id = %card.id, card_type = card.type_label(), "card added");
        Ok(card)
    }

    /// Remove the card with `id`, returns whether one was removed
    pub fn delete(&mut self, id: &Uuid) -> bool {
        let before = self.cards.len();
        self.cards.retain(|card| &card.id != id);

        let removed = self.cards.len() < before;
        if removed {
            tracing::info!(id = %id, "card deleted");
        }
        removed
    }

    pub fn get_by_id(&self, id: &Uuid) -> Option<&Card> {
        self.cards.iter().find(|card| &card.id == id)
    }

    pub fn get_by_number(&self, number: &str) -> Option<&Card> {
        self.cards.iter().find(|card| card.number == number)
    }

    pub fn list(&self) -> &[Card] {
        &self.cards
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    fn fresh_id(&mut self) -> Uuid {
        loop {
            let id = Uuid::new_v4();
            if self.issued_ids.insert(id) {
                return id;
            }
        }
    }
}

impl QueryableStore<Card> for CardStore {
    fn apply_filters(&self, data: Vec<Card>, filter: &CardFilter) -> Vec<Card> {
        if filter.is_empty() {
            return data;
        }
        let matches = filter.matcher();
        data.into_iter().filter(|card| matches(card)).collect()
    }

    fn apply_sort(&self, mut data: Vec<Card>, sort: CardSort) -> Vec<Card> {
        sort.apply(&mut data);
        data
    }

    fn list_all(&self) -> Vec<Card> {
        self.cards.clone()
    }
}

/// Shared handle to the application's card store
#[derive(Clone, Default)]
pub struct SharedCardStore {
    inner: Arc<RwLock<CardStore>>,
}

impl SharedCardStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&self, card: NewCard) -> CardWalletResult<Card> {
        Ok(self.write()?.add(card)?)
    }

    pub fn delete(&self, id: &Uuid) -> CardWalletResult<bool> {
        Ok(self.write()?.delete(id))
    }

    pub fn get_by_id(&self, id: &Uuid) -> CardWalletResult<Option<Card>> {
        Ok(self.read()?.get_by_id(id).cloned())
    }

    pub fn get_by_number(&self, number: &str) -> CardWalletResult<Option<Card>> {
        Ok(self.read()?.get_by_number(number).cloned())
    }

    pub fn query(&self, filter: &CardFilter, sort: CardSort) -> CardWalletResult<Vec<Card>> {
        let cards = self.read()?.query(filter, sort);
        tracing::debug!(?filter, ?sort, count = cards.len(), "card query");
        Ok(cards)
    }

    pub fn len(&self) -> CardWalletResult<usize> {
        Ok(self.read()?.len())
    }

    pub fn is_empty(&self) -> CardWalletResult<bool> {
        Ok(self.read()?.is_empty())
    }

    fn read(&self) -> CardWalletResult<RwLockReadGuard<'_, CardStore>> {
        self.inner
            .read()
            .map_err(|e| CardWalletError::Internal(format!("Failed to acquire read lock: {}", e)))
    }

    fn write(&self) -> CardWalletResult<RwLockWriteGuard<'_, CardStore>> {
        self.inner
            .write()
            .map_err(|e| CardWalletError::Internal(format!("Failed to acquire write lock: {}", e)))
    }
}
