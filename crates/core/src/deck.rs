// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Shared decks between players.
use parking_lot::{Condvar, Mutex};
use std::{collections::VecDeque, fmt, time::Duration};
use thiserror::Error;

use cardring_cards::Card;

/// Deck errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DeckError {
    /// There are no cards to take.
    #[error("deck {deck} is empty")]
    EmptyQueue {
        /// The deck index.
        deck: usize,
    },
}

/// A FIFO queue of cards shared by the player that discards to it and the
/// player that draws from it.
pub struct Deck {
    index: usize,
    cards: Mutex<VecDeque<Card>>,
    available: Condvar,
}

impl Deck {
    /// Creates a deck with the given index and cards from front to back.
    pub fn new(index: usize, cards: Vec<Card>) -> Self {
        Self {
            index,
            cards: Mutex::new(cards.into()),
            available: Condvar::new(),
        }
    }

    /// This deck index.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Takes the card at the front of the deck.
    pub fn take(&self) -> Result<Card, DeckError> {
        self.cards
            .lock()
            .pop_front()
            .ok_or(DeckError::EmptyQueue { deck: self.index })
    }

    /// Takes the card at the front of the deck waiting up to `timeout` for a
    /// card to be added if the deck is empty.
    pub fn take_timeout(&self, timeout: Duration) -> Result<Card, DeckError> {
        let mut cards = self.cards.lock();
        if cards.is_empty() {
            self.available
                .wait_while_for(&mut cards, |cards| cards.is_empty(), timeout);
        }

        cards
            .pop_front()
            .ok_or(DeckError::EmptyQueue { deck: self.index })
    }

    /// Adds a card at the back of the deck.
    pub fn add(&self, card: Card) {
        self.cards.lock().push_back(card);
        self.available.notify_one();
    }

    /// Returns a copy of the deck cards from front to back.
    pub fn snapshot(&self) -> Vec<Card> {
        self.cards.lock().iter().cloned().collect()
    }

    /// Number of cards in the deck.
    pub fn len(&self) -> usize {
        self.cards.lock().len()
    }

    /// Checks if the deck is empty.
    pub fn is_empty(&self) -> bool {
        self.cards.lock().is_empty()
    }
}

impl fmt::Debug for Deck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Deck")
            .field("index", &self.index)
            .field("cards", &self.snapshot())
            .finish()
    }
}
