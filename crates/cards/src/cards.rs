// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Card and hand definitions.
use serde::{Deserialize, Serialize};
use std::fmt;

/// A card token.
///
/// Two cards compare equal when they have the same face value, but each card
/// also carries the serial number of its position in the pack it was read from
/// so that individual tokens can be tracked as they move between hands and
/// decks. Cards are not `Copy`, moving a card out of a hand or a deck is the only
/// way to put it somewhere else.
#[derive(Clone, Serialize, Deserialize)]
pub struct Card {
    value: u32,
    serial: u32,
}

impl Card {
    /// Creates a card with the given face value.
    pub fn new(value: u32) -> Self {
        Self { value, serial: 0 }
    }

    /// Creates a card with a face value and a pack serial number.
    pub fn with_serial(value: u32, serial: u32) -> Self {
        Self { value, serial }
    }

    /// The card face value.
    pub fn value(&self) -> u32 {
        self.value
    }

    /// The card position in the pack it was dealt from.
    pub fn serial(&self) -> u32 {
        self.serial
    }
}

impl PartialEq for Card {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl Eq for Card {}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

impl fmt::Debug for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Card({}#{})", self.value, self.serial)
    }
}

/// The ordered cards held by a player.
///
/// Dealt cards sit at the front and drawn cards are appended at the back, the
/// discard selection depends on this order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hand {
    cards: Vec<Card>,
}

impl Hand {
    /// The number of cards in a hand between turns.
    pub const SIZE: usize = 4;

    /// Creates a hand with the given cards.
    pub fn new(cards: Vec<Card>) -> Self {
        Self { cards }
    }

    /// Appends a card at the back of the hand.
    pub fn append(&mut self, card: Card) {
        self.cards.push(card);
    }

    /// Removes the card at the given position.
    ///
    /// Panics if the position is out of range.
    pub fn remove_at(&mut self, pos: usize) -> Card {
        self.cards.remove(pos)
    }

    /// The face values in hand order.
    pub fn values(&self) -> Vec<u32> {
        self.cards.iter().map(Card::value).collect()
    }

    /// The cards in hand order.
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Number of cards in the hand.
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Checks if the hand is empty.
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Returns the position of the first card whose value is not `keep`.
    ///
    /// Returns None if every card has the `keep` value.
    pub fn discard_position(&self, keep: u32) -> Option<usize> {
        self.cards.iter().position(|c| c.value != keep)
    }

    /// Checks if all the cards in the hand have the same value.
    pub fn is_uniform(&self) -> bool {
        match self.cards.split_first() {
            Some((first, rest)) => rest.iter().all(|c| c.value == first.value),
            None => false,
        }
    }
}

impl fmt::Display for Hand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, card) in self.cards.iter().enumerate() {
            if idx > 0 {
                write!(f, " ")?;
            }

            write!(f, "{card}")?;
        }

        Ok(())
    }
}

impl IntoIterator for Hand {
    type Item = Card;
    type IntoIter = std::vec::IntoIter<Card>;

    fn into_iter(self) -> Self::IntoIter {
        self.cards.into_iter()
    }
}
