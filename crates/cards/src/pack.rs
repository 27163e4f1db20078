// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Pack loading, validation and dealing.
use ahash::AHashMap;
use rand::prelude::*;
use std::{
    fs::File,
    io::{self, BufRead, BufReader, Write},
    path::Path,
};
use thiserror::Error;

use crate::{Card, Hand};

/// Number of copies of each value in a valid pack.
const COPIES: usize = 4;

/// Pack errors.
#[derive(Debug, Error)]
pub enum PackError {
    /// Failed to read or write a pack.
    #[error("pack io error: {0}")]
    Io(#[from] io::Error),
    /// A line is not a card value.
    #[error("line {line}: invalid card value '{text}'")]
    Parse {
        /// The line number starting from 1.
        line: usize,
        /// The offending text.
        text: String,
    },
    /// The number of players is outside 2..=1000.
    #[error("invalid number of players {0}, there must be between 2 and 1000")]
    Players(usize),
    /// The pack doesn't have 8 cards per player.
    #[error("pack has {found} cards, expected {expected}")]
    Length {
        /// The expected number of cards.
        expected: usize,
        /// The cards in the pack.
        found: usize,
    },
    /// A card value is outside 1..=2n.
    #[error("card value {value} out of range 1..={max}")]
    OutOfRange {
        /// The card value.
        value: u32,
        /// The maximum card value.
        max: u32,
    },
    /// A value is not repeated exactly four times.
    #[error("card value {value} appears {count} times, expected 4")]
    Multiplicity {
        /// The card value.
        value: u32,
        /// How many times it appears.
        count: usize,
    },
}

/// An ordered pack of cards to deal from.
#[derive(Debug, Clone, Default)]
pub struct Pack {
    cards: Vec<Card>,
}

impl Pack {
    /// The maximum number of players a pack can be dealt to.
    pub const MAX_PLAYERS: usize = 1000;

    /// The number of cards in a pack for the given number of players.
    pub const fn size_for(players: usize) -> usize {
        8 * players
    }

    /// Checks the number of players and returns the highest card value.
    fn max_value(players: usize) -> Result<u32, PackError> {
        if (2..=Self::MAX_PLAYERS).contains(&players) {
            Ok(2 * players as u32)
        } else {
            Err(PackError::Players(players))
        }
    }

    /// Creates a pack from card values, each card serial is its position.
    pub fn from_values<I>(values: I) -> Self
    where
        I: IntoIterator<Item = u32>,
    {
        let cards = values
            .into_iter()
            .enumerate()
            .map(|(pos, value)| Card::with_serial(value, pos as u32))
            .collect();
        Self { cards }
    }

    /// Reads a pack with one card value per line, blank lines are skipped.
    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self, PackError> {
        let mut values = Vec::new();
        for (idx, line) in reader.lines().enumerate() {
            let line = line?;
            let text = line.trim();
            if text.is_empty() {
                continue;
            }

            let value = text.parse::<u32>().map_err(|_| PackError::Parse {
                line: idx + 1,
                text: text.to_string(),
            })?;
            values.push(value);
        }

        Ok(Self::from_values(values))
    }

    /// Reads a pack from a file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, PackError> {
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file))
    }

    /// Creates a valid shuffled pack for the given number of players.
    pub fn new_and_shuffled<R: Rng + ?Sized>(
        players: usize,
        rng: &mut R,
    ) -> Result<Self, PackError> {
        let max = Self::max_value(players)?;
        let mut values = (1..=max)
            .flat_map(|v| std::iter::repeat_n(v, COPIES))
            .collect::<Vec<_>>();
        values.shuffle(rng);
        Ok(Self::from_values(values))
    }

    /// Writes the pack values one per line.
    pub fn write_to<W: Write>(&self, mut w: W) -> Result<(), PackError> {
        for card in &self.cards {
            writeln!(w, "{card}")?;
        }

        w.flush()?;
        Ok(())
    }

    /// Checks this is a playable pack for the given number of players.
    ///
    /// A valid pack has `8 * players` cards with values in `1..=2 * players`
    /// and each value repeated four times.
    pub fn validate(&self, players: usize) -> Result<(), PackError> {
        let max = Self::max_value(players)?;
        let expected = Self::size_for(players);
        if self.cards.len() != expected {
            return Err(PackError::Length {
                expected,
                found: self.cards.len(),
            });
        }

        let mut counts = AHashMap::with_capacity(max as usize);
        for card in &self.cards {
            let value = card.value();
            if !(1..=max).contains(&value) {
                return Err(PackError::OutOfRange { value, max });
            }

            *counts.entry(value).or_insert(0usize) += 1;
        }

        // Length and range hold so a missing value shows up as another value
        // with too many copies, check in value order for stable errors.
        for value in 1..=max {
            let count = counts.get(&value).copied().unwrap_or_default();
            if count != COPIES {
                return Err(PackError::Multiplicity { value, count });
            }
        }

        Ok(())
    }

    /// The pack cards.
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Number of cards in the pack.
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Checks if the pack is empty.
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}

impl IntoIterator for Pack {
    type Item = Card;
    type IntoIter = std::vec::IntoIter<Card>;

    fn into_iter(self) -> Self::IntoIter {
        self.cards.into_iter()
    }
}

/// The initial players hands and decks contents.
///
/// `hands[i]` belongs to player `i + 1` and `decks[i]` is the content of deck
/// `i + 1`.
#[derive(Debug, Clone, Default)]
pub struct Deal {
    /// The players hands.
    pub hands: Vec<Hand>,
    /// The decks cards from front to back.
    pub decks: Vec<Vec<Card>>,
}

impl Deal {
    /// Deals a pack round-robin.
    ///
    /// The first half of the pack goes one card at a time to each player in
    /// turn and the second half one card at a time to each deck in turn.
    pub fn round_robin(pack: Pack, players: usize) -> Result<Self, PackError> {
        Pack::max_value(players)?;

        let expected = Pack::size_for(players);
        if pack.len() != expected {
            return Err(PackError::Length {
                expected,
                found: pack.len(),
            });
        }

        let mut hands = vec![Vec::with_capacity(Hand::SIZE); players];
        let mut decks = vec![Vec::with_capacity(Hand::SIZE); players];

        let half = expected / 2;
        for (pos, card) in pack.into_iter().enumerate() {
            if pos < half {
                hands[pos % players].push(card);
            } else {
                decks[(pos - half) % players].push(card);
            }
        }

        Ok(Self {
            hands: hands.into_iter().map(Hand::new).collect(),
            decks,
        })
    }

    /// The number of players in this deal.
    pub fn players(&self) -> usize {
        self.hands.len()
    }

    /// Total number of cards in hands and decks.
    pub fn count(&self) -> usize {
        self.hands.iter().map(Hand::len).sum::<usize>()
            + self.decks.iter().map(Vec::len).sum::<usize>()
    }
}
