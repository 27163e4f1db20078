// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Game reports.
//!
//! Players record what they do while the game runs and the game collects the
//! records together with the final hands and decks once every player has
//! stopped. The [Display](fmt::Display) implementations render the text written
//! to the players and decks output files.
use serde::Serialize;
use std::fmt;

use cardring_cards::{Card, Hand};

/// A player action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum PlayerEvent {
    /// The player drew a card from a deck.
    Draw {
        /// The card value.
        value: u32,
        /// The deck index.
        deck: usize,
    },
    /// The player discarded a card to a deck.
    Discard {
        /// The card value.
        value: u32,
        /// The deck index.
        deck: usize,
    },
    /// The player hand at the end of a turn.
    Hand(Vec<u32>),
}

/// How the game ended for a player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Outcome {
    /// This player won.
    Won,
    /// Another player won.
    Informed {
        /// The winner index.
        winner: usize,
    },
}

/// A player game record.
#[derive(Debug, Clone, Serialize)]
pub struct PlayerReport {
    /// The player index.
    pub index: usize,
    /// The dealt hand.
    pub initial_hand: Vec<u32>,
    /// The player actions in order.
    pub events: Vec<PlayerEvent>,
    /// The hand when the game stopped.
    pub final_hand: Hand,
    /// How the game ended for this player.
    pub outcome: Outcome,
}

impl PlayerReport {
    /// Number of turns played.
    pub fn turns(&self) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e, PlayerEvent::Discard { .. }))
            .count()
    }
}

impl fmt::Display for PlayerReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let idx = self.index;
        writeln!(
            f,
            "player {idx} initial hand {}",
            join_values(&self.initial_hand)
        )?;

        for event in &self.events {
            match event {
                PlayerEvent::Draw { value, deck } => {
                    writeln!(f, "player {idx} draws a {value} from deck {deck}")?
                }
                PlayerEvent::Discard { value, deck } => {
                    writeln!(f, "player {idx} discards a {value} to deck {deck}")?
                }
                PlayerEvent::Hand(values) => {
                    writeln!(f, "player {idx} current hand is {}", join_values(values))?
                }
            }
        }

        match self.outcome {
            Outcome::Won => writeln!(f, "player {idx} wins")?,
            Outcome::Informed { winner } => writeln!(
                f,
                "player {winner} has informed player {idx} that player {winner} has won"
            )?,
        }

        writeln!(f, "player {idx} exits")?;
        writeln!(f, "player {idx} final hand {}", self.final_hand)
    }
}

/// A deck final contents.
#[derive(Debug, Clone, Serialize)]
pub struct DeckReport {
    /// The deck index.
    pub index: usize,
    /// The deck cards from front to back.
    pub cards: Vec<Card>,
}

impl fmt::Display for DeckReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let values = self.cards.iter().map(Card::value).collect::<Vec<_>>();
        writeln!(f, "deck{} contents: {}", self.index, join_values(&values))
    }
}

/// The result of a game.
#[derive(Debug, Clone, Serialize)]
pub struct GameReport {
    /// The winner index.
    pub winner: usize,
    /// The players reports by player index.
    pub players: Vec<PlayerReport>,
    /// The decks reports by deck index.
    pub decks: Vec<DeckReport>,
}

impl GameReport {
    /// Total number of cards in hands and decks.
    pub fn card_count(&self) -> usize {
        self.players
            .iter()
            .map(|p| p.final_hand.len())
            .sum::<usize>()
            + self.decks.iter().map(|d| d.cards.len()).sum::<usize>()
    }

    /// Returns all the cards in hands and decks.
    pub fn cards(&self) -> impl Iterator<Item = &Card> {
        self.players
            .iter()
            .flat_map(|p| p.final_hand.cards())
            .chain(self.decks.iter().flat_map(|d| d.cards.iter()))
    }
}

fn join_values(values: &[u32]) -> String {
    values
        .iter()
        .map(u32::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}
