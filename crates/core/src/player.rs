// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Ring player.
use log::{debug, info};
use std::time::Instant;

use cardring_cards::{Card, Hand};

use crate::{
    DeckError, EngineError,
    deck::Deck,
    game::Config,
    game_state::GameState,
    report::{Outcome, PlayerEvent, PlayerReport},
};

/// The result of a player turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Turn {
    /// The player discarded and the game goes on.
    Continue,
    /// The player has won the game.
    Won,
    /// The game ended before or during this turn.
    Stopped,
}

/// A player in the ring.
///
/// The player owns its hand and shares its left deck with the player before it
/// and its right deck with the player after it.
#[derive(Debug)]
pub struct Player<'a> {
    index: usize,
    hand: Hand,
    initial_hand: Vec<u32>,
    events: Vec<PlayerEvent>,
    left: &'a Deck,
    right: &'a Deck,
    state: &'a GameState,
    config: &'a Config,
}

impl<'a> Player<'a> {
    /// Creates a player with a dealt hand sitting between two decks.
    pub fn new(
        index: usize,
        hand: Hand,
        left: &'a Deck,
        right: &'a Deck,
        state: &'a GameState,
        config: &'a Config,
    ) -> Self {
        Self {
            index,
            initial_hand: hand.values(),
            hand,
            events: Vec::new(),
            left,
            right,
            state,
            config,
        }
    }

    /// This player index.
    pub fn index(&self) -> usize {
        self.index
    }

    /// This player hand.
    pub fn hand(&self) -> &Hand {
        &self.hand
    }

    /// Plays turns until this player wins or the game stops.
    pub fn run(&mut self) -> Result<(), EngineError> {
        debug!(
            "Player {} starts with hand {} drawing from deck {} discarding to deck {}",
            self.index,
            self.hand,
            self.left.index(),
            self.right.index()
        );

        while self.state.is_in_progress() {
            match self.turn()? {
                Turn::Continue => {}
                Turn::Won => {
                    info!("Player {} wins with hand {}", self.index, self.hand);
                    break;
                }
                Turn::Stopped => break,
            }
        }

        debug!("Player {} exits after {} events", self.index, self.events.len());
        Ok(())
    }

    /// Plays a draw, discard and check turn.
    pub fn turn(&mut self) -> Result<Turn, EngineError> {
        let Some(card) = self.draw()? else {
            return Ok(Turn::Stopped);
        };

        debug!(
            "Player {} draws a {} from deck {}",
            self.index,
            card,
            self.left.index()
        );
        self.events.push(PlayerEvent::Draw {
            value: card.value(),
            deck: self.left.index(),
        });
        self.hand.append(card);

        let pos = self.discard_position();
        let card = self.hand.remove_at(pos);
        debug!(
            "Player {} discards a {} to deck {}",
            self.index,
            card,
            self.right.index()
        );
        self.events.push(PlayerEvent::Discard {
            value: card.value(),
            deck: self.right.index(),
        });
        self.right.add(card);

        self.events.push(PlayerEvent::Hand(self.hand.values()));

        if !self.hand.is_uniform() {
            Ok(Turn::Continue)
        } else if self.state.announce_win(self.index) {
            Ok(Turn::Won)
        } else {
            // Someone else got there first.
            Ok(Turn::Stopped)
        }
    }

    /// Builds this player report once the game is over.
    pub fn into_report(self, winner: usize) -> PlayerReport {
        let outcome = if winner == self.index {
            Outcome::Won
        } else {
            Outcome::Informed { winner }
        };

        PlayerReport {
            index: self.index,
            initial_hand: self.initial_hand,
            events: self.events,
            final_hand: self.hand,
            outcome,
        }
    }

    /// Draws a card from the left deck.
    ///
    /// Returns None if the game stops while waiting for the deck to be refilled.
    fn draw(&self) -> Result<Option<Card>, EngineError> {
        let started = Instant::now();
        loop {
            match self.left.take_timeout(self.config.poll_interval) {
                Ok(card) => return Ok(Some(card)),
                Err(DeckError::EmptyQueue { deck }) => {
                    if !self.state.is_in_progress() {
                        return Ok(None);
                    }

                    if started.elapsed() >= self.config.draw_timeout {
                        return Err(EngineError::EmptyQueue {
                            player: self.index,
                            deck,
                        });
                    }
                }
            }
        }
    }

    /// Position of the card to discard from a five cards hand.
    ///
    /// Keeps cards with the player own value and discards the earliest card with
    /// a different value. A hand made only of the player value is already a
    /// winning hand, the drawn card goes back out so the hand stays at four.
    fn discard_position(&self) -> usize {
        match self.hand.discard_position(self.index as u32) {
            Some(pos) => pos,
            None => {
                debug!(
                    "Player {} holds only {}s, discarding the drawn card",
                    self.index, self.index
                );
                self.hand.len() - 1
            }
        }
    }
}
