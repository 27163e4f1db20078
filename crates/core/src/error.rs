// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Engine errors.
use std::io;
use thiserror::Error;

/// Errors that stop a game.
#[derive(Debug, Error)]
pub enum EngineError {
    /// A player could not draw because its left deck stayed empty.
    #[error("player {player} found deck {deck} empty")]
    EmptyQueue {
        /// The player index.
        player: usize,
        /// The deck index.
        deck: usize,
    },
    /// The hands and decks cannot be arranged in a ring.
    #[error("invalid deal: {0}")]
    InvalidDeal(String),
    /// A player thread panicked.
    #[error("player {0} thread panicked")]
    PlayerPanicked(usize),
    /// A player thread could not be started.
    #[error("failed to start player {player} thread: {source}")]
    Spawn {
        /// The player index.
        player: usize,
        /// The spawn error.
        source: io::Error,
    },
    /// All players stopped but nobody won.
    #[error("game ended without a winner")]
    NoWinner,
}
