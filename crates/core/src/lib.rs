// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Cardring concurrent game engine.
//!
//! Players sit in a ring with a [Deck] between each pair of neighbours, every
//! player runs on its own thread drawing from the deck on its left and
//! discarding to the deck on its right until one of them holds four cards of
//! the same value:
//!
//! ```
//! # use cardring_cards::{Deal, Pack};
//! # use cardring_core::{Config, Game};
//! let pack = Pack::from_values((1..=4).flat_map(|v| [v; 4]));
//! let deal = Deal::round_robin(pack, 2).unwrap();
//!
//! let report = Game::new(deal, Config::default()).unwrap().run().unwrap();
//! assert_eq!(report.card_count(), 16);
//! ```
#![warn(clippy::all, rust_2018_idioms, missing_docs)]

pub mod deck;
pub use deck::{Deck, DeckError};

pub mod error;
pub use error::EngineError;

pub mod game;
pub use game::{Config, Game};

pub mod game_state;
pub use game_state::GameState;

pub mod player;
pub use player::Player;

pub mod report;
pub use report::{DeckReport, GameReport, Outcome, PlayerEvent, PlayerReport};

// Reexport cards types.
pub use cardring_cards::{Card, Deal, Hand, Pack, PackError};
