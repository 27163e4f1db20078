// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Cardring cards types.
//!
//! This crate defines the [Card] token exchanged by players, the [Hand] a
//! player holds, and the [Pack] a game is dealt from:
//!
//! ```
//! # use cardring_cards::{Card, Hand};
//! let hand = Hand::new(vec![Card::new(3), Card::new(5), Card::new(3), Card::new(5)]);
//! assert_eq!(hand.discard_position(5), Some(0));
//! assert!(!hand.is_uniform());
//! ```
//!
//! A pack for `n` players holds `8 * n` cards with values in `1..=2 * n`, each
//! value repeated four times. Packs can be read from any [BufRead](std::io::BufRead)
//! with one value per line, validated, and dealt round-robin:
//!
//! ```
//! # use cardring_cards::{Deal, Pack};
//! let pack = Pack::from_reader("1\n1\n1\n1\n2\n2\n2\n2\n3\n3\n3\n3\n4\n4\n4\n4\n".as_bytes())
//!     .unwrap();
//! pack.validate(2).unwrap();
//!
//! let deal = Deal::round_robin(pack, 2).unwrap();
//! assert_eq!(deal.hands[0].values(), vec![1, 1, 2, 2]);
//! assert_eq!(deal.decks[1].iter().map(|c| c.value()).collect::<Vec<_>>(), vec![3, 3, 4, 4]);
//! ```
#![warn(clippy::all, rust_2018_idioms, missing_docs)]
mod cards;
pub use cards::{Card, Hand};

mod pack;
pub use pack::{Deal, Pack, PackError};
