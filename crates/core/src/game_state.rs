// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Game termination state shared by all players.
use std::sync::atomic::{AtomicUsize, Ordering};

/// The game is still running.
const IN_PROGRESS: usize = 0;

/// The game has been stopped because a player failed.
const ABORTED: usize = usize::MAX;

/// The shared game state.
///
/// The in progress flag and the winner live in a single atomic cell so they can
/// never be observed out of sync: the cell holds zero while the game is in
/// progress, the 1-based winner index once a player has won, or the aborted
/// marker if a player failed.
#[derive(Debug)]
pub struct GameState {
    cell: AtomicUsize,
}

impl GameState {
    /// Creates a new in progress state.
    pub fn new() -> Self {
        Self {
            cell: AtomicUsize::new(IN_PROGRESS),
        }
    }

    /// Checks if the game is in progress.
    pub fn is_in_progress(&self) -> bool {
        self.cell.load(Ordering::Acquire) == IN_PROGRESS
    }

    /// Returns the winner if a player has won.
    pub fn winner(&self) -> Option<usize> {
        match self.cell.load(Ordering::Acquire) {
            IN_PROGRESS | ABORTED => None,
            winner => Some(winner),
        }
    }

    /// Checks if the game was aborted.
    pub fn is_aborted(&self) -> bool {
        self.cell.load(Ordering::Acquire) == ABORTED
    }

    /// Announces `player` as the winner.
    ///
    /// Only the first call while the game is in progress succeeds and returns
    /// true, any later call returns false and leaves the winner unchanged.
    pub fn announce_win(&self, player: usize) -> bool {
        debug_assert!(
            player != IN_PROGRESS && player != ABORTED,
            "invalid player index {player}"
        );

        self.cell
            .compare_exchange(IN_PROGRESS, player, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
    }

    /// Stops the game without a winner, returns false if the game had already
    /// ended.
    pub fn abort(&self) -> bool {
        self.cell
            .compare_exchange(IN_PROGRESS, ABORTED, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}
