// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Players and decks output files.
use anyhow::{Context, Result};
use std::{fs, path::Path};

use cardring_core::GameReport;

/// Writes a `playerN_output.txt` file for each player and a `deckN_output.txt`
/// file for each deck in the given directory.
pub fn write_reports(dir: &Path, report: &GameReport) -> Result<()> {
    fs::create_dir_all(dir)
        .with_context(|| format!("Cannot create output directory {}", dir.display()))?;

    for player in &report.players {
        let path = dir.join(format!("player{}_output.txt", player.index));
        fs::write(&path, player.to_string())
            .with_context(|| format!("Cannot write {}", path.display()))?;
    }

    for deck in &report.decks {
        let path = dir.join(format!("deck{}_output.txt", deck.index));
        fs::write(&path, deck.to_string())
            .with_context(|| format!("Cannot write {}", path.display()))?;
    }

    Ok(())
}
