// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Interactive prompts for missing arguments.
use anyhow::{Result, bail};
use std::{
    io::{BufRead, Write},
    path::PathBuf,
};

use cardring_core::Pack;

/// Asks for the number of players until a number between 2 and
/// [Pack::MAX_PLAYERS] is entered.
pub fn players<R: BufRead, W: Write>(input: &mut R, output: &mut W) -> Result<usize> {
    loop {
        write!(output, "Please enter the number of players: ")?;
        output.flush()?;

        let Some(line) = read_line(input)? else {
            bail!("No number of players entered");
        };

        match line.trim().parse::<i64>() {
            Ok(n) if (2..=Pack::MAX_PLAYERS as i64).contains(&n) => return Ok(n as usize),
            Ok(_) => writeln!(
                output,
                "The number of players must be between 2 and {}. Please try again.",
                Pack::MAX_PLAYERS
            )?,
            Err(_) => writeln!(output, "Invalid input. Please enter a positive integer.")?,
        }
    }
}

/// Asks for the pack file until a non empty path is entered.
pub fn pack_path<R: BufRead, W: Write>(input: &mut R, output: &mut W) -> Result<PathBuf> {
    loop {
        write!(output, "Please enter the location of pack to load: ")?;
        output.flush()?;

        let Some(line) = read_line(input)? else {
            bail!("No pack file entered");
        };

        let path = line.trim();
        if !path.is_empty() {
            return Ok(PathBuf::from(path));
        }

        writeln!(output, "Invalid filename. Please enter a non-empty string.")?;
    }
}

/// Reads a line, returns None at end of input.
fn read_line<R: BufRead>(input: &mut R) -> Result<Option<String>> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        Ok(None)
    } else {
        Ok(Some(line))
    }
}
