// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Cardring command line runner.
#![warn(clippy::all, rust_2018_idioms, missing_docs)]
use anyhow::{Context, Result};
use clap::Parser;
use log::{error, info};
use rand::{SeedableRng, rngs::StdRng};
use std::{
    fs::File,
    io::{self, BufWriter},
    path::PathBuf,
    process,
    time::Duration,
};

use cardring_core::{Config, Deal, Game, Pack};

pub mod output;
pub mod prompt;

#[derive(Debug, Parser)]
struct Cli {
    /// Number of players, prompts for it if missing.
    #[clap(
        long,
        short = 'n',
        value_parser = clap::value_parser!(u16).range(2..=Pack::MAX_PLAYERS as i64)
    )]
    players: Option<u16>,
    /// The pack file with one card value per line, prompts for it if missing.
    #[clap(long, short)]
    pack: Option<PathBuf>,
    /// Plays with a random pack, writes it to the pack file if one is given.
    #[clap(long, short)]
    generate: bool,
    /// Seed for the random pack.
    #[clap(long)]
    seed: Option<u64>,
    /// Directory for the players and decks output files.
    #[clap(long, short, default_value = ".")]
    output_dir: PathBuf,
    /// Milliseconds a player waits on an empty deck before giving up.
    #[clap(long, default_value_t = 5000)]
    draw_timeout_ms: u64,
    /// Enables debug logging of every draw and discard.
    #[clap(long, short)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();

    let level = if cli.verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };

    env_logger::builder()
        .filter_level(level)
        .format_target(false)
        .format_timestamp_millis()
        .init();

    if let Err(e) = run(cli) {
        error!("{e:#}");
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let mut input = io::stdin().lock();
    let mut output = io::stdout();

    let players = match cli.players {
        Some(players) => players as usize,
        None => prompt::players(&mut input, &mut output)?,
    };

    let pack = if cli.generate {
        let pack = match cli.seed {
            Some(seed) => Pack::new_and_shuffled(players, &mut StdRng::seed_from_u64(seed))?,
            None => Pack::new_and_shuffled(players, &mut rand::rng())?,
        };

        if let Some(path) = &cli.pack {
            let file = File::create(path)
                .with_context(|| format!("Cannot create pack file {}", path.display()))?;
            pack.write_to(BufWriter::new(file))?;
            info!("Random pack written to {}", path.display());
        }

        pack
    } else {
        let path = match cli.pack {
            Some(path) => path,
            None => prompt::pack_path(&mut input, &mut output)?,
        };

        Pack::from_file(&path)
            .with_context(|| format!("Cannot load pack {}", path.display()))?
    };

    pack.validate(players)
        .context("Invalid pack, there can be no winner")?;

    let deal = Deal::round_robin(pack, players)?;
    let config = Config {
        draw_timeout: Duration::from_millis(cli.draw_timeout_ms),
        ..Config::default()
    };

    let report = Game::new(deal, config)?.run()?;
    output::write_reports(&cli.output_dir, &report)?;

    info!(
        "Player {} won, reports written to {}",
        report.winner,
        cli.output_dir.display()
    );

    Ok(())
}
