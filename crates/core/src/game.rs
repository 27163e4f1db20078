// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Game coordinator.
use log::{error, info};
use std::{
    thread::{self, ScopedJoinHandle},
    time::Duration,
};

use cardring_cards::{Deal, Hand};

use crate::{
    EngineError,
    deck::Deck,
    game_state::GameState,
    player::Player,
    report::{DeckReport, GameReport},
};

/// Engine config.
#[derive(Debug, Clone)]
pub struct Config {
    /// How long a player waits on an empty deck before checking if the game
    /// has ended.
    pub poll_interval: Duration,
    /// How long a player waits on an empty deck while the game is in progress
    /// before failing.
    pub draw_timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_millis(10),
            draw_timeout: Duration::from_secs(5),
        }
    }
}

/// A game with players and decks arranged in a ring.
///
/// Player `i` draws from deck `i - 1` and discards to deck `i`, player 1 draws
/// from the last deck.
#[derive(Debug)]
pub struct Game {
    hands: Vec<Hand>,
    decks: Vec<Deck>,
    state: GameState,
    config: Config,
}

impl Game {
    /// Creates a game from the dealt hands and decks.
    pub fn new(deal: Deal, config: Config) -> Result<Self, EngineError> {
        let players = deal.players();
        if players < 2 {
            return Err(EngineError::InvalidDeal(format!(
                "{players} players, there must be at least 2"
            )));
        }

        if deal.decks.len() != players {
            return Err(EngineError::InvalidDeal(format!(
                "{} decks for {players} players",
                deal.decks.len()
            )));
        }

        if let Some(pos) = deal.hands.iter().position(|h| h.len() != Hand::SIZE) {
            return Err(EngineError::InvalidDeal(format!(
                "player {} has {} cards, expected {}",
                pos + 1,
                deal.hands[pos].len(),
                Hand::SIZE
            )));
        }

        let decks = deal
            .decks
            .into_iter()
            .enumerate()
            .map(|(idx, cards)| Deck::new(idx + 1, cards))
            .collect();

        Ok(Self {
            hands: deal.hands,
            decks,
            state: GameState::new(),
            config,
        })
    }

    /// The number of players.
    pub fn players(&self) -> usize {
        self.decks.len()
    }

    /// The index of the deck a player draws from.
    pub fn left_deck(&self, player: usize) -> usize {
        if player == 1 {
            self.players()
        } else {
            player - 1
        }
    }

    /// The index of the deck a player discards to.
    pub fn right_deck(&self, player: usize) -> usize {
        player
    }

    /// Runs the game until a player wins.
    ///
    /// Each player runs on its own thread, all threads are joined before the
    /// final hands and decks are collected.
    pub fn run(mut self) -> Result<GameReport, EngineError> {
        info!("Starting game with {} players", self.players());

        let hands = std::mem::take(&mut self.hands);
        let game = &self;

        let players = thread::scope(|s| {
            let mut handles = Vec::with_capacity(hands.len());
            let mut spawn_error = None;

            for (idx, hand) in hands.into_iter().enumerate() {
                let index = idx + 1;
                let left = &game.decks[game.left_deck(index) - 1];
                let right = &game.decks[game.right_deck(index) - 1];
                let mut player = Player::new(index, hand, left, right, &game.state, &game.config);

                let task = move || {
                    player.run()?;
                    Ok(player)
                };

                match spawn_player(s, index, &game.state, task) {
                    Ok(handle) => handles.push((index, handle)),
                    Err(err) => {
                        error!("Player {index} {err}");
                        game.state.abort();
                        spawn_error = Some(err);
                        break;
                    }
                }
            }

            join_players(handles, spawn_error)
        })?;

        // All player threads have been joined.
        shutdown(players, &self.decks, &self.state)
    }
}

type PlayerHandle<'scope, T> = ScopedJoinHandle<'scope, Result<T, EngineError>>;

/// Spawns a named player thread, the game is aborted if the task fails or
/// panics while the game is in progress.
fn spawn_player<'scope, 'a: 'scope, T, F>(
    s: &'scope thread::Scope<'scope, '_>,
    index: usize,
    state: &'a GameState,
    task: F,
) -> Result<PlayerHandle<'scope, T>, EngineError>
where
    T: Send + 'scope,
    F: FnOnce() -> Result<T, EngineError> + Send + 'scope,
{
    thread::Builder::new()
        .name(format!("player-{index}"))
        .spawn_scoped(s, move || {
            let _guard = AbortOnExit { state };
            task()
        })
        .map_err(|source| EngineError::Spawn {
            player: index,
            source,
        })
}

/// Waits for every player thread, returns the first failure if any.
fn join_players<T>(
    handles: Vec<(usize, PlayerHandle<'_, T>)>,
    spawn_error: Option<EngineError>,
) -> Result<Vec<T>, EngineError> {
    let mut players = Vec::with_capacity(handles.len());
    let mut failure = spawn_error;
    for (index, handle) in handles {
        match handle.join() {
            Ok(Ok(player)) => players.push(player),
            Ok(Err(err)) => {
                error!("Player {index} failed: {err}");
                failure.get_or_insert(err);
            }
            Err(_) => {
                error!("Player {index} thread panicked");
                failure.get_or_insert(EngineError::PlayerPanicked(index));
            }
        }
    }

    match failure {
        Some(err) => Err(err),
        None => Ok(players),
    }
}

/// Stops the game if a player thread leaves without a winner, so that the
/// other players don't wait on decks that will never be refilled.
struct AbortOnExit<'a> {
    state: &'a GameState,
}

impl Drop for AbortOnExit<'_> {
    fn drop(&mut self) {
        if self.state.is_in_progress() && self.state.abort() {
            info!("Game aborted by {:?}", thread::current().name());
        }
    }
}

/// Collects the final hands and decks, must only run after all players stopped.
fn shutdown(
    players: Vec<Player<'_>>,
    decks: &[Deck],
    state: &GameState,
) -> Result<GameReport, EngineError> {
    let Some(winner) = state.winner() else {
        return Err(EngineError::NoWinner);
    };

    info!("Game over, player {winner} won");

    let players = players
        .into_iter()
        .map(|p| p.into_report(winner))
        .collect();

    let decks = decks
        .iter()
        .map(|d| DeckReport {
            index: d.index(),
            cards: d.snapshot(),
        })
        .collect();

    Ok(GameReport {
        winner,
        players,
        decks,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        player::Turn,
        report::{Outcome, PlayerEvent},
    };
    use cardring_cards::{Card, Pack};
    use rand::{SeedableRng, rngs::StdRng};

    fn cards(values: &[u32]) -> Vec<Card> {
        values.iter().map(|&v| Card::new(v)).collect()
    }

    // Four 1s, four 2s, four 3s, four 4s.
    fn two_players_pack() -> Pack {
        Pack::from_values((1..=4).flat_map(|v| [v; 4]))
    }

    // Deals consecutive runs of four cards to players and then decks.
    fn deal_in_blocks(pack: Pack, players: usize) -> Deal {
        let cards = pack.into_iter().collect::<Vec<_>>();
        let mut blocks = cards.chunks(Hand::SIZE).map(|c| c.to_vec());
        let hands = blocks.by_ref().take(players).map(Hand::new).collect();
        let decks = blocks.collect();
        Deal { hands, decks }
    }

    fn assert_conserved(report: &GameReport, players: usize) {
        assert_eq!(report.card_count(), Pack::size_for(players));

        let mut serials = report.cards().map(Card::serial).collect::<Vec<_>>();
        serials.sort_unstable();
        let expected = (0..Pack::size_for(players) as u32).collect::<Vec<_>>();
        assert_eq!(serials, expected);
    }

    fn assert_single_winner(report: &GameReport) {
        let winners = report
            .players
            .iter()
            .filter(|p| p.outcome == Outcome::Won)
            .collect::<Vec<_>>();
        assert_eq!(winners.len(), 1);
        assert_eq!(winners[0].index, report.winner);
        assert!(winners[0].final_hand.is_uniform());

        for p in report.players.iter().filter(|p| p.index != report.winner) {
            assert_eq!(
                p.outcome,
                Outcome::Informed {
                    winner: report.winner
                }
            );
        }
    }

    fn assert_hand_sizes(report: &GameReport) {
        for p in &report.players {
            assert_eq!(p.final_hand.len(), Hand::SIZE);
            for event in &p.events {
                if let PlayerEvent::Hand(values) = event {
                    assert_eq!(values.len(), Hand::SIZE);
                }
            }
        }
    }

    fn assert_ring_events(report: &GameReport) {
        let players = report.players.len();
        for p in &report.players {
            let left = if p.index == 1 { players } else { p.index - 1 };
            for event in &p.events {
                match event {
                    PlayerEvent::Draw { deck, .. } => assert_eq!(*deck, left),
                    PlayerEvent::Discard { deck, .. } => assert_eq!(*deck, p.index),
                    PlayerEvent::Hand(_) => {}
                }
            }
        }
    }

    // Every card is in exactly one hand or deck and every hand holds four cards.
    fn assert_table(players: &[Player<'_>], decks: &[Deck], count: usize) {
        let mut serials = players
            .iter()
            .flat_map(|p| p.hand().cards().iter().map(Card::serial))
            .chain(decks.iter().flat_map(|d| d.snapshot()).map(|c| c.serial()))
            .collect::<Vec<_>>();
        assert_eq!(serials.len(), Pack::size_for(count));

        serials.sort_unstable();
        serials.dedup();
        assert_eq!(serials.len(), Pack::size_for(count));

        for p in players {
            assert_eq!(p.hand().len(), Hand::SIZE);
        }
    }

    #[test]
    fn ring_wiring() {
        let deal = Deal::round_robin(Pack::from_values((1..=8).flat_map(|v| [v; 4])), 4).unwrap();
        let game = Game::new(deal, Config::default()).unwrap();
        assert_eq!(game.players(), 4);

        assert_eq!(game.left_deck(1), 4);
        assert_eq!(game.right_deck(1), 1);
        assert_eq!(game.left_deck(2), 1);
        assert_eq!(game.right_deck(2), 2);
        assert_eq!(game.left_deck(4), 3);
        assert_eq!(game.right_deck(4), 4);
    }

    #[test]
    fn invalid_deal() {
        let deal = Deal {
            hands: vec![Hand::new(cards(&[1, 1, 1, 1]))],
            decks: vec![cards(&[1, 1, 1, 1])],
        };
        assert!(matches!(
            Game::new(deal, Config::default()),
            Err(EngineError::InvalidDeal(_))
        ));

        let deal = Deal {
            hands: vec![
                Hand::new(cards(&[1, 1, 1, 1])),
                Hand::new(cards(&[2, 2, 2])),
            ],
            decks: vec![cards(&[3, 3, 3, 3]), cards(&[4, 4, 4, 4])],
        };
        assert!(matches!(
            Game::new(deal, Config::default()),
            Err(EngineError::InvalidDeal(_))
        ));

        let deal = Deal {
            hands: vec![
                Hand::new(cards(&[1, 1, 1, 1])),
                Hand::new(cards(&[2, 2, 2, 2])),
            ],
            decks: vec![cards(&[3, 3, 3, 3])],
        };
        assert!(matches!(
            Game::new(deal, Config::default()),
            Err(EngineError::InvalidDeal(_))
        ));
    }

    #[test]
    fn two_players_block_deal() {
        let pack = two_players_pack();
        pack.validate(2).unwrap();

        let deal = deal_in_blocks(pack, 2);
        assert_eq!(deal.hands[0].values(), vec![1, 1, 1, 1]);
        assert_eq!(deal.hands[1].values(), vec![2, 2, 2, 2]);

        let report = Game::new(deal, Config::default()).unwrap().run().unwrap();
        assert_eq!(report.players.len(), 2);
        assert_eq!(report.decks.len(), 2);
        assert_conserved(&report, 2);
        assert_single_winner(&report);
        assert_hand_sizes(&report);
        assert_ring_events(&report);

        // Every player plays at least one turn before winning.
        let winner = &report.players[report.winner - 1];
        assert!(winner.turns() >= 1);

        let text = winner.to_string();
        assert!(text.contains(&format!("player {} wins", report.winner)));

        let other = report.players.iter().find(|p| p.index != report.winner).unwrap();
        assert!(other.to_string().contains(&format!(
            "player {} has informed player {} that player {} has won",
            report.winner, other.index, report.winner
        )));
    }

    #[test]
    fn two_players_round_robin() {
        for _ in 0..20 {
            let deal = Deal::round_robin(two_players_pack(), 2).unwrap();
            let report = Game::new(deal, Config::default()).unwrap().run().unwrap();
            assert_conserved(&report, 2);
            assert_single_winner(&report);
            assert_hand_sizes(&report);
            assert_ring_events(&report);
        }
    }

    #[test]
    fn random_games() {
        let mut rng = StdRng::seed_from_u64(101);
        for players in 2..=8 {
            for _ in 0..5 {
                let pack = Pack::new_and_shuffled(players, &mut rng).unwrap();
                let deal = Deal::round_robin(pack, players).unwrap();
                let report = Game::new(deal, Config::default()).unwrap().run().unwrap();
                assert_eq!(report.players.len(), players);
                assert_conserved(&report, players);
                assert_single_winner(&report);
                assert_hand_sizes(&report);
                assert_ring_events(&report);
            }
        }
    }

    #[test]
    fn interleaved_turns_conserve_cards() {
        let mut rng = StdRng::seed_from_u64(7);
        for count in [2, 3, 5] {
            let pack = Pack::new_and_shuffled(count, &mut rng).unwrap();
            let deal = Deal::round_robin(pack, count).unwrap();
            let mut game = Game::new(deal, Config::default()).unwrap();
            let hands = std::mem::take(&mut game.hands);

            let mut players = hands
                .into_iter()
                .enumerate()
                .map(|(idx, hand)| {
                    let index = idx + 1;
                    let left = &game.decks[game.left_deck(index) - 1];
                    let right = &game.decks[game.right_deck(index) - 1];
                    Player::new(index, hand, left, right, &game.state, &game.config)
                })
                .collect::<Vec<_>>();

            assert_table(&players, &game.decks, count);

            // Plays turns in ring order on this thread, skipping players with
            // an empty left deck.
            'game: for _ in 0..500 {
                for idx in 0..players.len() {
                    let left = game.left_deck(players[idx].index());
                    if game.decks[left - 1].is_empty() {
                        continue;
                    }

                    let turn = players[idx].turn().unwrap();
                    assert_table(&players, &game.decks, count);

                    if turn == Turn::Won {
                        assert_eq!(game.state.winner(), Some(idx + 1));
                        break 'game;
                    }
                    assert_eq!(turn, Turn::Continue);
                }
            }
        }
    }

    #[test]
    fn failing_player_aborts_game() {
        // Both decks are empty so nobody can draw.
        let deal = Deal {
            hands: vec![
                Hand::new(cards(&[1, 2, 3, 4])),
                Hand::new(cards(&[5, 6, 7, 8])),
            ],
            decks: vec![Vec::new(), Vec::new()],
        };

        let config = Config {
            poll_interval: Duration::from_millis(1),
            draw_timeout: Duration::from_millis(50),
        };

        let err = Game::new(deal, config).unwrap().run().unwrap_err();
        assert!(matches!(err, EngineError::EmptyQueue { .. }));
    }

    #[test]
    fn panicking_player_aborts_game() {
        // Deck 1 holds a 0 card that player 2 refuses to keep.
        let decks = [Deck::new(1, cards(&[0])), Deck::new(2, Vec::new())];
        let state = GameState::new();
        let config = Config {
            poll_interval: Duration::from_millis(1),
            draw_timeout: Duration::from_secs(60),
        };

        let result = thread::scope(|s| {
            let hand = Hand::new(cards(&[1, 2, 3, 4]));
            let mut waiting = Player::new(1, hand, &decks[1], &decks[0], &state, &config);
            let waiting = spawn_player(s, 1, &state, move || {
                waiting.run()?;
                Ok(waiting)
            })
            .unwrap();

            let hand = Hand::new(cards(&[1, 3, 4, 5]));
            let mut failing = Player::new(2, hand, &decks[0], &decks[1], &state, &config);
            let failing = spawn_player(s, 2, &state, move || {
                failing.turn()?;
                assert!(!failing.hand().values().contains(&0), "invalid card");
                Ok(failing)
            })
            .unwrap();

            join_players(vec![(1, waiting), (2, failing)], None)
        });

        assert!(matches!(result, Err(EngineError::PlayerPanicked(2))));
        assert!(state.is_aborted());
        assert_eq!(state.winner(), None);
    }
}
