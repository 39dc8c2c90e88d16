//! Game lifecycle state machine.
//!
//! [`GameEngine`] orchestrates dice rolling, bid validation, and round
//! resolution into the full game lifecycle. Every operation consumes
//! one snapshot and produces the next; nothing is mutated in place, so
//! a failed operation leaves the prior snapshot fully valid.
//!
//! Phases: `Setup -> Rolling -> Bidding <-> DudoChallenge -> RoundEnd`
//! (next round) or `GameOver`. `Bidding` self-loops on each legal
//! [`GameEngine::place_bid`]; a challenge is followed by an explicit,
//! caller-driven [`GameEngine::end_round`].

use log::debug;
use rand::{Rng, rngs::ThreadRng};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::dice;
use super::entities::{Bid, DieValue, GameConfig, GamePhase, GameState, Player, PlayerId};
use super::resolver;
use super::validator::{self, BidValidation, RuleError};

/// Failures raised by engine operations.
///
/// `IllegalBid` and `NoActiveBidToChallenge` indicate caller misuse (a
/// phase-gating bug upstream), not player error; a correctly gated
/// caller never sees them.
#[derive(Clone, Debug, Deserialize, Eq, Error, PartialEq, Serialize)]
pub enum GameError {
    #[error("illegal bid: {0}")]
    IllegalBid(#[from] RuleError),
    #[error("no active bid to challenge")]
    NoActiveBidToChallenge,
    #[error("need at least {min} players, got {got}")]
    NotEnoughPlayers { min: usize, got: usize },
    #[error("at most {max} players are supported, got {got}")]
    TooManyPlayers { max: usize, got: usize },
}

/// The rule and state-transition engine.
///
/// Holds only the random source; all game data lives in the
/// [`GameState`] snapshots passed through it. Generic over the RNG so
/// tests can drive it with seeded generators.
#[derive(Debug)]
pub struct GameEngine<R: Rng = ThreadRng> {
    rng: R,
}

impl GameEngine<ThreadRng> {
    #[must_use]
    pub fn new() -> Self {
        Self { rng: rand::rng() }
    }
}

impl Default for GameEngine<ThreadRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng> GameEngine<R> {
    /// Build an engine around a caller-supplied random source.
    pub const fn with_rng(rng: R) -> Self {
        Self { rng }
    }

    /// Start a new game: one player per name, seated in input order
    /// with `config.starting_dice_per_player` dice each, then roll the
    /// first round.
    pub fn start_new_game(
        &mut self,
        player_names: &[&str],
        config: GameConfig,
    ) -> Result<GameState, GameError> {
        if player_names.len() < config.min_players {
            return Err(GameError::NotEnoughPlayers {
                min: config.min_players,
                got: player_names.len(),
            });
        }
        if player_names.len() > config.max_players {
            return Err(GameError::TooManyPlayers {
                max: config.max_players,
                got: player_names.len(),
            });
        }

        let players = player_names
            .iter()
            .enumerate()
            .map(|(position, name)| {
                Player::new(
                    PlayerId::new(format!("player-{position}")),
                    *name,
                    position,
                    config.starting_dice_per_player,
                    &mut self.rng,
                )
            })
            .collect();

        let state = GameState::new(players, config);
        Ok(self.start_new_round(&state))
    }

    /// Roll a new round: reroll active hands, recompute the Palifico
    /// flag, and clear the bid state and any stale round result.
    ///
    /// The acting player carries over from the prior round's resolution
    /// (the loser, or the Calza winner). When that player was
    /// eliminated by the challenge they lost, the turn advances to the
    /// next active player.
    pub fn start_new_round(&mut self, state: &GameState) -> GameState {
        let players = dice::roll_all(&state.players, &mut self.rng);

        let is_palifico =
            state.config.enable_palifico && players.iter().any(Player::has_palifico_hand);

        let opener = if players[state.current_player_index].is_active {
            state.current_player_index
        } else {
            next_active_index(&players, state.current_player_index)
        };

        debug!(
            "round {} starts with {} dice in play, palifico: {is_palifico}",
            state.round_number,
            dice::total_dice(&players),
        );

        GameState {
            phase: GamePhase::Bidding,
            players: with_current_turn(&players, opener),
            current_player_index: opener,
            current_bid: None,
            bid_history: Vec::new(),
            is_palifico,
            last_round_result: None,
            ..state.clone()
        }
    }

    /// Check whether the current player could place this bid. Delegates
    /// to the rule validator; the structured result is meant to be
    /// shown to the player.
    pub fn validate_bid(
        &self,
        state: &GameState,
        quantity: usize,
        value: DieValue,
    ) -> BidValidation {
        let candidate = Bid::new(state.current_player().id.clone(), quantity, value);
        validator::validate(
            &candidate,
            state.current_bid.as_ref(),
            state.is_palifico,
            state.total_dice(),
        )
    }

    /// Place a bid for the current player and pass the turn to the next
    /// active player. Fails with [`GameError::IllegalBid`] when the bid
    /// does not supersede the current one; nothing is clamped or
    /// auto-corrected.
    pub fn place_bid(
        &self,
        state: &GameState,
        quantity: usize,
        value: DieValue,
    ) -> Result<GameState, GameError> {
        self.validate_bid(state, quantity, value)?;

        let bid = Bid::new(state.current_player().id.clone(), quantity, value);
        let mut bid_history = state.bid_history.clone();
        bid_history.push(bid.clone());

        let next = next_active_index(&state.players, state.current_player_index);

        Ok(GameState {
            current_bid: Some(bid),
            bid_history,
            players: with_current_turn(&state.players, next),
            current_player_index: next,
            ..state.clone()
        })
    }

    /// The current player calls Dudo on the standing bid. The loser of
    /// the challenge drops a die and opens the next round.
    pub fn call_dudo(&self, state: &GameState) -> Result<GameState, GameError> {
        let challenged_bid = state
            .current_bid
            .clone()
            .ok_or(GameError::NoActiveBidToChallenge)?;

        let actual_count =
            dice::count_matching(&state.players, challenged_bid.value, true, state.is_palifico);
        let result = resolver::resolve_dudo(
            state.current_player().id.clone(),
            challenged_bid,
            actual_count,
            dice::all_dice(&state.players),
        );

        let players: Vec<Player> = state
            .players
            .iter()
            .map(|player| {
                if result.loser_player_id.as_ref() == Some(&player.id) {
                    player.remove_die()
                } else {
                    player.clone()
                }
            })
            .collect();

        let next = index_of(&players, result.loser_player_id.as_ref())
            .unwrap_or(state.current_player_index);

        Ok(GameState {
            phase: GamePhase::DudoChallenge,
            players: with_current_turn(&players, next),
            current_player_index: next,
            last_round_result: Some(result),
            ..state.clone()
        })
    }

    /// The current player calls Calza, betting the standing bid is
    /// exact. On success the original bidder gains a die, capped at the
    /// configured starting hand size; on failure the caller drops one.
    /// The winner (or loser) opens the next round.
    pub fn call_calza(&mut self, state: &GameState) -> Result<GameState, GameError> {
        let challenged_bid = state
            .current_bid
            .clone()
            .ok_or(GameError::NoActiveBidToChallenge)?;

        let actual_count =
            dice::count_matching(&state.players, challenged_bid.value, true, state.is_palifico);
        let result = resolver::resolve_calza(
            state.current_player().id.clone(),
            challenged_bid,
            actual_count,
            dice::all_dice(&state.players),
        );

        let cap = state.config.starting_dice_per_player;
        let players: Vec<Player> = state
            .players
            .iter()
            .map(|player| {
                if result.winner_player_id.as_ref() == Some(&player.id) {
                    player.add_die(cap, &mut self.rng)
                } else if result.loser_player_id.as_ref() == Some(&player.id) {
                    player.remove_die()
                } else {
                    player.clone()
                }
            })
            .collect();

        let outcome_player = result
            .winner_player_id
            .as_ref()
            .or(result.loser_player_id.as_ref());
        let next = index_of(&players, outcome_player).unwrap_or(state.current_player_index);

        Ok(GameState {
            phase: GamePhase::DudoChallenge,
            players: with_current_turn(&players, next),
            current_player_index: next,
            last_round_result: Some(result),
            ..state.clone()
        })
    }

    /// Close out a resolved round: `GameOver` when a single active
    /// player remains, otherwise `RoundEnd` with the round counter
    /// bumped. The caller is expected to follow up with
    /// [`GameEngine::start_new_round`].
    pub fn end_round(&self, state: &GameState) -> GameState {
        if state.active_players().len() == 1 {
            return GameState {
                phase: GamePhase::GameOver,
                ..state.clone()
            };
        }

        GameState {
            phase: GamePhase::RoundEnd,
            round_number: state.round_number + 1,
            ..state.clone()
        }
    }
}

/// Next active seat after `start`, cyclically. The game ends before a
/// single active player could make this loop forever.
fn next_active_index(players: &[Player], start: usize) -> usize {
    let mut index = (start + 1) % players.len();
    while !players[index].is_active {
        index = (index + 1) % players.len();
    }
    index
}

fn index_of(players: &[Player], id: Option<&PlayerId>) -> Option<usize> {
    id.and_then(|id| players.iter().position(|player| &player.id == id))
}

/// Rebuild the player list with `is_current_turn` set on exactly the
/// seat at `current`.
fn with_current_turn(players: &[Player], current: usize) -> Vec<Player> {
    players
        .iter()
        .enumerate()
        .map(|(index, player)| player.with_current_turn(index == current))
        .collect()
}
