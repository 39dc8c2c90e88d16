//! State container for a single running game.
//!
//! [`GameSession`] holds the latest authoritative snapshot (or none),
//! forwards user actions to the [`GameEngine`], and replaces its held
//! snapshot with the engine's return value. It rejects actions
//! incompatible with the current phase before calling into the engine;
//! the engine itself only re-checks the null-bid precondition.

use rand::{Rng, rngs::ThreadRng};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::game::engine::{GameEngine, GameError};
use crate::game::entities::{
    Bid, DieValue, GameConfig, GamePhase, GameState, Player, RoundResult,
};
use crate::game::validator::BidValidation;

/// Container-level failures: acting with no game in progress or in the
/// wrong phase, or an engine error passed through.
#[derive(Clone, Debug, Deserialize, Eq, Error, PartialEq, Serialize)]
pub enum SessionError {
    #[error("no game in progress")]
    NoGameInProgress,
    #[error("action requires the {expected} phase, but the game is in {actual}")]
    WrongPhase {
        expected: GamePhase,
        actual: GamePhase,
    },
    #[error(transparent)]
    Game(#[from] GameError),
}

/// Result type for session operations.
pub type SessionResult<T> = Result<T, SessionError>;

/// Holds one logical "current game" and serializes all access to it.
#[derive(Debug)]
pub struct GameSession<R: Rng = ThreadRng> {
    engine: GameEngine<R>,
    config: GameConfig,
    state: Option<GameState>,
}

impl GameSession<ThreadRng> {
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(GameConfig::default())
    }

    #[must_use]
    pub fn with_config(config: GameConfig) -> Self {
        Self {
            engine: GameEngine::new(),
            config,
            state: None,
        }
    }
}

impl Default for GameSession<ThreadRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng> GameSession<R> {
    /// Build a session around a caller-supplied random source.
    pub const fn with_rng(config: GameConfig, rng: R) -> Self {
        Self {
            engine: GameEngine::with_rng(rng),
            config,
            state: None,
        }
    }

    /// Start a game for the given players, replacing any game already
    /// in progress.
    pub fn start_game(&mut self, player_names: &[&str]) -> SessionResult<()> {
        let state = self
            .engine
            .start_new_game(player_names, self.config.clone())?;
        self.state = Some(state);
        Ok(())
    }

    /// Place a bid for the current player. Only legal during bidding.
    pub fn place_bid(&mut self, quantity: usize, value: DieValue) -> SessionResult<()> {
        let state = self.state.as_ref().ok_or(SessionError::NoGameInProgress)?;
        require_phase(state, GamePhase::Bidding)?;
        let next = self.engine.place_bid(state, quantity, value)?;
        self.state = Some(next);
        Ok(())
    }

    /// Call Dudo on the standing bid. Only legal during bidding.
    pub fn call_dudo(&mut self) -> SessionResult<()> {
        let state = self.state.as_ref().ok_or(SessionError::NoGameInProgress)?;
        require_phase(state, GamePhase::Bidding)?;
        let next = self.engine.call_dudo(state)?;
        self.state = Some(next);
        Ok(())
    }

    /// Call Calza on the standing bid. Only legal during bidding.
    pub fn call_calza(&mut self) -> SessionResult<()> {
        let state = self.state.as_ref().ok_or(SessionError::NoGameInProgress)?;
        require_phase(state, GamePhase::Bidding)?;
        let next = self.engine.call_calza(state)?;
        self.state = Some(next);
        Ok(())
    }

    /// Close out the resolved round and, unless the game is over, roll
    /// the next one. Only legal after a challenge.
    pub fn continue_to_next_round(&mut self) -> SessionResult<()> {
        let state = self.state.as_ref().ok_or(SessionError::NoGameInProgress)?;
        require_phase(state, GamePhase::DudoChallenge)?;
        let closed = self.engine.end_round(state);
        let next = if closed.phase == GamePhase::GameOver {
            closed
        } else {
            self.engine.start_new_round(&closed)
        };
        self.state = Some(next);
        Ok(())
    }

    /// Drop the current game, if any.
    pub fn reset_game(&mut self) {
        self.state = None;
    }

    /// Check a candidate bid against the rules without placing it.
    pub fn validate_bid(&self, quantity: usize, value: DieValue) -> SessionResult<()> {
        let state = self.state()?;
        let validation: BidValidation = self.engine.validate_bid(state, quantity, value);
        validation.map_err(|e| SessionError::Game(GameError::IllegalBid(e)))
    }

    /// The held snapshot, if a game is in progress.
    pub fn state(&self) -> SessionResult<&GameState> {
        self.state.as_ref().ok_or(SessionError::NoGameInProgress)
    }

    #[must_use]
    pub fn is_game_active(&self) -> bool {
        self.state.is_some()
    }

    #[must_use]
    pub fn current_player(&self) -> Option<&Player> {
        self.state.as_ref().map(GameState::current_player)
    }

    #[must_use]
    pub fn active_players(&self) -> Vec<&Player> {
        self.state
            .as_ref()
            .map(GameState::active_players)
            .unwrap_or_default()
    }

    #[must_use]
    pub fn current_bid(&self) -> Option<&Bid> {
        self.state.as_ref().and_then(|s| s.current_bid.as_ref())
    }

    #[must_use]
    pub fn phase(&self) -> Option<GamePhase> {
        self.state.as_ref().map(|s| s.phase)
    }

    #[must_use]
    pub fn last_round_result(&self) -> Option<&RoundResult> {
        self.state
            .as_ref()
            .and_then(|s| s.last_round_result.as_ref())
    }

    #[must_use]
    pub fn is_palifico(&self) -> bool {
        self.state.as_ref().is_some_and(|s| s.is_palifico)
    }

    #[must_use]
    pub fn total_dice(&self) -> usize {
        self.state.as_ref().map_or(0, GameState::total_dice)
    }

    #[must_use]
    pub fn winner(&self) -> Option<&Player> {
        self.state.as_ref().and_then(GameState::winner)
    }
}

fn require_phase(state: &GameState, expected: GamePhase) -> SessionResult<()> {
    if state.phase == expected {
        Ok(())
    } else {
        Err(SessionError::WrongPhase {
            expected,
            actual: state.phase,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{SeedableRng, rngs::StdRng};

    fn session() -> GameSession<StdRng> {
        GameSession::with_rng(GameConfig::default(), StdRng::seed_from_u64(3))
    }

    #[test]
    fn test_actions_require_a_game() {
        let mut session = session();
        assert!(!session.is_game_active());
        assert_eq!(session.place_bid(1, 2), Err(SessionError::NoGameInProgress));
        assert_eq!(session.call_dudo(), Err(SessionError::NoGameInProgress));
        assert_eq!(session.call_calza(), Err(SessionError::NoGameInProgress));
        assert_eq!(
            session.continue_to_next_round(),
            Err(SessionError::NoGameInProgress)
        );
        assert_eq!(
            session.validate_bid(1, 2),
            Err(SessionError::NoGameInProgress)
        );
    }

    #[test]
    fn test_start_game_enters_bidding() {
        let mut session = session();
        session.start_game(&["alice", "bob"]).unwrap();
        assert!(session.is_game_active());
        assert_eq!(session.phase(), Some(GamePhase::Bidding));
        assert_eq!(session.active_players().len(), 2);
        assert_eq!(session.total_dice(), 10);
        assert_eq!(session.current_player().map(|p| p.position), Some(0));
        assert!(session.current_bid().is_none());
    }

    #[test]
    fn test_start_game_propagates_engine_errors() {
        let mut session = session();
        let result = session.start_game(&["solo"]);
        assert_eq!(
            result,
            Err(SessionError::Game(GameError::NotEnoughPlayers {
                min: 2,
                got: 1
            }))
        );
    }

    #[test]
    fn test_bid_and_challenge_flow() {
        let mut session = session();
        session.start_game(&["alice", "bob"]).unwrap();

        session.place_bid(1, 2).unwrap();
        assert_eq!(session.current_bid().map(|b| b.quantity), Some(1));
        assert_eq!(session.current_player().map(|p| p.position), Some(1));

        session.call_dudo().unwrap();
        assert_eq!(session.phase(), Some(GamePhase::DudoChallenge));
        assert!(session.last_round_result().is_some());

        // Exactly one die left the table.
        assert_eq!(session.total_dice(), 9);
    }

    #[test]
    fn test_challenge_actions_gated_outside_bidding() {
        let mut session = session();
        session.start_game(&["alice", "bob"]).unwrap();
        session.place_bid(1, 2).unwrap();
        session.call_dudo().unwrap();

        assert_eq!(
            session.place_bid(2, 2),
            Err(SessionError::WrongPhase {
                expected: GamePhase::Bidding,
                actual: GamePhase::DudoChallenge,
            })
        );
        assert_eq!(
            session.call_dudo(),
            Err(SessionError::WrongPhase {
                expected: GamePhase::Bidding,
                actual: GamePhase::DudoChallenge,
            })
        );
    }

    #[test]
    fn test_continue_gated_outside_challenge() {
        let mut session = session();
        session.start_game(&["alice", "bob"]).unwrap();
        assert_eq!(
            session.continue_to_next_round(),
            Err(SessionError::WrongPhase {
                expected: GamePhase::DudoChallenge,
                actual: GamePhase::Bidding,
            })
        );
    }

    #[test]
    fn test_continue_rolls_the_next_round() {
        let mut session = session();
        session.start_game(&["alice", "bob"]).unwrap();
        session.place_bid(1, 2).unwrap();
        session.call_dudo().unwrap();
        session.continue_to_next_round().unwrap();

        assert_eq!(session.phase(), Some(GamePhase::Bidding));
        assert!(session.current_bid().is_none());
        assert_eq!(session.state().unwrap().round_number, 2);
    }

    #[test]
    fn test_validate_bid_reports_rule_errors() {
        let mut session = session();
        session.start_game(&["alice", "bob"]).unwrap();
        assert_eq!(session.validate_bid(1, 2), Ok(()));
        assert!(matches!(
            session.validate_bid(0, 2),
            Err(SessionError::Game(GameError::IllegalBid(_)))
        ));
    }

    #[test]
    fn test_reset_game_drops_the_snapshot() {
        let mut session = session();
        session.start_game(&["alice", "bob"]).unwrap();
        session.reset_game();
        assert!(!session.is_game_active());
        assert_eq!(session.winner(), None);
        assert_eq!(session.total_dice(), 0);
        assert!(session.active_players().is_empty());
    }
}
