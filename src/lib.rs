//! # Perudo
//!
//! A rule engine for Perudo (liar's dice): a turn-based bluffing game of
//! escalating bids over a pool of concealed dice.
//!
//! The engine is deterministic and purely snapshot-based: every operation
//! consumes one [`GameState`] and produces the next, never mutating shared
//! state in place, so past snapshots stay valid for replay, undo, and tests.
//! Randomness is an injected capability, not an implementation detail.
//!
//! ## Game lifecycle
//!
//! A game moves through six phases:
//!
//! - **Setup**: collecting players
//! - **Rolling**: hands are rerolled for a new round
//! - **Bidding**: players escalate quantity/value bids (with distinct
//!   arithmetic for the wild-ace sub-game, and frozen values in Palifico
//!   rounds)
//! - **DudoChallenge**: a Dudo or Calza call revealed all dice
//! - **RoundEnd**: the loser dropped a die (or a Calza winner gained one)
//!   and the next round is about to roll
//! - **GameOver**: one player remains
//!
//! ## Core Modules
//!
//! - [`game`]: entities, dice counting, bid validation, round resolution,
//!   and the lifecycle engine
//! - [`session`]: a state container holding one running game and gating
//!   actions by phase
//!
//! ## Example
//!
//! ```
//! use perudo::GameSession;
//!
//! let mut session = GameSession::new();
//! session.start_game(&["alice", "bob"]).unwrap();
//! session.place_bid(2, 5).unwrap();
//! session.call_dudo().unwrap();
//! session.continue_to_next_round().unwrap();
//! ```

/// Core game logic, entities, and the lifecycle state machine.
pub mod game;
pub use game::{
    constants,
    engine::{GameEngine, GameError},
    entities::{
        Bid, ChallengeKind, Die, DieValue, GameConfig, GamePhase, GameState, Player, PlayerId,
        RoundResult,
    },
    validator::{BidValidation, RuleError, SuggestedBid},
};

/// State container for a single running game.
pub mod session;
pub use session::{GameSession, SessionError, SessionResult};
