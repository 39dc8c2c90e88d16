//! Perudo rule engine - core state machine and game logic.
//!
//! This module provides the foundational game implementation including:
//! - Immutable game-state snapshots and entity types
//! - Dice rolling and wild-ace counting
//! - Bid legality validation and minimum-bid suggestions
//! - Dudo/Calza round resolution
//! - The lifecycle state machine tying it all together

pub mod constants;
pub mod dice;
pub mod engine;
pub mod entities;
pub mod resolver;
pub mod validator;
