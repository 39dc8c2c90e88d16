//! Game-wide constants and default configuration values.

/// Smallest face value a die can show.
pub const MIN_DIE_VALUE: u8 = 1;

/// Largest face value a die can show.
pub const MAX_DIE_VALUE: u8 = 6;

/// A game needs at least two players for bids to be challengeable.
pub const DEFAULT_MIN_PLAYERS: usize = 2;

pub const DEFAULT_MAX_PLAYERS: usize = 6;

/// Standard Perudo hands start with five dice. This is also the cap a
/// Calza win can never push a hand above.
pub const DEFAULT_STARTING_DICE: usize = 5;

/// Palifico rounds are part of the standard rules, so they're on by default.
pub const DEFAULT_ENABLE_PALIFICO: bool = true;
