use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use super::constants;

/// Placeholder for die face values. Only 1 through 6 are meaningful;
/// the rule validator rejects anything outside that range.
pub type DieValue = u8;

/// A single die in a player's hand.
///
/// `is_visible` is presentation metadata for reveal animations and the
/// like. It never affects counting or validation.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Die {
    pub id: String,
    pub value: DieValue,
    pub is_visible: bool,
}

impl Die {
    /// Create a die showing a fresh uniform value in [1, 6].
    #[must_use]
    pub fn new<R: Rng>(id: impl Into<String>, rng: &mut R) -> Self {
        Self {
            id: id.into(),
            value: rng.random_range(constants::MIN_DIE_VALUE..=constants::MAX_DIE_VALUE),
            is_visible: false,
        }
    }

    /// Create a die with a fixed value. Test seam for deterministic hands.
    #[must_use]
    pub fn with_value(id: impl Into<String>, value: DieValue) -> Self {
        Self {
            id: id.into(),
            value,
            is_visible: false,
        }
    }

    /// Return a copy of this die showing a fresh value. Identity and
    /// visibility are preserved.
    #[must_use]
    pub fn rolled<R: Rng>(&self, rng: &mut R) -> Self {
        Self {
            value: rng.random_range(constants::MIN_DIE_VALUE..=constants::MAX_DIE_VALUE),
            ..self.clone()
        }
    }
}

impl fmt::Display for Die {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.value)
    }
}

#[derive(Clone, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub struct PlayerId(String);

impl PlayerId {
    #[must_use]
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<String> for PlayerId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// A seated player and their concealed hand.
///
/// `position` fixes the cyclic turn order at game start and is never
/// reordered. `is_active` is false exactly when the hand is empty.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    pub dice: Vec<Die>,
    pub is_active: bool,
    pub is_current_turn: bool,
    pub position: usize,
}

impl Player {
    /// Create a player with `num_dice` freshly rolled dice.
    #[must_use]
    pub fn new<R: Rng>(
        id: PlayerId,
        name: impl Into<String>,
        position: usize,
        num_dice: usize,
        rng: &mut R,
    ) -> Self {
        let dice = (0..num_dice)
            .map(|i| Die::new(format!("{id}-die-{i}"), rng))
            .collect();
        Self::with_dice(id, name, position, dice)
    }

    /// Create a player holding the given dice. Test seam for fixed hands.
    #[must_use]
    pub fn with_dice(
        id: PlayerId,
        name: impl Into<String>,
        position: usize,
        dice: Vec<Die>,
    ) -> Self {
        let is_active = !dice.is_empty();
        Self {
            id,
            name: name.into(),
            dice,
            is_active,
            is_current_turn: position == 0,
            position,
        }
    }

    /// Return a copy with the last die removed, recomputing `is_active`.
    /// A player with no dice left stays inactive and empty.
    #[must_use]
    pub fn remove_die(&self) -> Self {
        let mut dice = self.dice.clone();
        dice.pop();
        let is_active = !dice.is_empty();
        Self {
            dice,
            is_active,
            ..self.clone()
        }
    }

    /// Return a copy with one fresh die appended, unless the hand is
    /// already at `cap` or above. The cap check only prevents exceeding
    /// the cap, it never trims an existing excess.
    #[must_use]
    pub fn add_die<R: Rng>(&self, cap: usize, rng: &mut R) -> Self {
        if self.dice.len() >= cap {
            return self.clone();
        }
        let mut dice = self.dice.clone();
        dice.push(Die::new(format!("{}-die-{}", self.id, dice.len()), rng));
        Self {
            dice,
            ..self.clone()
        }
    }

    /// Return a copy with the `is_current_turn` flag set as given.
    #[must_use]
    pub fn with_current_turn(&self, is_current_turn: bool) -> Self {
        Self {
            is_current_turn,
            ..self.clone()
        }
    }

    /// Whether this player triggers Palifico mode: still active and down
    /// to exactly one die.
    #[must_use]
    pub fn has_palifico_hand(&self) -> bool {
        self.is_active && self.dice.len() == 1
    }

    /// Return a copy with every die marked visible (for reveal display).
    #[must_use]
    pub fn reveal_dice(&self) -> Self {
        self.with_dice_visibility(true)
    }

    /// Return a copy with every die concealed again.
    #[must_use]
    pub fn hide_dice(&self) -> Self {
        self.with_dice_visibility(false)
    }

    fn with_dice_visibility(&self, is_visible: bool) -> Self {
        let dice = self
            .dice
            .iter()
            .map(|die| Die {
                is_visible,
                ..die.clone()
            })
            .collect();
        Self {
            dice,
            ..self.clone()
        }
    }
}

/// A declared bid: "there are at least `quantity` dice showing `value`
/// across all concealed hands".
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Bid {
    pub player_id: PlayerId,
    pub quantity: usize,
    pub value: DieValue,
    pub timestamp: DateTime<Utc>,
}

impl Bid {
    #[must_use]
    pub fn new(player_id: PlayerId, quantity: usize, value: DieValue) -> Self {
        Self {
            player_id,
            quantity,
            value,
            timestamp: Utc::now(),
        }
    }

    /// A bid on aces plays by different escalation arithmetic.
    #[must_use]
    pub const fn is_ace_bid(&self) -> bool {
        self.value == 1
    }

    /// Minimum ace quantity when converting a normal bid into an ace bid.
    #[must_use]
    pub const fn to_ace_minimum(quantity: usize) -> usize {
        quantity.div_ceil(2)
    }

    /// Minimum normal quantity when converting an ace bid back to normal.
    #[must_use]
    pub const fn from_ace_minimum(quantity: usize) -> usize {
        quantity * 2 + 1
    }
}

impl fmt::Display for Bid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} x {}", self.quantity, self.value)
    }
}

/// Game configuration, fixed for the life of a game.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct GameConfig {
    pub min_players: usize,
    pub max_players: usize,
    pub starting_dice_per_player: usize,
    pub enable_palifico: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            min_players: constants::DEFAULT_MIN_PLAYERS,
            max_players: constants::DEFAULT_MAX_PLAYERS,
            starting_dice_per_player: constants::DEFAULT_STARTING_DICE,
            enable_palifico: constants::DEFAULT_ENABLE_PALIFICO,
        }
    }
}

/// Phase of the game lifecycle.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum GamePhase {
    /// Collecting players, before the first roll.
    Setup,
    /// Hands are being rolled for a new round.
    Rolling,
    /// Players are escalating bids.
    Bidding,
    /// A Dudo or Calza was called and all dice are revealed.
    DudoChallenge,
    /// Round resolved, waiting to continue to the next round.
    RoundEnd,
    /// One player remains. Terminal.
    GameOver,
}

impl fmt::Display for GamePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let repr = match self {
            Self::Setup => "setup",
            Self::Rolling => "rolling",
            Self::Bidding => "bidding",
            Self::DudoChallenge => "dudo challenge",
            Self::RoundEnd => "round end",
            Self::GameOver => "game over",
        };
        write!(f, "{repr}")
    }
}

/// Which kind of challenge ended the round.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum ChallengeKind {
    /// "The bid overstates reality."
    Dudo,
    /// "The bid is exactly right."
    Calza,
}

impl fmt::Display for ChallengeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let repr = match self {
            Self::Dudo => "dudo",
            Self::Calza => "calza",
        };
        write!(f, "{repr}")
    }
}

/// Outcome of a Dudo or Calza call, with the full revealed dice set for
/// display and the challenged bid for audit.
///
/// Exactly one of `loser_player_id`/`winner_player_id` is set: a Dudo
/// always names a loser; a Calza names the winner on success and the
/// loser on failure.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct RoundResult {
    pub challenger_id: PlayerId,
    pub challenged_player_id: PlayerId,
    pub challenged_bid: Bid,
    pub actual_count: usize,
    pub was_correct: bool,
    pub kind: ChallengeKind,
    pub loser_player_id: Option<PlayerId>,
    pub winner_player_id: Option<PlayerId>,
    pub dice_changed: usize,
    pub all_dice: Vec<Die>,
}

impl RoundResult {
    #[must_use]
    pub const fn is_calza(&self) -> bool {
        matches!(self.kind, ChallengeKind::Calza)
    }
}

/// The authoritative game snapshot. Every transition builds a new
/// snapshot from the previous one; nothing mutates a snapshot in place,
/// so past snapshots stay valid for replay and tests.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct GameState {
    pub id: Uuid,
    pub phase: GamePhase,
    pub players: Vec<Player>,
    pub current_player_index: usize,
    pub current_bid: Option<Bid>,
    pub bid_history: Vec<Bid>,
    pub round_number: u32,
    pub is_palifico: bool,
    pub last_round_result: Option<RoundResult>,
    pub config: GameConfig,
}

impl GameState {
    /// Create the initial snapshot for a fresh set of players, before
    /// the first roll.
    #[must_use]
    pub fn new(players: Vec<Player>, config: GameConfig) -> Self {
        Self {
            id: Uuid::new_v4(),
            phase: GamePhase::Rolling,
            players,
            current_player_index: 0,
            current_bid: None,
            bid_history: Vec::new(),
            round_number: 1,
            is_palifico: false,
            last_round_result: None,
            config,
        }
    }

    /// The player whose turn it is.
    #[must_use]
    pub fn current_player(&self) -> &Player {
        &self.players[self.current_player_index]
    }

    /// Players still holding dice, in seating order.
    #[must_use]
    pub fn active_players(&self) -> Vec<&Player> {
        self.players.iter().filter(|p| p.is_active).collect()
    }

    /// The winner, if exactly one active player remains. Phase is not
    /// consulted.
    #[must_use]
    pub fn winner(&self) -> Option<&Player> {
        let active = self.active_players();
        match active.as_slice() {
            [winner] => Some(winner),
            _ => None,
        }
    }

    /// Total dice still in play across active players. Upper bound for
    /// bid quantities.
    #[must_use]
    pub fn total_dice(&self) -> usize {
        super::dice::total_dice(&self.players)
    }
}
