//! Round resolution for Dudo and Calza calls.
//!
//! Both entry points take the same count input, computed by the engine
//! as `count_matching(players, bid.value, true, is_palifico)`, and embed
//! the full revealed dice set and the challenged bid for display and
//! audit.

use log::debug;

use super::entities::{Bid, ChallengeKind, Die, PlayerId, RoundResult};

/// Resolve a Dudo: the challenger claims the bid overstates reality.
///
/// The challenger is right when the actual count falls short of the bid
/// quantity; the loser is then the bidder, otherwise the challenger. A
/// Dudo never names a winner.
#[must_use]
pub fn resolve_dudo(
    challenger_id: PlayerId,
    challenged_bid: Bid,
    actual_count: usize,
    revealed_dice: Vec<Die>,
) -> RoundResult {
    let was_correct = actual_count < challenged_bid.quantity;
    let loser_player_id = if was_correct {
        challenged_bid.player_id.clone()
    } else {
        challenger_id.clone()
    };

    debug!(
        "dudo on {challenged_bid}: actual {actual_count}, {loser_player_id} loses a die"
    );

    RoundResult {
        challenger_id,
        challenged_player_id: challenged_bid.player_id.clone(),
        challenged_bid,
        actual_count,
        was_correct,
        kind: ChallengeKind::Dudo,
        loser_player_id: Some(loser_player_id),
        winner_player_id: None,
        dice_changed: 1,
        all_dice: revealed_dice,
    }
}

/// Resolve a Calza: the caller claims the bid is exactly right.
///
/// An exact match rewards the original bidder with a die, not the
/// caller; a miss costs the caller a die.
#[must_use]
pub fn resolve_calza(
    challenger_id: PlayerId,
    challenged_bid: Bid,
    actual_count: usize,
    revealed_dice: Vec<Die>,
) -> RoundResult {
    let is_exact = actual_count == challenged_bid.quantity;
    let (winner_player_id, loser_player_id) = if is_exact {
        (Some(challenged_bid.player_id.clone()), None)
    } else {
        (None, Some(challenger_id.clone()))
    };

    debug!(
        "calza on {challenged_bid} by {challenger_id}: actual {actual_count}, exact: {is_exact}"
    );

    RoundResult {
        challenger_id,
        challenged_player_id: challenged_bid.player_id.clone(),
        challenged_bid,
        actual_count,
        was_correct: is_exact,
        kind: ChallengeKind::Calza,
        loser_player_id,
        winner_player_id,
        dice_changed: 1,
        all_dice: revealed_dice,
    }
}
