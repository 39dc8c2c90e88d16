//! Dice rolling and counting.
//!
//! Rolling is generic over [`rand::Rng`] so tests can substitute seeded
//! generators; counting is pure and implements the wild-ace rule.

use rand::Rng;

use super::entities::{Die, DieValue, Player};

/// Return a copy of `player` with every die rerolled. Die identity,
/// dice count, and the active/turn flags are untouched.
#[must_use]
pub fn roll_hand<R: Rng>(player: &Player, rng: &mut R) -> Player {
    let dice = player.dice.iter().map(|die| die.rolled(rng)).collect();
    Player {
        dice,
        ..player.clone()
    }
}

/// Reroll every active player's hand. Inactive players pass through
/// unchanged.
#[must_use]
pub fn roll_all<R: Rng>(players: &[Player], rng: &mut R) -> Vec<Player> {
    players
        .iter()
        .map(|player| {
            if player.is_active {
                roll_hand(player, rng)
            } else {
                player.clone()
            }
        })
        .collect()
}

/// Count dice matching `value` across active players.
///
/// Aces are wild and count toward any non-ace value, unless wild
/// counting is disabled or the round is Palifico. An ace die only ever
/// counts once, even when the bid targets aces themselves.
#[must_use]
pub fn count_matching(
    players: &[Player],
    value: DieValue,
    wild_aces_enabled: bool,
    is_palifico: bool,
) -> usize {
    let count_wild = wild_aces_enabled && !is_palifico && value != 1;

    players
        .iter()
        .filter(|player| player.is_active)
        .flat_map(|player| &player.dice)
        .filter(|die| die.value == value || (count_wild && die.value == 1))
        .count()
}

/// Total dice held by active players. The validator's upper bound for
/// bid quantities.
#[must_use]
pub fn total_dice(players: &[Player]) -> usize {
    players
        .iter()
        .filter(|player| player.is_active)
        .map(|player| player.dice.len())
        .sum()
}

/// All active players' dice for reveal display, in player order then
/// hand order.
#[must_use]
pub fn all_dice(players: &[Player]) -> Vec<Die> {
    players
        .iter()
        .filter(|player| player.is_active)
        .flat_map(|player| player.dice.iter().cloned())
        .collect()
}
