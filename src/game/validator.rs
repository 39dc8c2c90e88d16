//! Bid legality rules.
//!
//! [`validate`] is the sole source of truth for whether a bid may be
//! placed. [`suggest_minimum_bids`] enumerates a small advisory set of
//! candidate escalations a caller may offer as defaults.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::entities::{Bid, DieValue};

/// Rule violations reachable by normal play. Always returned by value,
/// never panicked, so callers can present a reason to the player.
#[derive(Clone, Debug, Deserialize, Eq, Error, PartialEq, Serialize)]
pub enum RuleError {
    #[error("bid quantity must be at least 1")]
    InvalidBidQuantity,
    #[error("die value must be between 1 and 6, got {0}")]
    InvalidBidValue(DieValue),
    #[error("only {0} dice are in play")]
    InsufficientDiceInPlay(usize),
    #[error("the bid value is locked to {0} in a Palifico round")]
    PalificoValueLocked(DieValue),
    #[error("bid must outrank the current bid")]
    BidNotIncreasing,
}

/// Outcome of bid validation.
pub type BidValidation = Result<(), RuleError>;

/// Decide whether `new_bid` legally supersedes `previous_bid`.
///
/// Base checks apply unconditionally and in order, first failure wins:
/// quantity at least 1, value in [1, 6], quantity within the dice still
/// in play. The first bid of a round then passes; a Palifico round locks
/// the value; otherwise legality dispatches on the ace status of the two
/// bids. Timestamps are never compared.
pub fn validate(
    new_bid: &Bid,
    previous_bid: Option<&Bid>,
    is_palifico: bool,
    total_dice_in_play: usize,
) -> BidValidation {
    if new_bid.quantity < 1 {
        return Err(RuleError::InvalidBidQuantity);
    }
    if !(1..=6).contains(&new_bid.value) {
        return Err(RuleError::InvalidBidValue(new_bid.value));
    }
    if new_bid.quantity > total_dice_in_play {
        return Err(RuleError::InsufficientDiceInPlay(total_dice_in_play));
    }

    let Some(previous) = previous_bid else {
        return Ok(());
    };

    if is_palifico && new_bid.value != previous.value {
        return Err(RuleError::PalificoValueLocked(previous.value));
    }

    let increases = match (new_bid.is_ace_bid(), previous.is_ace_bid()) {
        // Raise the quantity, or keep it and raise the value.
        (false, false) => {
            new_bid.quantity > previous.quantity
                || (new_bid.quantity == previous.quantity && new_bid.value > previous.value)
        }
        // Crossing into the ace sub-game halves the bar.
        (true, false) => new_bid.quantity >= Bid::to_ace_minimum(previous.quantity),
        // Leaving it doubles the bar and adds one.
        (false, true) => new_bid.quantity >= Bid::from_ace_minimum(previous.quantity),
        // Both sides are aces; only quantity matters.
        (true, true) => new_bid.quantity > previous.quantity,
    };

    if increases {
        Ok(())
    } else {
        Err(RuleError::BidNotIncreasing)
    }
}

/// A candidate bid a caller may offer as a default escalation.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct SuggestedBid {
    pub quantity: usize,
    pub value: DieValue,
}

/// Enumerate minimal legal escalations over `previous_bid`.
///
/// Advisory only: suggestions near the top of the dice pool may exceed
/// `total_dice` and be rejected; [`validate`] stays authoritative.
#[must_use]
pub fn suggest_minimum_bids(previous_bid: Option<&Bid>, is_palifico: bool) -> Vec<SuggestedBid> {
    let Some(previous) = previous_bid else {
        return vec![SuggestedBid {
            quantity: 1,
            value: 2,
        }];
    };

    let mut suggestions = Vec::with_capacity(3);

    if is_palifico {
        // Only the quantity can move in a Palifico round.
        suggestions.push(SuggestedBid {
            quantity: previous.quantity + 1,
            value: previous.value,
        });
    } else if previous.is_ace_bid() {
        suggestions.push(SuggestedBid {
            quantity: previous.quantity + 1,
            value: 1,
        });
        suggestions.push(SuggestedBid {
            quantity: Bid::from_ace_minimum(previous.quantity),
            value: 2,
        });
    } else {
        if previous.value < 6 {
            suggestions.push(SuggestedBid {
                quantity: previous.quantity,
                value: previous.value + 1,
            });
        }
        suggestions.push(SuggestedBid {
            quantity: previous.quantity + 1,
            value: previous.value,
        });
        suggestions.push(SuggestedBid {
            quantity: Bid::to_ace_minimum(previous.quantity),
            value: 1,
        });
    }

    suggestions
}
