//! Dealer drawing policy.
//!
//! The dealer hits 16 or less, hits a soft 17 and stands on a hard 17 or
//! more. A bust hand never draws.

use alloc::vec::Vec;

use crate::card::Card;
use crate::evaluator::{self, BLACKJACK};

/// Returns whether the dealer must draw another card.
#[must_use]
pub fn should_hit(cards: &[Card]) -> bool {
    let value = evaluator::value(cards);

    if value > BLACKJACK {
        return false;
    }
    if value <= 16 {
        return true;
    }

    value == 17 && evaluator::is_soft(cards)
}

/// Plays out the dealer's hand.
///
/// Starting from `initial`, cards are requested from `draw` for as long as
/// [`should_hit`] says so. A `None` from `draw` ends the turn early. Returns
/// the final card sequence.
pub fn play_turn<F>(initial: &[Card], mut draw: F) -> Vec<Card>
where
    F: FnMut() -> Option<Card>,
{
    let mut cards = initial.to_vec();

    while should_hit(&cards) {
        let Some(card) = draw() else {
            break;
        };
        cards.push(card);
    }

    cards
}
