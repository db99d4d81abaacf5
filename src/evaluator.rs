//! Stateless hand evaluation.
//!
//! Every function here works on a plain card slice so that player hands,
//! the dealer hand and the dealer policy share one set of rules.

use crate::card::Card;

/// Highest total a hand may reach without busting.
pub const BLACKJACK: u8 = 21;

fn totals(cards: &[Card]) -> (u8, u8) {
    let mut soft: u8 = 0;
    let mut aces: u8 = 0;

    for card in cards {
        if card.is_ace() {
            aces += 1;
        }
        soft = soft.saturating_add(card.point_value());
    }

    let mut value = soft;
    while value > BLACKJACK && aces > 0 {
        value -= 10;
        aces -= 1;
    }

    (value, soft)
}

/// Best total of the hand.
///
/// Aces start at 11 and are lowered to 1 one at a time while the total is
/// over 21. The result is the highest total not above 21, or the lowest
/// reachable total if the hand is bust.
#[must_use]
pub fn value(cards: &[Card]) -> u8 {
    totals(cards).0
}

/// Total with every Ace counted as 11.
#[must_use]
pub fn soft_value(cards: &[Card]) -> u8 {
    totals(cards).1
}

/// Returns whether an Ace is still counted as 11 in the best total.
#[must_use]
pub fn is_soft(cards: &[Card]) -> bool {
    let (value, soft) = totals(cards);
    let aces = cards.iter().filter(|c| c.is_ace()).count();
    // Each lowered ace removes 10 from the soft total.
    let lowered = usize::from((soft - value) / 10);
    aces > lowered && value <= BLACKJACK
}

/// Two cards: one Ace and one ten-value card.
#[must_use]
pub fn is_blackjack(cards: &[Card]) -> bool {
    match cards {
        [a, b] => {
            (a.is_ace() && b.point_value() == 10) || (b.is_ace() && a.point_value() == 10)
        }
        _ => false,
    }
}

/// Returns whether the best total is over 21.
#[must_use]
pub fn is_busted(cards: &[Card]) -> bool {
    value(cards) > BLACKJACK
}

/// Two cards of equal point value.
///
/// Splitting is decided by point value, not rank, so a King and a Ten may be
/// split.
#[must_use]
pub fn can_split(cards: &[Card]) -> bool {
    matches!(cards, [a, b] if a.point_value() == b.point_value())
}

/// Returns whether the hand holds exactly two cards.
#[must_use]
pub const fn can_double_down(cards: &[Card]) -> bool {
    cards.len() == 2
}

/// Returns whether the dealer's face-up card is an Ace.
///
/// The face-up card is the one at index 1; the hole card at index 0 is never
/// looked at.
#[must_use]
pub fn dealer_shows_ace(dealer_cards: &[Card]) -> bool {
    dealer_cards.get(1).is_some_and(Card::is_ace)
}
