//! Player and dealer hand representations.

use alloc::vec::Vec;

use crate::card::Card;
use crate::evaluator;

/// A player's hand.
///
/// The bust and blackjack flags are recomputed from the cards every time a
/// card is added; there is no way to set them directly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hand {
    /// Cards in the hand.
    cards: Vec<Card>,
    /// Bet amount for this hand.
    bet: usize,
    /// Whether this hand took part in a split.
    is_split: bool,
    is_double_down: bool,
    is_busted: bool,
    is_blackjack: bool,
    is_surrendered: bool,
    /// Insurance stake placed alongside this hand.
    insurance_bet: Option<usize>,
}

impl Hand {
    /// Creates a new empty hand with the given bet.
    #[must_use]
    pub const fn new(bet: usize) -> Self {
        Self {
            cards: Vec::new(),
            bet,
            is_split: false,
            is_double_down: false,
            is_busted: false,
            is_blackjack: false,
            is_surrendered: false,
            insurance_bet: None,
        }
    }

    /// Creates the second hand of a split, holding the card moved out of the
    /// original pair.
    #[must_use]
    pub fn from_split(card: Card, bet: usize) -> Self {
        let mut hand = Self::new(bet);
        hand.is_split = true;
        hand.add_card(card);
        hand
    }

    /// Adds a card to the hand.
    pub fn add_card(&mut self, card: Card) {
        self.cards.push(card);
        self.refresh();
    }

    fn refresh(&mut self) {
        self.is_busted = evaluator::is_busted(&self.cards);
        self.is_blackjack = evaluator::is_blackjack(&self.cards);
    }

    /// Returns the cards in the hand.
    #[must_use]
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Returns the bet amount for this hand.
    #[must_use]
    pub const fn bet(&self) -> usize {
        self.bet
    }

    /// Doubles the bet and adds the single card a double down receives.
    pub fn double_down(&mut self, card: Card) {
        self.bet *= 2;
        self.is_double_down = true;
        self.add_card(card);
    }

    /// Marks the hand surrendered.
    pub const fn surrender(&mut self) {
        self.is_surrendered = true;
    }

    /// Records the insurance stake placed on this hand.
    pub const fn set_insurance_bet(&mut self, amount: usize) {
        self.insurance_bet = Some(amount);
    }

    /// Removes and returns the second card of a pair, marking this hand split.
    pub fn take_split_card(&mut self) -> Option<Card> {
        if !evaluator::can_split(&self.cards) {
            return None;
        }

        let card = self.cards.pop();
        self.is_split = true;
        self.refresh();
        card
    }

    /// Returns whether this hand took part in a split.
    #[must_use]
    pub const fn is_split(&self) -> bool {
        self.is_split
    }

    /// Returns whether this hand was doubled.
    #[must_use]
    pub const fn is_double_down(&self) -> bool {
        self.is_double_down
    }

    /// Returns whether the hand is over 21.
    #[must_use]
    pub const fn is_busted(&self) -> bool {
        self.is_busted
    }

    /// Returns whether the hand is a natural.
    #[must_use]
    pub const fn is_blackjack(&self) -> bool {
        self.is_blackjack
    }

    /// Returns whether the hand was surrendered.
    #[must_use]
    pub const fn is_surrendered(&self) -> bool {
        self.is_surrendered
    }

    /// Returns the insurance stake, if insurance was taken.
    #[must_use]
    pub const fn insurance_bet(&self) -> Option<usize> {
        self.insurance_bet
    }

    /// Best value of the hand.
    #[must_use]
    pub fn value(&self) -> u8 {
        evaluator::value(&self.cards)
    }

    /// Value with every Ace counted as 11.
    #[must_use]
    pub fn soft_value(&self) -> u8 {
        evaluator::soft_value(&self.cards)
    }

    /// Returns whether the hand is soft (contains an ace counted as 11).
    #[must_use]
    pub fn is_soft(&self) -> bool {
        evaluator::is_soft(&self.cards)
    }

    /// Returns whether the hand can be split.
    #[must_use]
    pub fn can_split(&self) -> bool {
        evaluator::can_split(&self.cards)
    }

    /// Returns whether the hand can be doubled.
    #[must_use]
    pub fn can_double_down(&self) -> bool {
        evaluator::can_double_down(&self.cards)
    }

    /// Returns the number of cards in the hand.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Returns whether the hand is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}

impl Default for Hand {
    fn default() -> Self {
        Self::new(0)
    }
}

/// The dealer's hand.
///
/// The card at index 0 is the hole card and stays hidden until the dealer's
/// turn; the card at index 1 is the up card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DealerHand {
    /// Cards in the hand.
    cards: Vec<Card>,
    /// Whether the hole card is revealed.
    hole_revealed: bool,
}

impl DealerHand {
    /// Creates a new empty dealer hand.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            cards: Vec::new(),
            hole_revealed: false,
        }
    }

    /// Adds a card to the hand.
    pub fn add_card(&mut self, card: Card) {
        self.cards.push(card);
    }

    /// Replaces the cards with the dealer's final sequence.
    pub(crate) fn set_cards(&mut self, cards: Vec<Card>) {
        self.cards = cards;
    }

    /// Returns all cards in the hand.
    #[must_use]
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Returns the face-up card.
    #[must_use]
    pub fn up_card(&self) -> Option<&Card> {
        self.cards.get(1)
    }

    /// Returns whether the hole card is revealed.
    #[must_use]
    pub const fn is_hole_revealed(&self) -> bool {
        self.hole_revealed
    }

    /// Reveals the hole card.
    pub const fn reveal_hole(&mut self) {
        self.hole_revealed = true;
    }

    /// Calculates the visible value (only the up card if hole not revealed).
    #[must_use]
    pub fn visible_value(&self) -> u8 {
        if self.hole_revealed {
            self.value()
        } else {
            self.up_card().map_or(0, Card::point_value)
        }
    }

    /// Calculates the full value of the hand.
    #[must_use]
    pub fn value(&self) -> u8 {
        evaluator::value(&self.cards)
    }

    /// Returns whether the hand is a blackjack.
    #[must_use]
    pub fn is_blackjack(&self) -> bool {
        evaluator::is_blackjack(&self.cards)
    }

    /// Returns whether the hand is bust.
    #[must_use]
    pub fn is_bust(&self) -> bool {
        evaluator::is_busted(&self.cards)
    }

    /// Returns whether the hand is soft (contains an ace counted as 11).
    #[must_use]
    pub fn is_soft(&self) -> bool {
        evaluator::is_soft(&self.cards)
    }

    /// Returns whether the up card is an Ace.
    #[must_use]
    pub fn shows_ace(&self) -> bool {
        evaluator::dealer_shows_ace(&self.cards)
    }

    /// Returns the number of cards.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Returns whether the hand is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}

impl Default for DealerHand {
    fn default() -> Self {
        Self::new()
    }
}
