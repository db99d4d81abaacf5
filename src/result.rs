//! Round result types for settlement.

use alloc::vec::Vec;

use crate::game::ActiveHand;

/// Result of a single hand after settlement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandOutcome {
    /// Player wins (dealer busts or player has higher value).
    Win,
    /// Player wins with a natural, paid 3:2.
    Blackjack,
    /// Push (tie), bet returned.
    Push,
    /// Dealer has the higher value or a blackjack.
    Lose,
    /// Player busted.
    Bust,
    /// Player surrendered.
    Surrendered,
}

impl HandOutcome {
    /// Short description shown in the round message.
    #[must_use]
    pub const fn describe(self) -> &'static str {
        match self {
            Self::Win => "You win!",
            Self::Blackjack => "Blackjack! You win!",
            Self::Push => "Push",
            Self::Lose => "Dealer wins",
            Self::Bust => "Bust",
            Self::Surrendered => "Surrendered",
        }
    }
}

/// Result for a single hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HandResult {
    /// Which of the player's hands this is.
    pub hand: ActiveHand,
    /// The outcome of the hand.
    pub outcome: HandOutcome,
    /// The bet amount for this hand.
    pub bet: usize,
    /// Amount credited back for this hand (stake included).
    pub payout: usize,
    /// The player's hand value.
    pub player_value: u8,
}

/// Result of the entire round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundResult {
    /// Results for each player hand, main hand first.
    pub hands: Vec<HandResult>,
    /// The dealer's final hand value.
    pub dealer_value: u8,
    /// Whether the dealer busted.
    pub dealer_bust: bool,
    /// Whether the dealer had blackjack.
    pub dealer_blackjack: bool,
    /// Insurance stake (0 if no insurance taken).
    pub insurance_bet: usize,
    /// Insurance payout, stake included (0 unless the dealer had blackjack).
    pub insurance_payout: usize,
    /// Half-bet refunded on surrender.
    pub surrender_refund: usize,
    /// Total credited to the balance at settlement, insurance included.
    pub total_payout: usize,
}
