//! Game state types.

use alloc::string::String;

use crate::card::Card;
use crate::hand::{DealerHand, Hand};
use crate::options::TableLimits;
use crate::result::RoundResult;

/// Phase of the round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Waiting for the starting balance and table limits.
    Idle,
    /// Accepting a bet for the next round.
    Betting,
    /// Dealing initial cards.
    Dealing,
    /// Waiting for player actions (and the insurance decision, if offered).
    PlayerTurn,
    /// Dealer plays out their hand.
    DealerTurn,
    /// Round has been settled.
    Result,
    /// Balance no longer covers the table minimum.
    GameOver,
}

/// Which player hand actions apply to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ActiveHand {
    /// The original hand.
    #[default]
    Main,
    /// The hand created by a split.
    Split,
}

/// Receiver of a dealt card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Seat {
    /// The player.
    Player,
    /// The dealer.
    Dealer,
}

/// One card of the initial deal, reported to deal observers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DealEvent {
    /// Position of the card in the dealing order, starting at 0.
    pub index: usize,
    /// Who received the card.
    pub seat: Seat,
    /// The card.
    pub card: Card,
    /// Whether the card is dealt face down (the dealer's hole card).
    pub face_down: bool,
}

/// Which actions the controller currently accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ActionAvailability {
    /// Hit the active hand.
    pub hit: bool,
    /// Stand on the active hand.
    pub stand: bool,
    /// Double down on the active hand.
    pub double: bool,
    /// Split the main hand.
    pub split: bool,
    /// Surrender the main hand.
    pub surrender: bool,
    /// Take or decline insurance.
    pub insurance: bool,
}

/// Complete state of the table.
///
/// The controller owns the only live instance;
/// [`GameController::state`](super::GameController::state) hands out
/// disconnected copies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    /// Current phase.
    pub phase: GamePhase,
    /// The player's main hand.
    pub player_hand: Hand,
    /// The dealer's hand.
    pub dealer_hand: DealerHand,
    /// Second hand, present after a split.
    pub player_split_hand: Option<Hand>,
    /// Base bet of the round.
    pub current_bet: usize,
    /// Chips not currently staked.
    pub player_balance: usize,
    /// Balance the session started with.
    pub starting_balance: usize,
    /// Limits of the selected table, if any.
    pub table_limits: Option<TableLimits>,
    /// Human-readable status line.
    pub message: String,
    /// Whether an insurance decision is pending.
    pub insurance_offered: bool,
    /// Whether insurance was taken this round.
    pub insurance_taken: bool,
    /// Hand the player is acting on.
    pub active_hand: ActiveHand,
    /// Whether the main hand is finished.
    pub main_hand_complete: bool,
    /// Settlement of the last finished round.
    pub last_result: Option<RoundResult>,
}

impl GameState {
    pub(super) fn new(starting_balance: usize) -> Self {
        Self {
            phase: GamePhase::Idle,
            player_hand: Hand::new(0),
            dealer_hand: DealerHand::new(),
            player_split_hand: None,
            current_bet: 0,
            player_balance: starting_balance,
            starting_balance,
            table_limits: None,
            message: String::from("Set your starting balance and place a bet to begin"),
            insurance_offered: false,
            insurance_taken: false,
            active_hand: ActiveHand::Main,
            main_hand_complete: false,
            last_result: None,
        }
    }

    /// Table minimum, or 0 when no table is selected.
    #[must_use]
    pub fn min_table_limit(&self) -> usize {
        self.table_limits.map_or(0, |limits| limits.min())
    }

    /// Table maximum, or 0 when no table is selected.
    #[must_use]
    pub fn max_table_limit(&self) -> usize {
        self.table_limits.map_or(0, |limits| limits.max())
    }

    /// Returns the hand the player is acting on.
    #[must_use]
    pub fn active(&self) -> &Hand {
        match (self.active_hand, &self.player_split_hand) {
            (ActiveHand::Split, Some(hand)) => hand,
            _ => &self.player_hand,
        }
    }

    pub(super) fn active_mut(&mut self) -> &mut Hand {
        match (self.active_hand, &mut self.player_split_hand) {
            (ActiveHand::Split, Some(hand)) => hand,
            _ => &mut self.player_hand,
        }
    }

    /// Iterates over the player's hands, main hand first.
    pub fn player_hands(&self) -> impl Iterator<Item = (ActiveHand, &Hand)> {
        core::iter::once((ActiveHand::Main, &self.player_hand)).chain(
            self.player_split_hand
                .as_ref()
                .map(|hand| (ActiveHand::Split, hand)),
        )
    }
}
