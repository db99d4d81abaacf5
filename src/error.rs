//! Error types for game operations.
//!
//! An error always means the request was rejected and the game state is
//! unchanged apart from its message. The `Display` text of rule rejections
//! is what the controller shows in [`GameState::message`](crate::GameState).

use thiserror::Error;

/// Errors that can occur while configuring the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// Configuration is not allowed in the current phase.
    #[error("invalid game state for configuration")]
    InvalidState,
    /// Starting balance is below the house minimum.
    #[error("Starting balance must be at least ${min}")]
    BalanceTooLow {
        /// Smallest accepted starting balance.
        min: usize,
    },
    /// Table minimum is not one of the allowed limits.
    #[error("Invalid table limit selected")]
    InvalidTableLimit,
}

/// Errors that can occur while placing a bet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum BetError {
    /// Invalid game state for betting.
    #[error("invalid game state for betting")]
    InvalidState,
    /// No table has been selected yet.
    #[error("Table limits must be set before betting")]
    NoTableLimits,
    /// Bet is below the table minimum.
    #[error("Minimum bet is ${min}")]
    BelowMinimum {
        /// Table minimum.
        min: usize,
    },
    /// Bet is above the table maximum.
    #[error("Maximum bet is ${max}")]
    AboveMaximum {
        /// Table maximum.
        max: usize,
    },
    /// Insufficient funds.
    #[error("Insufficient balance")]
    InsufficientFunds,
    /// Balance no longer covers the table minimum.
    #[error("Game Over! Insufficient balance to continue.")]
    GameOver,
    /// Dealing failed after the bet was accepted.
    #[error(transparent)]
    Deal(#[from] DealError),
}

/// Errors that can occur during dealing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DealError {
    /// Not enough cards in the shoe.
    #[error("Error: Unable to deal cards")]
    NoCards,
}

/// Errors that can occur during player actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ActionError {
    /// Invalid game state for this action.
    #[error("invalid game state for this action")]
    InvalidState,
    /// Insurance must be taken or declined first.
    #[error("Dealer shows Ace. Would you like insurance?")]
    InsurancePending,
    /// Cannot double down on this hand.
    #[error("Cannot double down on this hand")]
    CannotDouble,
    /// Cannot split this hand.
    #[error("Cannot split this hand")]
    CannotSplit,
    /// Cannot surrender at this point.
    #[error("Cannot surrender at this point")]
    CannotSurrender,
    /// Insufficient funds to double down.
    #[error("Insufficient balance to double down")]
    InsufficientFundsToDouble,
    /// Insufficient funds to split.
    #[error("Insufficient balance to split")]
    InsufficientFundsToSplit,
    /// No cards left in the shoe.
    #[error("Error: Unable to deal cards")]
    NoCards,
}

/// Errors that can occur during insurance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum InsuranceError {
    /// Insurance is not on offer.
    #[error("insurance is not offered")]
    NotOffered,
    /// Insufficient funds for insurance.
    #[error("Insufficient balance for insurance")]
    InsufficientFunds,
}
