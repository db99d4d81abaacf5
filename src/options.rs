//! Fixed table rules and table limits.
//!
//! The rule set is not configurable: a four-deck shoe, dealer hits soft 17,
//! blackjack pays 3:2 and insurance pays 2:1. Only the table minimum and the
//! starting balance are chosen at runtime.

use crate::card::DECK_SIZE;
use crate::error::ConfigError;

/// Number of decks in the shoe.
pub const DECKS: usize = 4;

/// Cards in a full shoe.
pub const SHOE_SIZE: usize = DECKS * DECK_SIZE;

/// A draw with fewer cards than this left recomposes the shoe first.
pub const RESHUFFLE_THRESHOLD: usize = DECK_SIZE;

/// Smallest bet the house accepts, and the smallest starting balance.
pub const MIN_BET: usize = 5;

/// Table minimums a player may choose from.
pub const ALLOWED_TABLE_MINIMUMS: [usize; 6] = [10, 15, 25, 50, 100, 250];

/// Ratio between a table's maximum and minimum bet.
pub const TABLE_MAX_MULTIPLIER: usize = 10;

/// Betting limits of the selected table.
///
/// ```
/// use shoebox::TableLimits;
///
/// let limits = TableLimits::from_minimum(25).unwrap();
/// assert_eq!(limits.max(), 250);
/// assert!(TableLimits::from_minimum(20).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TableLimits {
    min: usize,
    max: usize,
}

impl TableLimits {
    /// Creates limits for one of the [`ALLOWED_TABLE_MINIMUMS`].
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidTableLimit`] for any other minimum.
    pub fn from_minimum(min: usize) -> Result<Self, ConfigError> {
        if !ALLOWED_TABLE_MINIMUMS.contains(&min) {
            return Err(ConfigError::InvalidTableLimit);
        }

        Ok(Self {
            min,
            max: min * TABLE_MAX_MULTIPLIER,
        })
    }

    /// Minimum bet.
    #[must_use]
    pub const fn min(&self) -> usize {
        self.min
    }

    /// Maximum bet.
    #[must_use]
    pub const fn max(&self) -> usize {
        self.max
    }

    /// Returns whether `amount` lies within the limits.
    #[must_use]
    pub const fn contains(&self, amount: usize) -> bool {
        amount >= self.min && amount <= self.max
    }
}
