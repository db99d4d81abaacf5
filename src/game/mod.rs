//! Game controller and state management.

use alloc::string::{String, ToString};
use core::fmt::Display;

use tracing::{debug, trace};

use crate::error::ConfigError;
use crate::options::{MIN_BET, TableLimits};
use crate::shoe::Shoe;

mod actions;
mod bet;
mod dealer;
mod insurance;
pub mod state;

pub use state::{ActionAvailability, ActiveHand, DealEvent, GamePhase, GameState, Seat};

/// A single-player blackjack table.
///
/// The controller owns the shoe and the only live [`GameState`]. Every
/// action runs to completion before returning; a rejected action leaves the
/// phase untouched and, for rule violations, explains itself through
/// [`GameState::message`].
///
/// # Example
///
/// ```
/// use shoebox::{GameController, GamePhase};
///
/// let mut game = GameController::new(42);
/// game.set_starting_balance(1000).unwrap();
/// game.set_table_limits(10).unwrap();
/// assert_eq!(game.phase(), GamePhase::Betting);
///
/// game.set_bet(10).unwrap();
/// assert_eq!(game.phase(), GamePhase::PlayerTurn);
/// assert_eq!(game.state().player_balance, 990);
/// ```
#[derive(Debug, Clone)]
pub struct GameController {
    state: GameState,
    shoe: Shoe,
}

impl GameController {
    /// Creates a controller with no starting balance and no table selected.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self::with_starting_balance(0, seed)
    }

    /// Creates a controller whose starting balance is already set.
    ///
    /// Selecting table limits is then enough to start betting.
    #[must_use]
    pub fn with_starting_balance(starting_balance: usize, seed: u64) -> Self {
        Self {
            state: GameState::new(starting_balance),
            shoe: Shoe::new(seed),
        }
    }

    /// Replaces the shoe, e.g. with a stacked one built by [`Shoe::from_cards`].
    #[must_use]
    pub fn with_shoe(mut self, shoe: Shoe) -> Self {
        self.shoe = shoe;
        self
    }

    /// Returns a disconnected copy of the complete game state.
    #[must_use]
    pub fn state(&self) -> GameState {
        self.state.clone()
    }

    /// Returns the current phase.
    #[must_use]
    pub const fn phase(&self) -> GamePhase {
        self.state.phase
    }

    /// Returns the current balance.
    #[must_use]
    pub const fn balance(&self) -> usize {
        self.state.player_balance
    }

    /// Returns the current status message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.state.message
    }

    /// Returns the number of cards left in the shoe.
    #[must_use]
    pub fn cards_remaining(&self) -> usize {
        self.shoe.remaining()
    }

    /// Sets the starting balance.
    ///
    /// # Errors
    ///
    /// Returns an error if a round is in progress or the amount is below the
    /// house minimum bet.
    pub fn set_starting_balance(&mut self, amount: usize) -> Result<(), ConfigError> {
        self.ensure_configurable()?;

        if amount < MIN_BET {
            return Err(self.reject(ConfigError::BalanceTooLow { min: MIN_BET }));
        }

        self.state.starting_balance = amount;
        self.state.player_balance = amount;

        if self.state.table_limits.is_some() {
            self.open_betting_if_ready();
        } else {
            self.set_message("Select table limits to continue");
        }

        Ok(())
    }

    /// Selects a table by its minimum bet. The maximum is ten times the
    /// minimum.
    ///
    /// # Errors
    ///
    /// Returns an error if a round is in progress or the minimum is not one
    /// of [`ALLOWED_TABLE_MINIMUMS`](crate::options::ALLOWED_TABLE_MINIMUMS).
    pub fn set_table_limits(&mut self, min: usize) -> Result<(), ConfigError> {
        self.ensure_configurable()?;

        let limits = TableLimits::from_minimum(min).map_err(|err| self.reject(err))?;
        self.state.table_limits = Some(limits);

        if self.state.starting_balance > 0 {
            self.open_betting_if_ready();
        } else {
            self.set_message("Set your starting balance and table limits to begin");
        }

        Ok(())
    }

    /// Starts over with a fresh shoe and state.
    ///
    /// Keeps the previous starting balance unless a new one is given. Table
    /// limits are cleared and the controller returns to [`GamePhase::Idle`].
    pub fn reset_game(&mut self, new_starting_balance: Option<usize>) {
        let balance = new_starting_balance
            .filter(|&amount| amount > 0)
            .unwrap_or(self.state.starting_balance);

        self.shoe.reset();
        self.state = GameState::new(balance);
        debug!(balance, "game reset");
    }

    /// Returns which actions are legal right now.
    #[must_use]
    pub fn available_actions(&self) -> ActionAvailability {
        let state = &self.state;
        if state.phase != GamePhase::PlayerTurn {
            return ActionAvailability::default();
        }

        if state.insurance_offered {
            return ActionAvailability {
                insurance: true,
                ..ActionAvailability::default()
            };
        }

        let hand = state.active();
        let on_unsplit_main =
            state.active_hand == ActiveHand::Main && state.player_split_hand.is_none();

        ActionAvailability {
            hit: true,
            stand: true,
            double: hand.can_double_down() && state.player_balance >= hand.bet(),
            split: on_unsplit_main
                && state.player_hand.can_split()
                && state.player_balance >= state.current_bet,
            surrender: on_unsplit_main && state.player_hand.len() == 2,
            insurance: false,
        }
    }

    fn ensure_configurable(&self) -> Result<(), ConfigError> {
        match self.state.phase {
            GamePhase::Idle | GamePhase::Betting | GamePhase::Result | GamePhase::GameOver => {
                Ok(())
            }
            _ => Err(ConfigError::InvalidState),
        }
    }

    fn open_betting_if_ready(&mut self) {
        if !matches!(self.state.phase, GamePhase::Idle | GamePhase::GameOver) {
            self.set_message("Place your bet");
            return;
        }

        if self.state.player_balance >= self.game_over_threshold() {
            self.transition(GamePhase::Betting);
            self.set_message("Place your bet");
        } else {
            self.set_message("Insufficient balance for this table");
        }
    }

    /// Balance below which no further round can be played.
    fn game_over_threshold(&self) -> usize {
        self.state
            .table_limits
            .map_or(MIN_BET, |limits| limits.min())
    }

    fn transition(&mut self, to: GamePhase) {
        let from = self.state.phase;
        if from != to {
            debug!(?from, ?to, "phase transition");
        }
        self.state.phase = to;
    }

    fn set_message(&mut self, message: impl Into<String>) {
        self.state.message = message.into();
    }

    /// Shows a rejection in the state message and hands the error back.
    fn reject<E: Display>(&mut self, err: E) -> E {
        trace!(error = %err, phase = ?self.state.phase, "request rejected");
        self.state.message = err.to_string();
        err
    }
}
