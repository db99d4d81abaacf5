use crate::error::InsuranceError;

use super::{GameController, GamePhase};

impl GameController {
    /// Returns whether insurance is currently being offered.
    #[must_use]
    pub fn is_insurance_offered(&self) -> bool {
        self.state.phase == GamePhase::PlayerTurn && self.state.insurance_offered
    }

    /// Takes insurance for half the current bet.
    ///
    /// The stake is debited now and settled after the dealer's turn: a dealer
    /// blackjack returns three times the stake, anything else forfeits it.
    /// Returns the stake.
    ///
    /// # Errors
    ///
    /// Returns an error if insurance is not on offer or the balance cannot
    /// cover the stake.
    pub fn take_insurance(&mut self) -> Result<usize, InsuranceError> {
        if !self.is_insurance_offered() || self.state.insurance_taken {
            return Err(InsuranceError::NotOffered);
        }

        let stake = self.state.current_bet / 2;
        if stake > self.state.player_balance {
            return Err(self.reject(InsuranceError::InsufficientFunds));
        }

        self.state.player_balance -= stake;
        self.state.player_hand.set_insurance_bet(stake);
        self.state.insurance_taken = true;
        self.state.insurance_offered = false;
        self.set_message("Insurance taken. Your turn");

        Ok(stake)
    }

    /// Declines insurance and continues with normal play.
    ///
    /// # Errors
    ///
    /// Returns an error if insurance is not on offer.
    pub fn decline_insurance(&mut self) -> Result<(), InsuranceError> {
        if !self.is_insurance_offered() {
            return Err(InsuranceError::NotOffered);
        }

        self.state.insurance_offered = false;
        self.announce_turn();

        Ok(())
    }

    /// Returns the insurance stake of the current round, if taken.
    #[must_use]
    pub fn insurance_bet(&self) -> Option<usize> {
        if self.state.insurance_taken {
            self.state.player_hand.insurance_bet()
        } else {
            None
        }
    }
}
