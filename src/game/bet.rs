use crate::error::{BetError, DealError};
use crate::hand::{DealerHand, Hand};

use super::{ActiveHand, DealEvent, GameController, GamePhase, Seat};

/// Initial dealing order: player, dealer hole card, player, dealer up card.
const DEALING_ORDER: [(Seat, bool); 4] = [
    (Seat::Player, false),
    (Seat::Dealer, true),
    (Seat::Player, false),
    (Seat::Dealer, false),
];

impl GameController {
    /// Places a bet and deals the round.
    ///
    /// # Errors
    ///
    /// Returns an error if the game is not accepting bets, no table is
    /// selected, the amount is outside the table limits or above the balance,
    /// or the shoe runs dry while dealing.
    pub fn set_bet(&mut self, amount: usize) -> Result<(), BetError> {
        self.set_bet_observed(amount, |_| {})
    }

    /// Like [`set_bet`](Self::set_bet), reporting every dealt card to
    /// `on_card` as it lands.
    ///
    /// The observer only sees the cards; the round's state is complete once
    /// this call returns, whatever the observer does with the events.
    ///
    /// # Errors
    ///
    /// Same as [`set_bet`](Self::set_bet).
    pub fn set_bet_observed<F>(&mut self, amount: usize, on_card: F) -> Result<(), BetError>
    where
        F: FnMut(&DealEvent),
    {
        if !matches!(self.state.phase, GamePhase::Betting | GamePhase::Idle) {
            return Err(BetError::InvalidState);
        }

        self.validate_bet(amount)?;
        self.place_and_deal(amount, on_card)
    }

    /// Returns to the betting phase with the previous bet pre-filled.
    ///
    /// The pre-filled bet is clamped to the balance and returned. Nothing is
    /// dealt; the player confirms with [`set_bet`](Self::set_bet).
    ///
    /// # Errors
    ///
    /// Returns an error outside [`GamePhase::Result`] and
    /// [`GamePhase::GameOver`], or if the balance no longer covers the table
    /// minimum.
    pub fn bet_again(&mut self) -> Result<usize, BetError> {
        self.ensure_round_finished()?;

        let previous = if self.state.current_bet > 0 {
            self.state.current_bet
        } else {
            self.game_over_threshold()
        };
        self.state.current_bet = previous.min(self.state.player_balance);

        self.transition(GamePhase::Betting);
        self.set_message("Adjust your bet amount if needed, then click Deal");

        Ok(self.state.current_bet)
    }

    /// Bets again and deals immediately.
    ///
    /// Uses `amount` if given, otherwise the previous round's bet.
    ///
    /// # Errors
    ///
    /// Returns an error outside [`GamePhase::Result`] and
    /// [`GamePhase::GameOver`], if the balance no longer covers the table
    /// minimum, or for any reason [`set_bet`](Self::set_bet) would reject.
    pub fn bet_and_deal_again(&mut self, amount: Option<usize>) -> Result<(), BetError> {
        self.bet_and_deal_again_observed(amount, |_| {})
    }

    /// Like [`bet_and_deal_again`](Self::bet_and_deal_again), reporting every
    /// dealt card to `on_card`.
    ///
    /// # Errors
    ///
    /// Same as [`bet_and_deal_again`](Self::bet_and_deal_again).
    pub fn bet_and_deal_again_observed<F>(
        &mut self,
        amount: Option<usize>,
        on_card: F,
    ) -> Result<(), BetError>
    where
        F: FnMut(&DealEvent),
    {
        self.ensure_round_finished()?;

        let bet = amount
            .filter(|&amount| amount > 0)
            .unwrap_or(self.state.current_bet);
        self.validate_bet(bet)?;
        self.place_and_deal(bet, on_card)
    }

    fn ensure_round_finished(&mut self) -> Result<(), BetError> {
        if !matches!(self.state.phase, GamePhase::Result | GamePhase::GameOver) {
            return Err(BetError::InvalidState);
        }

        if self.state.player_balance < self.game_over_threshold() {
            self.transition(GamePhase::GameOver);
            return Err(self.reject(BetError::GameOver));
        }

        Ok(())
    }

    fn validate_bet(&mut self, amount: usize) -> Result<(), BetError> {
        let Some(limits) = self.state.table_limits else {
            return Err(self.reject(BetError::NoTableLimits));
        };

        if amount < limits.min() {
            return Err(self.reject(BetError::BelowMinimum { min: limits.min() }));
        }
        if amount > limits.max() {
            return Err(self.reject(BetError::AboveMaximum { max: limits.max() }));
        }
        if amount > self.state.player_balance {
            return Err(self.reject(BetError::InsufficientFunds));
        }

        Ok(())
    }

    fn place_and_deal<F>(&mut self, amount: usize, on_card: F) -> Result<(), BetError>
    where
        F: FnMut(&DealEvent),
    {
        self.state.current_bet = amount;
        self.state.player_balance -= amount;
        self.transition(GamePhase::Dealing);

        if let Err(err) = self.deal(on_card) {
            // Hand the stake back so the bet can be retried.
            self.state.player_balance += amount;
            self.transition(GamePhase::Betting);
            return Err(self.reject(err).into());
        }

        Ok(())
    }

    fn deal<F>(&mut self, mut on_card: F) -> Result<(), DealError>
    where
        F: FnMut(&DealEvent),
    {
        let state = &mut self.state;
        state.player_hand = Hand::new(state.current_bet);
        state.dealer_hand = DealerHand::new();
        state.player_split_hand = None;
        state.insurance_offered = false;
        state.insurance_taken = false;
        state.active_hand = ActiveHand::Main;
        state.main_hand_complete = false;
        state.last_result = None;

        for (index, (seat, face_down)) in DEALING_ORDER.into_iter().enumerate() {
            let card = self.shoe.draw().ok_or(DealError::NoCards)?;

            match seat {
                Seat::Player => self.state.player_hand.add_card(card),
                Seat::Dealer => self.state.dealer_hand.add_card(card),
            }

            on_card(&DealEvent {
                index,
                seat,
                card,
                face_down,
            });
        }

        self.transition(GamePhase::PlayerTurn);

        if self.state.dealer_hand.shows_ace() {
            self.state.insurance_offered = true;
            self.set_message("Dealer shows Ace. Would you like insurance?");
        } else {
            self.announce_turn();
        }

        Ok(())
    }

    /// Sets the message for the start of the player's turn.
    pub(super) fn announce_turn(&mut self) {
        if self.state.player_hand.is_blackjack() {
            self.set_message("Blackjack! Continue playing.");
        } else {
            self.set_message("Your turn");
        }
    }
}
