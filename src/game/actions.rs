use crate::card::Card;
use crate::error::ActionError;
use crate::hand::Hand;
use crate::result::{HandOutcome, HandResult, RoundResult};

use super::{ActiveHand, GameController, GamePhase};

/// How the active hand came to an end.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum HandEnd {
    Stand,
    Bust,
    Double,
}

impl GameController {
    fn ensure_player_turn(&mut self) -> Result<(), ActionError> {
        if self.state.phase != GamePhase::PlayerTurn {
            return Err(ActionError::InvalidState);
        }

        if self.state.insurance_offered {
            return Err(self.reject(ActionError::InsurancePending));
        }

        Ok(())
    }

    fn draw_for_player(&mut self) -> Result<Card, ActionError> {
        match self.shoe.draw() {
            Some(card) => Ok(card),
            None => Err(self.reject(ActionError::NoCards)),
        }
    }

    /// Moves play past the active hand.
    ///
    /// A finished main hand hands over to the split hand if there is one.
    /// Otherwise the round ends: without a dealer turn if every hand busted,
    /// after the dealer plays if any hand is still live.
    fn finish_active_hand(&mut self, end: HandEnd) {
        if self.state.active_hand == ActiveHand::Main {
            self.state.main_hand_complete = true;

            if self.state.player_split_hand.is_some() {
                self.state.active_hand = ActiveHand::Split;
                self.set_message(match end {
                    HandEnd::Stand => "First hand complete. Playing second hand.",
                    HandEnd::Bust => "First hand busted. Playing second hand.",
                    HandEnd::Double => "First hand doubled. Playing second hand.",
                });
                return;
            }
        }

        let any_live = self
            .state
            .player_hands()
            .any(|(_, hand)| !hand.is_busted());

        if any_live {
            self.play_dealer_turn();
        } else {
            self.settle_bust_out();
        }
    }

    /// Player action: Hit (draw a card to the active hand).
    ///
    /// # Errors
    ///
    /// Returns an error outside the player's turn, while an insurance
    /// decision is pending, or if the shoe is empty.
    pub fn hit(&mut self) -> Result<Card, ActionError> {
        self.ensure_player_turn()?;

        let card = self.draw_for_player()?;
        let hand = self.state.active_mut();
        hand.add_card(card);

        if hand.is_busted() {
            self.finish_active_hand(HandEnd::Bust);
        } else if self.state.active_hand == ActiveHand::Split {
            self.set_message("Playing second hand");
        } else {
            self.set_message("Your turn");
        }

        Ok(card)
    }

    /// Player action: Stand (keep the active hand).
    ///
    /// # Errors
    ///
    /// Returns an error outside the player's turn or while an insurance
    /// decision is pending.
    pub fn stand(&mut self) -> Result<(), ActionError> {
        self.ensure_player_turn()?;
        self.finish_active_hand(HandEnd::Stand);
        Ok(())
    }

    /// Player action: Double down (double the bet, take one card, stand).
    ///
    /// # Errors
    ///
    /// Returns an error outside the player's turn, while an insurance
    /// decision is pending, if the active hand does not hold exactly two
    /// cards, if the balance cannot cover the extra stake, or if the shoe is
    /// empty.
    pub fn double_down(&mut self) -> Result<Card, ActionError> {
        self.ensure_player_turn()?;

        let hand = self.state.active();
        if !hand.can_double_down() {
            return Err(self.reject(ActionError::CannotDouble));
        }

        let extra = hand.bet();
        if extra > self.state.player_balance {
            return Err(self.reject(ActionError::InsufficientFundsToDouble));
        }

        let card = self.draw_for_player()?;
        self.state.player_balance -= extra;

        let hand = self.state.active_mut();
        hand.double_down(card);
        let end = if hand.is_busted() {
            HandEnd::Bust
        } else {
            HandEnd::Double
        };
        self.finish_active_hand(end);

        Ok(card)
    }

    /// Player action: Split a pair into two hands.
    ///
    /// The second card moves into a new hand carrying another copy of the
    /// bet, and each hand receives one fresh card. Play continues on the main
    /// hand. Only the original two-card hand can be split, once.
    ///
    /// # Errors
    ///
    /// Returns an error outside the player's turn, while an insurance
    /// decision is pending, if the main hand is not a pair of equal point
    /// value or was already split, if the balance cannot cover the new bet,
    /// or if the shoe is empty.
    pub fn split(&mut self) -> Result<(), ActionError> {
        self.ensure_player_turn()?;

        if self.state.player_split_hand.is_some() || !self.state.player_hand.can_split() {
            return Err(self.reject(ActionError::CannotSplit));
        }

        let bet = self.state.current_bet;
        if bet > self.state.player_balance {
            return Err(self.reject(ActionError::InsufficientFundsToSplit));
        }

        let main_card = self.draw_for_player()?;
        let split_card = self.draw_for_player()?;

        let Some(moved) = self.state.player_hand.take_split_card() else {
            return Err(self.reject(ActionError::CannotSplit));
        };
        self.state.player_balance -= bet;

        let mut split_hand = Hand::from_split(moved, bet);
        self.state.player_hand.add_card(main_card);
        split_hand.add_card(split_card);

        self.state.player_split_hand = Some(split_hand);
        self.state.active_hand = ActiveHand::Main;
        self.state.main_hand_complete = false;
        self.set_message("Playing first hand");

        Ok(())
    }

    /// Player action: Surrender (forfeit half the bet and end the round).
    ///
    /// Only the unsplit two-card main hand may surrender. Half the bet is
    /// refunded immediately and the dealer does not play. Returns the refund.
    ///
    /// # Errors
    ///
    /// Returns an error outside the player's turn, while an insurance
    /// decision is pending, or when the hand is not eligible.
    pub fn surrender(&mut self) -> Result<usize, ActionError> {
        self.ensure_player_turn()?;

        let state = &self.state;
        if state.active_hand != ActiveHand::Main
            || state.player_split_hand.is_some()
            || state.player_hand.len() != 2
        {
            return Err(self.reject(ActionError::CannotSurrender));
        }

        let hand = &mut self.state.player_hand;
        let refund = hand.bet() / 2;
        hand.surrender();
        self.state.player_balance += refund;
        self.state.main_hand_complete = true;
        self.state.dealer_hand.reveal_hole();

        let hand = &self.state.player_hand;
        self.state.last_result = Some(RoundResult {
            hands: alloc::vec![HandResult {
                hand: ActiveHand::Main,
                outcome: HandOutcome::Surrendered,
                bet: hand.bet(),
                payout: 0,
                player_value: hand.value(),
            }],
            dealer_value: self.state.dealer_hand.value(),
            dealer_bust: false,
            dealer_blackjack: self.state.dealer_hand.is_blackjack(),
            insurance_bet: self.insurance_bet().unwrap_or(0),
            insurance_payout: 0,
            surrender_refund: refund,
            total_payout: 0,
        });

        self.set_message("Hand surrendered. You lose half your bet.");
        self.transition(GamePhase::Result);
        self.end_round();

        Ok(refund)
    }
}
