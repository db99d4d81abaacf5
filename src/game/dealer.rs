use alloc::string::String;
use alloc::vec::Vec;

use tracing::info;

use crate::dealer;
use crate::hand::Hand;
use crate::result::{HandOutcome, HandResult, RoundResult};

use super::{ActiveHand, GameController, GamePhase};

fn per_hand_summary(hands: &[HandResult]) -> String {
    hands
        .iter()
        .map(|result| {
            let label = match result.hand {
                ActiveHand::Main => "First hand",
                ActiveHand::Split => "Second hand",
            };
            alloc::format!("{label}: {}", result.outcome.describe())
        })
        .collect::<Vec<_>>()
        .join(" | ")
}

/// Amount returned for a hand that beats the dealer.
const fn win_payout(hand: &Hand) -> (HandOutcome, usize) {
    if hand.is_blackjack() {
        // 3:2, rounded down.
        (HandOutcome::Blackjack, hand.bet() * 5 / 2)
    } else {
        (HandOutcome::Win, hand.bet() * 2)
    }
}

impl GameController {
    /// Reveals the hole card, lets the dealer draw and settles the round.
    pub(super) fn play_dealer_turn(&mut self) {
        self.transition(GamePhase::DealerTurn);
        self.state.dealer_hand.reveal_hole();

        let shoe = &mut self.shoe;
        let cards = dealer::play_turn(self.state.dealer_hand.cards(), || shoe.draw());
        self.state.dealer_hand.set_cards(cards);

        self.settle(true);
    }

    /// Ends a round in which every player hand busted.
    ///
    /// The dealer does not play and an insurance stake is forfeited.
    pub(super) fn settle_bust_out(&mut self) {
        self.state.dealer_hand.reveal_hole();
        self.settle(false);
    }

    fn hand_result(&self, slot: ActiveHand, hand: &Hand) -> HandResult {
        let dealer = &self.state.dealer_hand;
        let bet = hand.bet();

        let (outcome, payout) = if hand.is_busted() {
            (HandOutcome::Bust, 0)
        } else if dealer.is_blackjack() {
            // Insured: every live hand pushes. Uninsured: the dealer's
            // natural beats every live hand, a player natural included.
            if self.state.insurance_taken {
                (HandOutcome::Push, bet)
            } else {
                (HandOutcome::Lose, 0)
            }
        } else if dealer.is_bust() || hand.is_blackjack() {
            win_payout(hand)
        } else {
            match hand.value().cmp(&dealer.value()) {
                core::cmp::Ordering::Greater => (HandOutcome::Win, bet * 2),
                core::cmp::Ordering::Equal => (HandOutcome::Push, bet),
                core::cmp::Ordering::Less => (HandOutcome::Lose, 0),
            }
        };

        HandResult {
            hand: slot,
            outcome,
            bet,
            payout,
            player_value: hand.value(),
        }
    }

    fn settle(&mut self, dealer_played: bool) {
        let dealer_blackjack = self.state.dealer_hand.is_blackjack();

        let insurance_bet = self.insurance_bet().unwrap_or(0);
        let insurance_payout = if dealer_played && dealer_blackjack {
            // Stake back plus 2:1.
            insurance_bet * 3
        } else {
            0
        };

        let hands: Vec<HandResult> = self
            .state
            .player_hands()
            .map(|(slot, hand)| self.hand_result(slot, hand))
            .collect();

        let total_payout =
            hands.iter().map(|result| result.payout).sum::<usize>() + insurance_payout;
        self.state.player_balance += total_payout;

        let message = self.settlement_message(&hands, dealer_played && dealer_blackjack);
        self.set_message(message);

        info!(
            total_payout,
            insurance_payout,
            balance = self.state.player_balance,
            "round settled"
        );

        self.state.last_result = Some(RoundResult {
            hands,
            dealer_value: self.state.dealer_hand.value(),
            dealer_bust: self.state.dealer_hand.is_bust(),
            dealer_blackjack,
            insurance_bet,
            insurance_payout,
            surrender_refund: 0,
            total_payout,
        });

        self.transition(GamePhase::Result);
        self.end_round();
    }

    fn settlement_message(&self, hands: &[HandResult], dealer_blackjack: bool) -> String {
        if dealer_blackjack {
            if !self.state.insurance_taken {
                return String::from("Dealer has blackjack. Dealer wins.");
            }

            let lead = "Dealer has blackjack. Insurance pays!";
            return match hands {
                _ if hands.iter().all(|result| result.outcome == HandOutcome::Push) => {
                    alloc::format!("{lead} Original bets returned.")
                }
                [_] => String::from(lead),
                _ => alloc::format!("{lead} {}", per_hand_summary(hands)),
            };
        }

        match hands {
            [only] if only.outcome == HandOutcome::Bust => String::from("Bust! You lose."),
            [only] => String::from(only.outcome.describe()),
            _ => per_hand_summary(hands),
        }
    }

    /// Ends the session if the balance no longer covers the table minimum.
    pub(super) fn end_round(&mut self) {
        if self.state.player_balance < self.game_over_threshold() {
            self.transition(GamePhase::GameOver);
            self.set_message("Game Over! Insufficient balance to continue.");
        }
    }
}
