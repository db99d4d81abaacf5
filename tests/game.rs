//! Game controller integration tests.

use shoebox::options::SHOE_SIZE;
use shoebox::{
    ActionError, ActiveHand, BetError, Card, ConfigError, DealError, DealEvent, GameController,
    GamePhase, HandOutcome, InsuranceError, Rank, Seat, Shoe, Suit,
};

const fn card(rank: Rank) -> Card {
    Card::new(Suit::Spades, rank)
}

/// Builds a full-size shoe whose next draws are `draws`, in order.
fn stacked(draws: &[Card]) -> Shoe {
    let mut cards = vec![Card::new(Suit::Clubs, Rank::Two); SHOE_SIZE - draws.len()];
    cards.extend(draws.iter().rev());
    Shoe::from_cards(cards, 0)
}

/// A table with a 1000 balance and a 10 minimum, ready for a bet.
fn table(draws: &[Card]) -> GameController {
    let mut game = GameController::with_starting_balance(1000, 7).with_shoe(stacked(draws));
    game.set_table_limits(10).unwrap();
    assert_eq!(game.phase(), GamePhase::Betting);
    game
}

#[test]
fn both_settings_needed_to_leave_idle() {
    let mut game = GameController::new(1);
    game.set_table_limits(10).unwrap();
    assert_eq!(game.phase(), GamePhase::Idle);
    assert_eq!(
        game.message(),
        "Set your starting balance and table limits to begin"
    );

    game.set_starting_balance(1000).unwrap();
    assert_eq!(game.phase(), GamePhase::Betting);
    assert_eq!(game.message(), "Place your bet");

    let mut game = GameController::new(1);
    game.set_starting_balance(1000).unwrap();
    assert_eq!(game.phase(), GamePhase::Idle);
    assert_eq!(game.message(), "Select table limits to continue");

    game.set_table_limits(25).unwrap();
    let state = game.state();
    assert_eq!(state.phase, GamePhase::Betting);
    assert_eq!(state.min_table_limit(), 25);
    assert_eq!(state.max_table_limit(), 250);
}

#[test]
fn config_errors() {
    let mut game = GameController::new(1);

    assert_eq!(
        game.set_starting_balance(3).unwrap_err(),
        ConfigError::BalanceTooLow { min: 5 }
    );
    assert_eq!(game.message(), "Starting balance must be at least $5");

    assert_eq!(
        game.set_table_limits(20).unwrap_err(),
        ConfigError::InvalidTableLimit
    );
    assert_eq!(game.message(), "Invalid table limit selected");
    assert_eq!(game.phase(), GamePhase::Idle);
}

#[test]
fn bet_errors() {
    let mut game = GameController::new(1);
    assert_eq!(game.set_bet(10).unwrap_err(), BetError::NoTableLimits);

    let mut game = GameController::with_starting_balance(50, 1);
    game.set_table_limits(10).unwrap();

    assert_eq!(
        game.set_bet(5).unwrap_err(),
        BetError::BelowMinimum { min: 10 }
    );
    assert_eq!(game.message(), "Minimum bet is $10");

    assert_eq!(
        game.set_bet(101).unwrap_err(),
        BetError::AboveMaximum { max: 100 }
    );
    assert_eq!(game.message(), "Maximum bet is $100");

    assert_eq!(game.set_bet(60).unwrap_err(), BetError::InsufficientFunds);
    assert_eq!(game.message(), "Insufficient balance");

    assert_eq!(game.phase(), GamePhase::Betting);
    assert_eq!(game.balance(), 50);
}

#[test]
fn actions_outside_player_turn_are_rejected_without_changes() {
    let mut game = table(&[]);
    let before = game.state();

    assert_eq!(game.hit().unwrap_err(), ActionError::InvalidState);
    assert_eq!(game.stand().unwrap_err(), ActionError::InvalidState);
    assert_eq!(game.double_down().unwrap_err(), ActionError::InvalidState);
    assert_eq!(game.split().unwrap_err(), ActionError::InvalidState);
    assert_eq!(game.surrender().unwrap_err(), ActionError::InvalidState);
    assert_eq!(
        game.take_insurance().unwrap_err(),
        InsuranceError::NotOffered
    );
    assert_eq!(game.bet_again().unwrap_err(), BetError::InvalidState);

    assert_eq!(game.state(), before);
}

#[test]
fn deal_reports_each_card_in_order() {
    let draws = [
        card(Rank::Ten),   // player
        card(Rank::Nine),  // dealer hole
        card(Rank::Seven), // player
        card(Rank::Eight), // dealer up
    ];
    let mut game = table(&draws);

    let mut events: Vec<DealEvent> = Vec::new();
    game.set_bet_observed(10, |event| events.push(*event))
        .unwrap();

    assert_eq!(events.len(), 4);
    assert_eq!(
        events.iter().map(|e| e.seat).collect::<Vec<_>>(),
        [Seat::Player, Seat::Dealer, Seat::Player, Seat::Dealer]
    );
    assert_eq!(
        events.iter().map(|e| e.face_down).collect::<Vec<_>>(),
        [false, true, false, false]
    );
    assert_eq!(events.iter().map(|e| e.card).collect::<Vec<_>>(), draws);

    let state = game.state();
    assert_eq!(state.player_hand.cards(), [draws[0], draws[2]]);
    assert_eq!(state.dealer_hand.cards(), [draws[1], draws[3]]);
    assert!(!state.dealer_hand.is_hole_revealed());
    assert_eq!(state.dealer_hand.visible_value(), 8);
    assert_eq!(game.cards_remaining(), SHOE_SIZE - 4);
}

#[test]
fn scenario_push_on_matching_hard_17() {
    let mut game = table(&[
        card(Rank::Ten),
        card(Rank::Nine),
        card(Rank::Seven),
        card(Rank::Eight),
    ]);

    game.set_bet(10).unwrap();
    assert_eq!(game.phase(), GamePhase::PlayerTurn);
    assert_eq!(game.balance(), 990);
    assert!(!game.is_insurance_offered());
    assert_eq!(game.message(), "Your turn");

    game.stand().unwrap();

    let state = game.state();
    assert_eq!(state.phase, GamePhase::Result);
    assert_eq!(state.dealer_hand.len(), 2);
    assert!(state.dealer_hand.is_hole_revealed());
    assert_eq!(state.player_balance, 1000);
    assert_eq!(state.message, "Push");

    let result = state.last_result.unwrap();
    assert_eq!(result.hands[0].outcome, HandOutcome::Push);
    assert_eq!(result.hands[0].payout, 10);
    assert_eq!(result.dealer_value, 17);
}

#[test]
fn scenario_natural_pays_three_to_two_rounded_down() {
    let mut game = table(&[
        card(Rank::Ace),
        card(Rank::Ten),
        card(Rank::King),
        card(Rank::Seven),
    ]);

    game.set_bet(15).unwrap();
    assert!(!game.is_insurance_offered());
    assert_eq!(game.message(), "Blackjack! Continue playing.");
    assert_eq!(game.phase(), GamePhase::PlayerTurn);

    game.stand().unwrap();

    let result = game.state().last_result.unwrap();
    assert!(!result.dealer_blackjack);
    assert_eq!(result.hands[0].outcome, HandOutcome::Blackjack);
    assert_eq!(result.hands[0].payout, 37);
    assert_eq!(game.balance(), 1000 - 15 + 37);
}

#[test]
fn natural_against_dealer_bust() {
    let mut game = table(&[
        card(Rank::Ace),
        card(Rank::Ten),
        card(Rank::King),
        card(Rank::Six),
        card(Rank::Queen), // dealer draws to 26
    ]);

    game.set_bet(10).unwrap();
    game.stand().unwrap();

    let result = game.state().last_result.unwrap();
    assert!(result.dealer_bust);
    assert_eq!(result.hands[0].payout, 25);
    assert_eq!(game.balance(), 1015);
}

#[test]
fn scenario_split_plays_hands_independently() {
    let mut game = table(&[
        card(Rank::Eight),
        card(Rank::Ten),
        card(Rank::Eight),
        card(Rank::Seven),
        card(Rank::Five), // main hand after split
        card(Rank::Six),  // split hand after split
        card(Rank::Ten),  // main hand hit
    ]);

    game.set_bet(10).unwrap();
    assert!(game.available_actions().split);
    game.split().unwrap();

    let state = game.state();
    assert_eq!(state.player_balance, 980);
    assert_eq!(state.active_hand, ActiveHand::Main);
    assert_eq!(state.player_hand.value(), 13);
    assert!(state.player_hand.is_split());
    let split = state.player_split_hand.unwrap();
    assert_eq!(split.value(), 14);
    assert_eq!(split.bet(), 10);
    assert!(split.is_split());

    game.hit().unwrap();
    let state = game.state();
    assert!(state.player_hand.is_busted());
    assert_eq!(state.phase, GamePhase::PlayerTurn);
    assert_eq!(state.active_hand, ActiveHand::Split);
    assert!(state.main_hand_complete);
    assert_eq!(state.message, "First hand busted. Playing second hand.");

    game.stand().unwrap();
    let state = game.state();
    assert_eq!(state.phase, GamePhase::Result);
    assert_eq!(state.player_balance, 980);
    assert_eq!(state.message, "First hand: Bust | Second hand: Dealer wins");

    let result = state.last_result.unwrap();
    assert_eq!(result.hands.len(), 2);
    assert_eq!(result.hands[0].outcome, HandOutcome::Bust);
    assert_eq!(result.hands[1].outcome, HandOutcome::Lose);
}

#[test]
fn split_hands_both_win_when_dealer_busts() {
    let mut game = table(&[
        card(Rank::King),
        card(Rank::Ten),
        card(Rank::Ten),
        card(Rank::Six),
        card(Rank::Nine),  // main: K + 9
        card(Rank::Eight), // split: 10 + 8
        card(Rank::Nine),  // dealer draws to 25
    ]);

    game.set_bet(20).unwrap();
    game.split().unwrap();
    assert_eq!(game.split().unwrap_err(), ActionError::CannotSplit);

    game.stand().unwrap();
    assert_eq!(game.message(), "First hand complete. Playing second hand.");
    game.stand().unwrap();

    let result = game.state().last_result.unwrap();
    assert!(result.dealer_bust);
    assert_eq!(result.total_payout, 80);
    assert_eq!(game.balance(), 1040);
}

#[test]
fn split_requires_equal_point_value() {
    let mut game = table(&[
        card(Rank::Ten),
        card(Rank::Nine),
        card(Rank::Nine),
        card(Rank::Eight),
    ]);

    game.set_bet(10).unwrap();
    assert!(!game.available_actions().split);
    assert_eq!(game.split().unwrap_err(), ActionError::CannotSplit);
    assert_eq!(game.message(), "Cannot split this hand");
    assert_eq!(game.balance(), 990);
}

#[test]
fn split_rejected_without_funds() {
    let mut game = GameController::with_starting_balance(15, 3).with_shoe(stacked(&[
        card(Rank::Eight),
        card(Rank::Ten),
        card(Rank::Eight),
        card(Rank::Seven),
    ]));
    game.set_table_limits(10).unwrap();
    game.set_bet(10).unwrap();

    assert_eq!(
        game.split().unwrap_err(),
        ActionError::InsufficientFundsToSplit
    );
    assert_eq!(game.state().player_split_hand, None);
    assert_eq!(game.phase(), GamePhase::PlayerTurn);
}

#[test]
fn scenario_insurance_pays_on_dealer_blackjack() {
    let mut game = table(&[
        card(Rank::Ten),
        card(Rank::King), // dealer hole
        card(Rank::Seven),
        card(Rank::Ace), // dealer up
    ]);

    game.set_bet(10).unwrap();
    assert!(game.is_insurance_offered());
    assert_eq!(game.message(), "Dealer shows Ace. Would you like insurance?");
    assert!(game.available_actions().insurance);
    assert!(!game.available_actions().hit);
    assert_eq!(game.hit().unwrap_err(), ActionError::InsurancePending);

    assert_eq!(game.take_insurance().unwrap(), 5);
    assert_eq!(game.balance(), 985);
    assert!(!game.is_insurance_offered());
    assert_eq!(
        game.take_insurance().unwrap_err(),
        InsuranceError::NotOffered
    );

    game.stand().unwrap();

    let state = game.state();
    assert_eq!(
        state.message,
        "Dealer has blackjack. Insurance pays! Original bets returned."
    );
    let result = state.last_result.unwrap();
    assert!(result.dealer_blackjack);
    assert_eq!(result.insurance_bet, 5);
    assert_eq!(result.insurance_payout, 15);
    assert_eq!(result.hands[0].outcome, HandOutcome::Push);
    assert_eq!(state.player_balance, 1010);
}

#[test]
fn insurance_is_lost_without_dealer_blackjack() {
    let mut game = table(&[
        card(Rank::Ten),
        card(Rank::Nine),
        card(Rank::Nine),
        card(Rank::Ace),
    ]);

    game.set_bet(10).unwrap();
    game.take_insurance().unwrap();
    game.stand().unwrap();

    let result = game.state().last_result.unwrap();
    assert_eq!(result.insurance_payout, 0);
    assert_eq!(result.hands[0].outcome, HandOutcome::Lose);
    assert_eq!(game.balance(), 985);
}

#[test]
fn declined_insurance_continues_play() {
    let mut game = table(&[
        card(Rank::Ten),
        card(Rank::Seven),
        card(Rank::Nine),
        card(Rank::Ace),
    ]);

    game.set_bet(10).unwrap();
    game.decline_insurance().unwrap();
    assert_eq!(game.message(), "Your turn");
    assert_eq!(
        game.decline_insurance().unwrap_err(),
        InsuranceError::NotOffered
    );

    game.stand().unwrap();
    // Soft 18 stands.
    let result = game.state().last_result.unwrap();
    assert_eq!(result.dealer_value, 18);
    assert_eq!(result.hands[0].outcome, HandOutcome::Win);
    assert_eq!(game.balance(), 1010);
}

#[test]
fn busting_out_forfeits_insurance_without_dealer_turn() {
    let mut game = table(&[
        card(Rank::Ten),
        card(Rank::King), // dealer hole
        card(Rank::Six),
        card(Rank::Ace), // dealer up
        card(Rank::King), // player busts
    ]);

    game.set_bet(100).unwrap();
    assert_eq!(game.take_insurance().unwrap(), 50);
    assert_eq!(game.balance(), 850);

    game.hit().unwrap();

    let state = game.state();
    assert_eq!(state.phase, GamePhase::Result);
    assert_eq!(state.message, "Bust! You lose.");
    assert_eq!(state.dealer_hand.len(), 2);
    assert_eq!(state.player_balance, 850);

    let result = state.last_result.unwrap();
    assert!(result.dealer_blackjack);
    assert_eq!(result.insurance_bet, 50);
    assert_eq!(result.insurance_payout, 0);
    assert_eq!(result.hands[0].outcome, HandOutcome::Bust);
    assert_eq!(result.total_payout, 0);
}

#[test]
fn insured_dealer_blackjack_only_returns_live_bets() {
    let mut game = table(&[
        card(Rank::Eight),
        card(Rank::King), // dealer hole
        card(Rank::Eight),
        card(Rank::Ace),  // dealer up
        card(Rank::Five), // main hand after split
        card(Rank::Nine), // split hand after split
        card(Rank::King), // main hand busts
    ]);

    game.set_bet(10).unwrap();
    game.take_insurance().unwrap();
    game.split().unwrap();
    game.hit().unwrap();
    assert_eq!(game.state().active_hand, ActiveHand::Split);
    game.stand().unwrap();

    let state = game.state();
    assert_eq!(
        state.message,
        "Dealer has blackjack. Insurance pays! First hand: Bust | Second hand: Push"
    );
    let result = state.last_result.unwrap();
    assert_eq!(result.insurance_payout, 15);
    assert_eq!(result.hands[0].outcome, HandOutcome::Bust);
    assert_eq!(result.hands[1].outcome, HandOutcome::Push);
    assert_eq!(state.player_balance, 1000 - 10 - 5 - 10 + 15 + 10);
}

#[test]
fn uninsured_dealer_blackjack_beats_every_live_hand() {
    let mut game = table(&[
        card(Rank::Ace),
        card(Rank::King),
        card(Rank::King),
        card(Rank::Ace),
    ]);

    game.set_bet(10).unwrap();
    game.decline_insurance().unwrap();
    game.stand().unwrap();

    let state = game.state();
    assert_eq!(state.message, "Dealer has blackjack. Dealer wins.");
    let result = state.last_result.unwrap();
    assert!(state.player_hand.is_blackjack());
    assert_eq!(result.hands[0].outcome, HandOutcome::Lose);
    assert_eq!(state.player_balance, 990);
}

#[test]
fn double_down_takes_one_card_and_settles() {
    let mut game = table(&[
        card(Rank::Five),
        card(Rank::Nine),
        card(Rank::Six),
        card(Rank::Eight),
        card(Rank::Ten), // double card
    ]);

    game.set_bet(10).unwrap();
    let drawn = game.double_down().unwrap();
    assert_eq!(drawn.rank, Rank::Ten);

    let state = game.state();
    assert!(state.player_hand.is_double_down());
    assert_eq!(state.player_hand.bet(), 20);
    assert_eq!(state.phase, GamePhase::Result);
    assert_eq!(state.player_balance, 1000 - 20 + 40);
}

#[test]
fn double_down_needs_two_cards() {
    let mut game = table(&[
        card(Rank::Two),
        card(Rank::Nine),
        card(Rank::Three),
        card(Rank::Eight),
        card(Rank::Four),
    ]);

    game.set_bet(10).unwrap();
    game.hit().unwrap();
    assert!(!game.available_actions().double);
    assert_eq!(game.double_down().unwrap_err(), ActionError::CannotDouble);
    assert_eq!(game.state().player_hand.bet(), 10);
}

#[test]
fn bust_ends_round_without_dealer_draw() {
    let mut game = table(&[
        card(Rank::Ten),
        card(Rank::Two),
        card(Rank::Six),
        card(Rank::Three),
        card(Rank::King), // player busts
    ]);

    game.set_bet(10).unwrap();
    game.hit().unwrap();

    let state = game.state();
    assert_eq!(state.phase, GamePhase::Result);
    assert_eq!(state.message, "Bust! You lose.");
    assert_eq!(state.dealer_hand.len(), 2);
    assert_eq!(state.player_balance, 990);
    assert_eq!(game.cards_remaining(), SHOE_SIZE - 5);
}

#[test]
fn surrender_refunds_half_and_skips_dealer() {
    let mut game = table(&[
        card(Rank::Ten),
        card(Rank::Ten),
        card(Rank::Six),
        card(Rank::Six),
    ]);

    game.set_bet(10).unwrap();
    assert!(game.available_actions().surrender);
    assert_eq!(game.surrender().unwrap(), 5);

    let state = game.state();
    assert_eq!(state.phase, GamePhase::Result);
    assert!(state.player_hand.is_surrendered());
    assert_eq!(state.dealer_hand.len(), 2);
    assert_eq!(state.player_balance, 995);
    assert_eq!(state.message, "Hand surrendered. You lose half your bet.");

    let result = state.last_result.unwrap();
    assert_eq!(result.hands[0].outcome, HandOutcome::Surrendered);
    assert_eq!(result.surrender_refund, 5);
}

#[test]
fn surrender_only_on_first_two_cards() {
    let mut game = table(&[
        card(Rank::Two),
        card(Rank::Ten),
        card(Rank::Three),
        card(Rank::Seven),
        card(Rank::Four),
    ]);

    game.set_bet(10).unwrap();
    game.hit().unwrap();
    assert_eq!(game.surrender().unwrap_err(), ActionError::CannotSurrender);
    assert_eq!(game.phase(), GamePhase::PlayerTurn);
}

#[test]
fn losing_the_last_chips_ends_the_game() {
    let mut game = GameController::with_starting_balance(10, 5).with_shoe(stacked(&[
        card(Rank::Ten),
        card(Rank::Ten),
        card(Rank::Six),
        card(Rank::Eight),
    ]));
    game.set_table_limits(10).unwrap();

    game.set_bet(10).unwrap();
    game.stand().unwrap();

    assert_eq!(game.phase(), GamePhase::GameOver);
    assert_eq!(game.balance(), 0);
    assert_eq!(
        game.message(),
        "Game Over! Insufficient balance to continue."
    );
    assert_eq!(game.bet_again().unwrap_err(), BetError::GameOver);
    assert_eq!(
        game.bet_and_deal_again(None).unwrap_err(),
        BetError::GameOver
    );

    game.reset_game(Some(200));
    let state = game.state();
    assert_eq!(state.phase, GamePhase::Idle);
    assert_eq!(state.player_balance, 200);
    assert_eq!(state.starting_balance, 200);
    assert_eq!(state.table_limits, None);
    assert_eq!(game.cards_remaining(), SHOE_SIZE);
}

#[test]
fn bet_again_prefills_previous_bet() {
    let mut game = table(&[
        card(Rank::Ten),
        card(Rank::Nine),
        card(Rank::Seven),
        card(Rank::Eight),
    ]);

    game.set_bet(25).unwrap();
    game.stand().unwrap();
    assert_eq!(game.phase(), GamePhase::Result);

    assert_eq!(game.bet_again().unwrap(), 25);
    assert_eq!(game.phase(), GamePhase::Betting);
    assert_eq!(
        game.message(),
        "Adjust your bet amount if needed, then click Deal"
    );

    game.set_bet(30).unwrap();
    assert_eq!(game.phase(), GamePhase::PlayerTurn);
    assert_eq!(game.balance(), 970);
}

#[test]
fn bet_and_deal_again_deals_immediately() {
    let mut game = table(&[
        card(Rank::Ten),
        card(Rank::Nine),
        card(Rank::Seven),
        card(Rank::Eight),
    ]);

    game.set_bet(10).unwrap();
    game.stand().unwrap();

    assert_eq!(
        game.bet_and_deal_again(Some(500)).unwrap_err(),
        BetError::AboveMaximum { max: 100 }
    );
    assert_eq!(game.phase(), GamePhase::Result);

    let mut dealt = 0;
    game.bet_and_deal_again_observed(None, |_| dealt += 1)
        .unwrap();
    assert_eq!(dealt, 4);

    let state = game.state();
    assert_eq!(state.phase, GamePhase::PlayerTurn);
    assert_eq!(state.current_bet, 10);
    assert_eq!(state.player_balance, 990);
    assert_eq!(state.player_hand.len(), 2);
    assert_eq!(state.last_result, None);
}

#[test]
fn empty_shoe_aborts_the_deal() {
    let mut game =
        GameController::with_starting_balance(1000, 1).with_shoe(Shoe::from_cards(Vec::new(), 1));
    game.set_table_limits(10).unwrap();

    assert_eq!(
        game.set_bet(10).unwrap_err(),
        BetError::Deal(DealError::NoCards)
    );
    assert_eq!(game.message(), "Error: Unable to deal cards");
    assert_eq!(game.phase(), GamePhase::Betting);
    assert_eq!(game.balance(), 1000);
}

#[test]
fn balance_is_conserved_over_many_rounds() {
    let start = 1000;
    let mut game = GameController::with_starting_balance(start, 2024);
    game.set_table_limits(10).unwrap();

    let mut staked = 0;
    let mut returned = 0;

    for round in 0..300 {
        let dealt = match game.phase() {
            GamePhase::Betting => game.set_bet(10),
            GamePhase::Result => game.bet_and_deal_again(None),
            _ => break,
        };
        if dealt.is_err() {
            break;
        }

        if game.is_insurance_offered() {
            if round % 2 == 0 && game.balance() >= 5 {
                game.take_insurance().unwrap();
            } else {
                game.decline_insurance().unwrap();
            }
        }

        while game.phase() == GamePhase::PlayerTurn {
            let actions = game.available_actions();
            let value = game.state().active().value();

            if round % 11 == 0 && actions.surrender {
                game.surrender().unwrap();
            } else if round % 3 == 0 && actions.split {
                game.split().unwrap();
            } else if actions.double && (10..=11).contains(&value) {
                game.double_down().unwrap();
            } else if value < 17 {
                game.hit().unwrap();
            } else {
                game.stand().unwrap();
            }
        }

        let result = game.state().last_result.unwrap();
        staked += result.hands.iter().map(|h| h.bet).sum::<usize>() + result.insurance_bet;
        returned += result.total_payout + result.surrender_refund;

        assert_eq!(game.balance() + staked, start + returned);
    }

    assert!(staked > 0);
}
