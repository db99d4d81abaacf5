//! CLI blackjack demo.
//!
//! Set `RUST_LOG=shoebox=debug` to watch phase transitions and reshuffles.

use std::io::{self, Write};
use std::time::{SystemTime, UNIX_EPOCH};

use shoebox::options::ALLOWED_TABLE_MINIMUMS;
use shoebox::{
    Card, DealEvent, DealerHand, GameController, GamePhase, GameState, Hand, Seat, Suit,
};
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("Blackjack CLI demo (type 'q' to quit)");

    let seed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs();
    let mut game = GameController::new(seed);

    if !configure(&mut game) {
        return;
    }

    loop {
        if game.phase() == GamePhase::GameOver {
            println!("{}", game.message());
            match prompt_line("Start over? (y/n): ").as_str() {
                "y" | "yes" => {
                    game.reset_game(None);
                    if !configure(&mut game) {
                        return;
                    }
                }
                _ => break,
            }
        }

        if game.phase() == GamePhase::Result {
            if let Err(err) = game.bet_again() {
                println!("{err}");
                continue;
            }
        }

        let state = game.state();
        let prompt = format!(
            "Bet ({}-{}, balance {}, 0 to quit): ",
            state.min_table_limit(),
            state.max_table_limit().min(state.player_balance),
            state.player_balance
        );
        let Some(bet) = prompt_usize(&prompt) else {
            break;
        };
        if bet == 0 {
            println!("Goodbye.");
            break;
        }

        if let Err(err) = game.set_bet_observed(bet, print_deal) {
            println!("Bet error: {err}");
            continue;
        }

        if game.is_insurance_offered() {
            print_table(&game.state());
            match prompt_line("Dealer shows an Ace. Take insurance? (y/n): ").as_str() {
                "y" | "yes" => match game.take_insurance() {
                    Ok(stake) => println!("Insurance bet placed: {stake}"),
                    Err(err) => println!("Insurance error: {err}"),
                },
                _ => {
                    if let Err(err) = game.decline_insurance() {
                        println!("Insurance error: {err}");
                    }
                }
            }
        }

        while game.phase() == GamePhase::PlayerTurn {
            let state = game.state();
            print_table(&state);
            println!("{}", state.message);
            println!("{}", format_actions(&game));

            let result = match prompt_line("Action: ").as_str() {
                "h" | "hit" => game.hit().map(|_| ()),
                "s" | "stand" => game.stand(),
                "d" | "double" => game.double_down().map(|_| ()),
                "p" | "split" => game.split(),
                "u" | "surrender" => game.surrender().map(|_| ()),
                "q" | "quit" => return,
                _ => {
                    println!("Unknown action.");
                    continue;
                }
            };

            if let Err(err) = result {
                println!("Action error: {err}");
            }
        }

        let state = game.state();
        print_table(&state);
        println!("{}", state.message);
        if let Some(result) = &state.last_result {
            println!("Payout: {}", result.total_payout);
            if result.insurance_bet > 0 {
                println!("Insurance payout: {}", result.insurance_payout);
            }
            if result.surrender_refund > 0 {
                println!("Refunded: {}", result.surrender_refund);
            }
        }
        println!("Balance: {}", state.player_balance);
    }
}

/// Asks for the starting balance and a table. Returns `false` if the player quits.
fn configure(game: &mut GameController) -> bool {
    while game.state().starting_balance == 0 {
        let Some(amount) = prompt_usize("Starting balance: ") else {
            return false;
        };
        if let Err(err) = game.set_starting_balance(amount) {
            println!("{err}");
        }
    }

    let tables = ALLOWED_TABLE_MINIMUMS
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("/");

    while game.phase() != GamePhase::Betting {
        let Some(min) = prompt_usize(&format!("Table minimum ({tables}): ")) else {
            return false;
        };
        if let Err(err) = game.set_table_limits(min) {
            println!("{err}");
        } else if game.phase() != GamePhase::Betting {
            println!("{}", game.message());
        }
    }

    true
}

fn print_deal(event: &DealEvent) {
    let who = match event.seat {
        Seat::Player => "You",
        Seat::Dealer => "Dealer",
    };
    if event.face_down {
        println!("{who}: ??");
    } else {
        println!("{who}: {}", format_card(&event.card));
    }
}

fn prompt_line(prompt: &str) -> String {
    print!("{prompt}");
    let _ = io::stdout().flush();

    let mut input = String::new();
    if io::stdin().read_line(&mut input).is_err() {
        return String::new();
    }
    input.trim().to_lowercase()
}

fn prompt_usize(prompt: &str) -> Option<usize> {
    loop {
        let input = prompt_line(prompt);
        if input == "q" || input == "quit" {
            return None;
        }
        match input.parse::<usize>() {
            Ok(value) => return Some(value),
            Err(_) => println!("Please enter a number."),
        }
    }
}

fn print_table(state: &GameState) {
    let dealer = &state.dealer_hand;
    println!(
        "\nDealer: {} (value {})",
        format_dealer(dealer),
        dealer.visible_value()
    );

    for (slot, hand) in state.player_hands() {
        let marker = if slot == state.active_hand && state.phase == GamePhase::PlayerTurn {
            "*"
        } else {
            " "
        };
        println!(
            "{marker} {slot:?}: {} | value {} | bet {}",
            format_hand(hand),
            hand.value(),
            hand.bet(),
        );
    }
    println!();
}

fn format_actions(game: &GameController) -> String {
    let availability = game.available_actions();
    let parts = [
        format_action("hit", "h", availability.hit),
        format_action("stand", "s", availability.stand),
        format_action("double", "d", availability.double),
        format_action("split", "p", availability.split),
        format_action("surrender", "u", availability.surrender),
    ];
    format!("Actions: {}", parts.join(" "))
}

fn format_action(label: &str, key: &str, allowed: bool) -> String {
    let text = format!("[{key}]{label}");
    if allowed {
        colorize(&text, "32")
    } else {
        colorize(&text, "90")
    }
}

fn colorize(text: &str, code: &str) -> String {
    format!("\u{1b}[{code}m{text}\u{1b}[0m")
}

fn format_dealer(dealer: &DealerHand) -> String {
    if dealer.is_empty() {
        return "(no cards)".to_string();
    }

    if dealer.is_hole_revealed() {
        dealer
            .cards()
            .iter()
            .map(format_card)
            .collect::<Vec<_>>()
            .join(" ")
    } else {
        let mut parts = vec!["??".to_string()];
        if let Some(card) = dealer.up_card() {
            parts.push(format_card(card));
        }
        parts.join(" ")
    }
}

fn format_hand(hand: &Hand) -> String {
    if hand.is_empty() {
        return "(empty)".to_string();
    }
    hand.cards()
        .iter()
        .map(format_card)
        .collect::<Vec<_>>()
        .join(" ")
}

fn format_card(card: &Card) -> String {
    let color_code = match card.suit {
        Suit::Hearts | Suit::Diamonds => "31",
        Suit::Clubs => "32",
        Suit::Spades => "34",
    };
    colorize(&card.to_string(), color_code)
}
