//! A single-table blackjack round engine with optional `no_std` support.
//!
//! The crate provides a [`GameController`] that runs a round from betting
//! through the deal, player actions, insurance, the dealer's turn and
//! settlement, drawing from a four-deck [`Shoe`]. Rendering is left to the
//! caller, which reads [`GameState`] snapshots and calls action methods.
//!
//! # Example
//!
//! ```
//! use shoebox::{GameController, GamePhase};
//!
//! let mut game = GameController::with_starting_balance(500, 42);
//! game.set_table_limits(25).unwrap();
//! game.set_bet(50).unwrap();
//!
//! if game.is_insurance_offered() {
//!     game.decline_insurance().unwrap();
//! }
//! game.stand().unwrap();
//! assert!(matches!(game.phase(), GamePhase::Result | GamePhase::GameOver));
//! ```
#![cfg_attr(not(feature = "std"), no_std)]
#![cfg_attr(docsrs, feature(doc_cfg))]

#[cfg(all(not(feature = "std"), not(feature = "alloc")))]
compile_error!(
    "`std` is disabled but `alloc` feature is not enabled. Enable `alloc` or keep `std` enabled."
);

extern crate alloc;

pub mod card;
pub mod dealer;
pub mod error;
pub mod evaluator;
pub mod game;
pub mod hand;
pub mod options;
pub mod result;
pub mod shoe;

// Re-export main types
pub use card::{Card, DECK_SIZE, Rank, Suit};
pub use error::{ActionError, BetError, ConfigError, DealError, InsuranceError};
pub use game::{
    ActionAvailability, ActiveHand, DealEvent, GameController, GamePhase, GameState, Seat,
};
pub use hand::{DealerHand, Hand};
pub use options::TableLimits;
pub use result::{HandOutcome, HandResult, RoundResult};
pub use shoe::Shoe;
