//! Single-deck blackjack with optional `no_std` support.
//!
//! The crate provides a [`Round`] type that runs one round between a player
//! and the dealer: the deal, the natural-blackjack check, the player's turn,
//! the dealer's fixed stand-on-17 turn and the settlement. The [`Simulator`]
//! plays many rounds with an automated player and tallies the outcomes.
//!
//! # Example
//!
//! ```
//! use rand::SeedableRng;
//! use rand_chacha::ChaCha8Rng;
//! use twentyone::{Round, ThresholdPolicy};
//!
//! let mut rng = ChaCha8Rng::seed_from_u64(42);
//! let round = Round::play(ThresholdPolicy::default(), &mut rng).unwrap();
//! assert!(round.is_settled());
//! ```
#![cfg_attr(not(feature = "std"), no_std)]
#![cfg_attr(docsrs, feature(doc_cfg))]

#[cfg(all(not(feature = "std"), not(feature = "alloc")))]
compile_error!(
    "`std` is disabled but `alloc` feature is not enabled. Enable `alloc` or keep `std` enabled."
);

extern crate alloc;

pub mod card;
pub mod deck;
pub mod error;
pub mod game;
pub mod hand;
pub mod options;
pub mod policy;
pub mod result;
pub mod sim;

// Re-export main types
pub use card::{Card, DECK_SIZE, HIDDEN_CARD_CODE, Rank, Suit};
pub use deck::Deck;
pub use error::{
    ActionError, DealError, DealerError, ParseCardError, ParseDecisionError, RoundError,
};
pub use game::{CardFace, Round, RoundState, TableView};
pub use hand::{BLACKJACK, DealerHand, Hand, evaluate};
pub use options::SimulationOptions;
pub use policy::{DEALER_STANDS_ON, Decision, PlayerPolicy, ThresholdPolicy, dealer_should_hit};
pub use result::{Outcome, RoundResult, Settlement};
pub use sim::{SimulationReport, Simulator, Tally, run_batch};
