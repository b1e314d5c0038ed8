//! Euchre card-play solver
//!
//! Decides which card seat 0 should play given only what it can see: its
//! own hand, the cards played so far and what the bidding revealed.
//!
//! The pieces:
//! - Trick resolution with bowers and follow-suit rules
//! - Suit inference from seats that failed to follow
//! - Determinization of the hidden cards into one consistent deal, or
//!   exhaustive enumeration of every consistent deal
//! - Plain minimax over a generic [`Game`] contract
//!
//! # Example
//!
//! ```
//! use euchre_solver::{choose_card, parse_cards, Pickup, Setup, SolverConfig, State, HEART};
//! use rand::rngs::StdRng;
//! use rand::SeedableRng;
//!
//! // Seat 3 dealt and turned down the S9; seat 0 called hearts and leads
//! let top = euchre_solver::parse_card("S9").unwrap();
//! let setup = Setup::new(3, 0, top, HEART, Pickup::TurnedDown);
//! let state = State::new(setup, parse_cards("HJ DJ HA CA DA").unwrap());
//!
//! let mut rng = StdRng::seed_from_u64(1);
//! let decision = choose_card(&state, &SolverConfig::default(), &mut rng).unwrap();
//! assert!(state.hands[0].contains(&decision.card));
//! ```

pub mod cards;
mod deal;
mod determinize;
mod enumerate;
mod error;
mod inference;
mod play;
mod search;
mod setup;
mod solver;
mod state;
mod trick;
pub mod types;

pub use cards::{name_of, names_of, parse_card, parse_cards, Card, Cards};
pub use deal::Deal;
pub use determinize::{determinize, KITTY_SLOT, MAX_DETERMINIZE_ATTEMPTS};
pub use enumerate::{
    enumerate_deals, multinomial_coefficient, spawn_multinomial, Combinations, Handoff,
    Multinomial, Partition,
};
pub use error::{EuchreError, Result};
pub use inference::{infer_no_suits, NoSuits};
pub use play::{beats, possible, winner};
pub use search::{best_move, evaluate_moves, get_node_count, minimax, reset_node_count, Game, Move};
pub use setup::{Pickup, Setup};
pub use solver::{choose_card, Decision, SolverConfig};
pub use state::{score, State};
pub use trick::Trick;
pub use types::{Rank, Seat, Suit, HAND_SIZE, NUM_SEATS, NUM_SUITS, TOTAL_CARDS, TOTAL_TRICKS};
pub use types::{CLUB, DIAMOND, HEART, SPADE};
