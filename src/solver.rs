//! Card choice for seat 0 from its imperfect view of the deal

use rand::Rng;
use tracing::{debug, trace};

use super::cards::*;
use super::deal::Deal;
use super::determinize::determinize;
use super::enumerate::enumerate_deals;
use super::error::{EuchreError, Result};
use super::search::{evaluate_moves, get_node_count, reset_node_count, Game};
use super::state::State;

/// How hard to think, by cards left in hand
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SolverConfig {
    /// Enumerate every consistent deal at or below this many cards
    pub exhaustive_limit: usize,
    /// Search sampled deals at or below this many cards
    pub sample_limit: usize,
    /// Deals drawn when sampling
    pub samples: usize,
}

impl Default for SolverConfig {
    fn default() -> Self {
        SolverConfig {
            exhaustive_limit: 3,
            sample_limit: 4,
            samples: 32,
        }
    }
}

/// The chosen card and how it was reached
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Decision {
    pub card: Card,
    /// Position of `card` in seat 0's hand
    pub index: usize,
    /// Minimax values summed over the searched deals, per legal card
    pub values: Vec<(Card, i64)>,
    /// Deals searched; 0 when no search was needed or the card was random
    pub worlds: usize,
}

impl Decision {
    fn new(hand: &[Card], card: Card, values: Vec<(Card, i64)>, worlds: usize) -> Self {
        Decision {
            card,
            index: hand.iter().position(|&c| c == card).unwrap_or(0),
            values,
            worlds,
        }
    }
}

/// Pick the card seat 0 should play.
///
/// Small hands are searched over every deal consistent with what seat 0
/// has seen, medium hands over a sample of determinized deals, and larger
/// hands get a random legal card. The card with the best summed value
/// wins, the earlier one in hand on ties.
pub fn choose_card<R: Rng + ?Sized>(state: &State, config: &SolverConfig, rng: &mut R) -> Result<Decision> {
    state.validate()?;
    if state.player != 0 {
        return Err(EuchreError::NotOurTurn(state.player));
    }
    if state.is_terminal() {
        return Err(EuchreError::InvalidState("the deal is over".into()));
    }

    let hand = &state.hands[0];
    let legal = state.candidates();
    if let [only] = legal[..] {
        debug!(card = %name_of(only), "single legal card");
        return Ok(Decision::new(hand, only, Vec::new(), 0));
    }

    reset_node_count();
    let mut values: Vec<(Card, i64)> = legal.iter().map(|&c| (c, 0)).collect();
    let worlds = if hand.len() <= config.exhaustive_limit {
        search_deals(state, enumerate_deals(state), &mut values)
    } else if hand.len() <= config.sample_limit {
        let deals = (0..config.samples)
            .map(|_| determinize(state, rng))
            .collect::<Result<Vec<Deal>>>()?;
        search_deals(state, deals, &mut values)
    } else {
        let card = legal[rng.random_range(0..legal.len())];
        debug!(card = %name_of(card), cards = hand.len(), "too many cards to search, playing at random");
        return Ok(Decision::new(hand, card, Vec::new(), 0));
    };

    let mut best = values[0];
    for &(card, value) in &values[1..] {
        if value > best.1 {
            best = (card, value);
        }
    }

    debug!(
        card = %name_of(best.0),
        worlds,
        nodes = get_node_count(),
        "searched {} card(s)",
        hand.len()
    );
    Ok(Decision::new(hand, best.0, values, worlds))
}

/// Add each root card's minimax value in every deal to `values`
fn search_deals<I: IntoIterator<Item = Deal>>(state: &State, deals: I, values: &mut [(Card, i64)]) -> usize {
    let mut worlds = 0;
    for deal in deals {
        let world = state.with_deal(&deal);
        debug_assert!(!world.is_terminal());
        for (card, value) in evaluate_moves(&world) {
            if let Some(entry) = values.iter_mut().find(|(c, _)| *c == card) {
                entry.1 += i64::from(value);
            }
        }
        trace!(world = worlds, ?deal, "searched");
        worlds += 1;
    }
    worlds
}
