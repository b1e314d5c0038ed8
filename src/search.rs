//! Generic adversarial search
//!
//! A game exposes four capabilities: which side is to act, whether the
//! position is over, the moves available, and a score. The minimax search
//! below is written only against that contract, so a second game would plug
//! in by implementing [`Game`].

use std::sync::atomic::{AtomicU64, Ordering};

pub(crate) static NODE_COUNT: AtomicU64 = AtomicU64::new(0);

/// Get the number of nodes visited since the last reset (for profiling)
pub fn get_node_count() -> u64 {
    NODE_COUNT.load(Ordering::Relaxed)
}

pub fn reset_node_count() {
    NODE_COUNT.store(0, Ordering::Relaxed);
}

/// An action paired with the state it produces
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Move<A, S> {
    pub action: A,
    pub state: S,
}

pub trait Game: Sized {
    type Action: Copy;

    /// Whether the side to act is the maximizing side
    fn favorable(&self) -> bool;

    fn is_terminal(&self) -> bool;

    /// Every legal action with its resulting state
    fn successors(&self) -> Vec<Move<Self::Action, Self>>;

    /// Score from the maximizing side's point of view
    fn evaluation(&self) -> i32;
}

/// Full minimax value of `state`, without pruning.
///
/// Runs of forced moves (exactly one successor) are walked in a loop rather
/// than recursed into.
pub fn minimax<G: Game>(state: &G) -> i32 {
    NODE_COUNT.fetch_add(1, Ordering::Relaxed);
    if state.is_terminal() {
        return state.evaluation();
    }

    let mut successors = state.successors();
    if successors.len() == 1 {
        if let Some(forced) = successors.pop() {
            return forced_line(forced.state);
        }
    }
    best_of(state, &successors)
}

/// Minimax value of each move available at `state`
pub fn evaluate_moves<G: Game>(state: &G) -> Vec<(G::Action, i32)> {
    if state.is_terminal() {
        return Vec::new();
    }
    state
        .successors()
        .into_iter()
        .map(|m| (m.action, minimax(&m.state)))
        .collect()
}

/// Best move for the side to act, first one on ties
pub fn best_move<G: Game>(state: &G) -> Option<(G::Action, i32)> {
    let favorable = state.favorable();
    let mut best: Option<(G::Action, i32)> = None;
    for (action, value) in evaluate_moves(state) {
        let better = match best {
            None => true,
            Some((_, v)) if favorable => value > v,
            Some((_, v)) => value < v,
        };
        if better {
            best = Some((action, value));
        }
    }
    best
}

fn forced_line<G: Game>(mut state: G) -> i32 {
    loop {
        NODE_COUNT.fetch_add(1, Ordering::Relaxed);
        if state.is_terminal() {
            return state.evaluation();
        }
        let mut successors = state.successors();
        if successors.len() != 1 {
            return best_of(&state, &successors);
        }
        match successors.pop() {
            Some(next) => state = next.state,
            None => return state.evaluation(),
        }
    }
}

fn best_of<G: Game>(state: &G, successors: &[Move<G::Action, G>]) -> i32 {
    let values = successors.iter().map(|m| minimax(&m.state));
    let best = if state.favorable() {
        values.max()
    } else {
        values.min()
    };
    // No legal move outside a terminal position cannot happen in a valid game
    best.unwrap_or_else(|| state.evaluation())
}
