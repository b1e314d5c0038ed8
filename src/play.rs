//! Trick resolution: card comparison, trick winner, legal plays

use super::cards::*;
use super::types::*;

/// Returns whether `a` beats `b` under `trump`, where `a` was played first
/// (led, or currently winning) and `b` responds.
///
/// If the two cards are of different non-trump suits, `a` wins because `b`
/// failed to follow.
pub fn beats(a: Card, b: Card, trump: Suit) -> bool {
    let a_trump = is_trump(a, trump);
    let b_trump = is_trump(b, trump);

    if a_trump != b_trump {
        return a_trump;
    }

    if a_trump {
        // Both trump: bowers first
        if is_right_bower(a, trump) {
            return true;
        }
        if is_right_bower(b, trump) {
            return false;
        }
        if is_left_bower(a, trump) {
            return true;
        }
        if is_left_bower(b, trump) {
            return false;
        }
        return adjusted_rank(a, trump) > adjusted_rank(b, trump);
    }

    if suit_of(a) == suit_of(b) {
        return rank_of(a) > rank_of(b);
    }

    true
}

/// Offset (in play order) of the card that wins `played`
pub fn winning_offset(played: &[Card], trump: Suit) -> usize {
    let mut best = 0;
    for (i, &card) in played.iter().enumerate().skip(1) {
        if !beats(played[best], card, trump) {
            best = i;
        }
    }
    best
}

/// Seat that wins a trick led by `led`, assuming one card per seat in
/// clockwise order. Fewer than 2 cards returns the leader.
pub fn winner(played: &[Card], trump: Suit, led: Seat) -> Seat {
    if played.len() < 2 {
        return led;
    }
    (led + winning_offset(played, trump)) % NUM_SEATS
}

/// Positions in `hand` that may legally be played to `played`.
///
/// A player must follow the adjusted suit of the led card when able; with an
/// empty trick or no matching card every position is legal. Positions rather
/// than cards are returned so the caller can remove the chosen card in place.
pub fn possible(hand: &[Card], played: &[Card], trump: Suit) -> Vec<usize> {
    if let Some(&lead) = played.first() {
        let lead_suit = adjusted_suit(lead, trump);
        let follows: Vec<usize> = hand
            .iter()
            .enumerate()
            .filter(|(_, &c)| adjusted_suit(c, trump) == lead_suit)
            .map(|(i, _)| i)
            .collect();
        if !follows.is_empty() {
            return follows;
        }
    }

    // Can play any card
    (0..hand.len()).collect()
}
