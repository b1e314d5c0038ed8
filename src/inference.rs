//! Suit inference from failures to follow suit

use super::cards::*;
use super::trick::Trick;
use super::types::*;

/// Per seat, the adjusted suits that seat has been proven not to hold
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct NoSuits {
    voids: [[bool; NUM_SUITS]; NUM_SEATS],
}

impl NoSuits {
    pub fn new() -> Self {
        NoSuits::default()
    }

    /// Record that `seat` holds no card of adjusted suit `suit`
    pub fn mark(&mut self, seat: Seat, suit: Suit) {
        self.voids[seat][suit] = true;
    }

    pub fn lacks(&self, seat: Seat, suit: Suit) -> bool {
        self.voids[seat][suit]
    }

    /// Suits `seat` is proven to lack, in suit order
    pub fn suits(&self, seat: Seat) -> Vec<Suit> {
        (0..NUM_SUITS).filter(|&s| self.voids[seat][s]).collect()
    }

    /// Whether the inference rules out `seat` holding `card`
    pub fn excludes(&self, seat: Seat, card: Card, trump: Suit) -> bool {
        self.voids[seat][adjusted_suit(card, trump)]
    }

    /// Number of seats proven short of at least one suit
    pub fn len(&self) -> usize {
        self.voids
            .iter()
            .filter(|suits| suits.iter().any(|&v| v))
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Apply the follow-suit rule to one sequence of (seat, card) plays
    fn observe<I: IntoIterator<Item = (Seat, Card)>>(&mut self, plays: I, trump: Suit) {
        let mut plays = plays.into_iter();
        let Some((_, lead)) = plays.next() else {
            return;
        };
        let lead_suit = adjusted_suit(lead, trump);
        for (seat, card) in plays {
            if adjusted_suit(card, trump) != lead_suit {
                self.mark(seat, lead_suit);
            }
        }
    }

    /// Add inferences from the unfinished trick (`played` in order from `led`)
    pub fn observe_partial(&mut self, played: &[Card], led: Seat, trump: Suit, alone: Option<Seat>) {
        let trick = Trick::new(played.to_vec(), led, trump).with_alone(alone);
        self.observe(trick.plays(), trump);
    }
}

/// Infer, from completed tricks, which adjusted suits each seat cannot hold.
///
/// A seat that did not lead and played a card of a different adjusted suit
/// than the led card has none of the led suit left.
pub fn infer_no_suits(tricks: &[Trick], trump: Suit) -> NoSuits {
    let mut no_suits = NoSuits::new();
    for trick in tricks {
        no_suits.observe(trick.plays(), trump);
    }
    no_suits
}
