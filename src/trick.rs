//! A completed trick

use super::cards::*;
use super::play::winning_offset;
use super::types::*;

/// Cards played in one trick, in seat order starting from `led`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Trick {
    pub cards: Vec<Card>,
    pub led: Seat,
    pub trump: Suit,
    /// Seat playing alone; its partner contributes no card
    pub alone: Option<Seat>,
}

impl Trick {
    pub fn new(cards: Vec<Card>, led: Seat, trump: Suit) -> Self {
        Trick {
            cards,
            led,
            trump,
            alone: None,
        }
    }

    pub fn with_alone(mut self, alone: Option<Seat>) -> Self {
        self.alone = alone;
        self
    }

    /// Seat that played the card at `offset`
    pub fn seat_at(&self, offset: usize) -> Seat {
        let skip = self.alone.map(partner);
        let mut seat = self.led;
        for _ in 0..offset {
            seat = next_seat(seat);
            if Some(seat) == skip {
                seat = next_seat(seat);
            }
        }
        seat
    }

    /// (seat, card) pairs in play order
    pub fn plays(&self) -> impl Iterator<Item = (Seat, Card)> + '_ {
        self.cards
            .iter()
            .enumerate()
            .map(|(i, &card)| (self.seat_at(i), card))
    }

    /// Adjusted suit of the led card
    pub fn lead_suit(&self) -> Option<Suit> {
        self.cards.first().map(|&c| adjusted_suit(c, self.trump))
    }

    /// Seat that won the trick
    pub fn winner(&self) -> Seat {
        if self.cards.len() < 2 {
            return self.led;
        }
        self.seat_at(winning_offset(&self.cards, self.trump))
    }
}

impl std::fmt::Display for Trick {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.led, names_of(&self.cards))
    }
}
