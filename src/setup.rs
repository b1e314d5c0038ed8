//! Deal context fixed before the first card is played

use super::cards::*;
use super::error::{EuchreError, Result};
use super::types::*;

/// What happened to the top card of the kitty
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Pickup {
    /// Nobody ordered it up; it stays face up in the kitty
    TurnedDown,
    /// The dealer (not seat 0) picked it up and discarded an unseen card
    Kept,
    /// Seat 0 dealt, picked it up and discarded this card
    Discarded(Card),
}

/// Everything decided before play starts
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Setup {
    pub dealer: Seat,
    pub caller: Seat,
    pub top: Card,
    pub trump: Suit,
    pub pickup: Pickup,
    /// Seat playing alone, if any; its partner sits out
    pub alone: Option<Seat>,
}

impl Setup {
    pub fn new(dealer: Seat, caller: Seat, top: Card, trump: Suit, pickup: Pickup) -> Self {
        Setup {
            dealer,
            caller,
            top,
            trump,
            pickup,
            alone: None,
        }
    }

    /// Mark `seat` as playing alone
    pub fn with_alone(mut self, seat: Seat) -> Self {
        self.alone = Some(seat);
        self
    }

    #[inline]
    pub fn picked_up(&self) -> bool {
        !matches!(self.pickup, Pickup::TurnedDown)
    }

    /// Seat that sits out this deal (the lone player's partner)
    #[inline]
    pub fn sitting_out(&self) -> Option<Seat> {
        self.alone.map(partner)
    }

    #[inline]
    pub fn is_active(&self, seat: Seat) -> bool {
        self.sitting_out() != Some(seat)
    }

    /// Cards played to each trick
    #[inline]
    pub fn trick_size(&self) -> usize {
        if self.alone.is_some() {
            NUM_SEATS - 1
        } else {
            NUM_SEATS
        }
    }

    /// Next seat to play after `seat`, skipping a seat that sits out
    pub fn next_active(&self, seat: Seat) -> Seat {
        let next = next_seat(seat);
        if self.is_active(next) {
            next
        } else {
            next_seat(next)
        }
    }

    /// Previous seat in play order, skipping a seat that sits out
    pub fn prev_active(&self, seat: Seat) -> Seat {
        let prev = prev_seat(seat);
        if self.is_active(prev) {
            prev
        } else {
            prev_seat(prev)
        }
    }

    /// Seat that leads the first trick
    pub fn first_leader(&self) -> Seat {
        self.next_active(self.dealer)
    }

    /// Card seat 0 knows to be in the kitty, if any
    pub fn known_kitty_card(&self) -> Option<Card> {
        match self.pickup {
            Pickup::TurnedDown => Some(self.top),
            Pickup::Kept => None,
            Pickup::Discarded(card) => Some(card),
        }
    }

    /// Seat known to hold the top card from the deal, if not seat 0
    pub fn known_top_holder(&self) -> Option<Seat> {
        match self.pickup {
            Pickup::Kept => Some(self.dealer),
            _ => None,
        }
    }

    pub fn validate(&self) -> Result<()> {
        for (what, seat) in [("dealer", self.dealer), ("caller", self.caller)] {
            if seat >= NUM_SEATS {
                return Err(EuchreError::InvalidSetup(format!("{what} seat {seat} out of range")));
            }
        }
        if self.top >= TOTAL_CARDS || self.trump >= NUM_SUITS {
            return Err(EuchreError::InvalidSetup("top card or trump out of range".into()));
        }
        if let Some(seat) = self.alone {
            if seat >= NUM_SEATS {
                return Err(EuchreError::InvalidSetup(format!("lone seat {seat} out of range")));
            }
            if team_of(seat) != team_of(self.caller) {
                return Err(EuchreError::InvalidSetup(format!(
                    "seat {seat} plays alone but seat {} called",
                    self.caller
                )));
            }
        }

        match self.pickup {
            Pickup::TurnedDown => {
                if suit_of(self.top) == self.trump {
                    return Err(EuchreError::InvalidSetup(format!(
                        "top {} was turned down but its suit is trump",
                        name_of(self.top)
                    )));
                }
            }
            Pickup::Kept | Pickup::Discarded(_) => {
                if suit_of(self.top) != self.trump {
                    return Err(EuchreError::InvalidSetup(format!(
                        "top {} was picked up but trump is {}",
                        name_of(self.top),
                        suit_name(self.trump)
                    )));
                }
                if !self.is_active(self.dealer) {
                    return Err(EuchreError::InvalidSetup(
                        "dealer sits out but picked up the top card".into(),
                    ));
                }
            }
        }

        match self.pickup {
            Pickup::Kept if self.dealer == 0 => Err(EuchreError::InvalidSetup(
                "seat 0 dealt and picked up, so its discard must be known".into(),
            )),
            Pickup::Discarded(_) if self.dealer != 0 => Err(EuchreError::InvalidSetup(format!(
                "discard known but seat {} dealt",
                self.dealer
            ))),
            Pickup::Discarded(card) if card >= TOTAL_CARDS || card == self.top => Err(
                EuchreError::InvalidSetup("discard must be a card other than the top".into()),
            ),
            _ => Ok(()),
        }
    }
}
