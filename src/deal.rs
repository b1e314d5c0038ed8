//! Four hands plus the out-of-play pile

use super::cards::*;
use super::error::{EuchreError, Result};
use super::types::*;

/// A fully specified card layout: one hand per seat and the kitty.
///
/// The kitty holds every card not in play, including a sitting-out
/// partner's hand.
#[derive(Clone, PartialEq, Eq, Default)]
pub struct Deal {
    pub hands: [Vec<Card>; NUM_SEATS],
    pub kitty: Vec<Card>,
}

impl Deal {
    pub fn new() -> Self {
        Deal::default()
    }

    /// Get all cards across all hands and the kitty
    pub fn all_cards(&self) -> Cards {
        let mut all = Cards::new();
        for hand in &self.hands {
            all.add_cards(hand);
        }
        all.add_cards(&self.kitty);
        all
    }

    /// Total number of cards placed, counting duplicates
    pub fn len(&self) -> usize {
        self.hands.iter().map(Vec::len).sum::<usize>() + self.kitty.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Parse from a PBN-like string: "0:A9.J.-.KQ T.9A.K.- ..." with the
    /// four hands in seat order from the given seat, suits SHDC separated
    /// by dots. An optional fifth group is the kitty.
    pub fn from_pbn(s: &str) -> Result<Self> {
        let mut deal = Deal::new();

        let (start_seat, rest) = match s.split_once(':') {
            Some((seat, rest)) => {
                let seat = seat
                    .trim()
                    .chars()
                    .next()
                    .and_then(char_to_seat)
                    .ok_or_else(|| EuchreError::InvalidSeat(seat.to_string()))?;
                (seat, rest)
            }
            None => (0, s),
        };

        let groups: Vec<&str> = rest.split_whitespace().collect();
        if groups.len() != NUM_SEATS && groups.len() != NUM_SEATS + 1 {
            return Err(EuchreError::InvalidCard(format!(
                "expected 4 hands and an optional kitty, got {} groups",
                groups.len()
            )));
        }

        for (i, group) in groups.iter().enumerate() {
            let cards = parse_hand(group)?;
            if i < NUM_SEATS {
                deal.hands[(start_seat + i) % NUM_SEATS] = cards;
            } else {
                deal.kitty = cards;
            }
        }

        Ok(deal)
    }
}

impl std::ops::Index<Seat> for Deal {
    type Output = Vec<Card>;

    #[inline]
    fn index(&self, seat: Seat) -> &Self::Output {
        &self.hands[seat]
    }
}

impl std::ops::IndexMut<Seat> for Deal {
    #[inline]
    fn index_mut(&mut self, seat: Seat) -> &mut Self::Output {
        &mut self.hands[seat]
    }
}

impl std::fmt::Debug for Deal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for seat in 0..NUM_SEATS {
            write!(f, "{}: [{}] ", seat, names_of(&self.hands[seat]))?;
        }
        write!(f, "kitty: [{}]", names_of(&self.kitty))
    }
}

impl std::fmt::Display for Deal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for seat in 0..NUM_SEATS {
            let cards: Cards = self.hands[seat].iter().copied().collect();
            writeln!(f, "{}  {}", seat_name(seat), cards)?;
        }
        let kitty: Cards = self.kitty.iter().copied().collect();
        writeln!(f, "Kitty  {}", kitty)
    }
}

/// Parse a single hand (SHDC separated by dots, '-' for a void)
fn parse_hand(s: &str) -> Result<Vec<Card>> {
    let suits: Vec<&str> = s.split('.').collect();
    if suits.len() != NUM_SUITS {
        return Err(EuchreError::InvalidCard(s.to_string()));
    }

    let mut cards = Vec::new();
    for (suit, suit_str) in suits.iter().enumerate() {
        for c in suit_str.chars() {
            if c == '-' {
                continue; // Void marker
            }
            let rank = char_to_rank(c).ok_or_else(|| EuchreError::InvalidCard(s.to_string()))?;
            cards.push(card_of(suit, rank));
        }
    }

    Ok(cards)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deal_from_pbn() {
        let deal = Deal::from_pbn("0:AJ.9.-.KQ K.AT.J.- Q9.-.AQ.9 T.KQ.K9.- -.J.T.AJT").unwrap();
        assert_eq!(deal[0], parse_cards("SA SJ H9 CK CQ").unwrap());
        assert_eq!(deal[1].len(), 4);
        assert_eq!(deal[3].len(), 5);
        assert_eq!(deal.kitty.len(), 5);
        assert_eq!(deal.len(), TOTAL_CARDS);
        assert_eq!(deal.all_cards().size(), TOTAL_CARDS);
    }

    #[test]
    fn test_deal_from_pbn_rotated_start() {
        let deal = Deal::from_pbn("2:A.-.-.- K.-.-.- Q.-.-.- J.-.-.-").unwrap();
        assert_eq!(deal[2], vec![card_of(SPADE, ACE)]);
        assert_eq!(deal[3], vec![card_of(SPADE, KING)]);
        assert_eq!(deal[0], vec![card_of(SPADE, QUEEN)]);
        assert_eq!(deal[1], vec![card_of(SPADE, JACK)]);
        assert!(deal.kitty.is_empty());
    }

    #[test]
    fn test_deal_from_pbn_rejects_garbage() {
        assert!(Deal::from_pbn("0:A.-.- K.-.-.- Q.-.-.- J.-.-.-").is_err());
        assert!(Deal::from_pbn("0:A.-.-.- K.-.-.-").is_err());
        assert!(Deal::from_pbn("7:A.-.-.- K.-.-.- Q.-.-.- J.-.-.-").is_err());
        assert!(Deal::from_pbn("0:2.-.-.- K.-.-.- Q.-.-.- J.-.-.-").is_err());
    }
}
