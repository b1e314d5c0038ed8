//! Card indices and the 24-card bitset
//!
//! A card is an index 0-23. Cards are ordered by suit (SHDC) then rank
//! (Ace high): bit 0 = Spade Ace, bit 5 = Spade 9, bit 6 = Heart Ace, etc.
//! Rank and suit are printed values; trump-relative ordering goes through
//! `adjusted_suit` and `adjusted_rank`.

use super::error::{EuchreError, Result};
use super::types::*;

pub type Card = usize;

/// Get suit of a card (0-23 -> 0-3)
#[inline]
pub fn suit_of(card: Card) -> Suit {
    card / NUM_RANKS
}

/// Get rank of a card (0-23 -> 0-5, where 5=Ace)
#[inline]
pub fn rank_of(card: Card) -> Rank {
    NUM_RANKS - 1 - (card % NUM_RANKS)
}

/// Get card index from suit and rank
#[inline]
pub fn card_of(suit: Suit, rank: Rank) -> Card {
    suit * NUM_RANKS + (NUM_RANKS - 1 - rank)
}

/// Get mask for a suit (6 bits)
#[inline]
pub fn mask_of(suit: Suit) -> u32 {
    0x3F << (suit * NUM_RANKS)
}

/// Suit a card follows under `trump`: the left bower counts as trump
#[inline]
pub fn adjusted_suit(card: Card, trump: Suit) -> Suit {
    if rank_of(card) == JACK && suit_of(card) == left_of(trump) {
        trump
    } else {
        suit_of(card)
    }
}

/// Rank of a card under `trump`: right bower above left bower above Ace
#[inline]
pub fn adjusted_rank(card: Card, trump: Suit) -> Rank {
    if rank_of(card) == JACK {
        if suit_of(card) == trump {
            return RIGHT_BOWER;
        }
        if suit_of(card) == left_of(trump) {
            return LEFT_BOWER;
        }
    }
    rank_of(card)
}

#[inline]
pub fn is_trump(card: Card, trump: Suit) -> bool {
    adjusted_suit(card, trump) == trump
}

#[inline]
pub fn is_right_bower(card: Card, trump: Suit) -> bool {
    card == card_of(trump, JACK)
}

#[inline]
pub fn is_left_bower(card: Card, trump: Suit) -> bool {
    card == card_of(left_of(trump), JACK)
}

/// Get card name as string, suit letter first ("HJ")
pub fn name_of(card: Card) -> String {
    format!("{}{}", suit_letter(suit_of(card)), rank_name(rank_of(card)))
}

/// Parse a card name such as "HJ", "s9" or "D10"
pub fn parse_card(s: &str) -> Result<Card> {
    let s = s.trim();
    let mut chars = s.chars();
    let suit = chars.next().and_then(char_to_suit);
    let rank_str: String = chars.collect();
    let rank = match rank_str.as_str() {
        "10" => Some(TEN),
        r if r.chars().count() == 1 => r.chars().next().and_then(char_to_rank),
        _ => None,
    };
    match (suit, rank) {
        (Some(suit), Some(rank)) => Ok(card_of(suit, rank)),
        _ => Err(EuchreError::InvalidCard(s.to_string())),
    }
}

/// Parse a whitespace- or comma-separated list of card names, keeping order
pub fn parse_cards(s: &str) -> Result<Vec<Card>> {
    s.split(|c: char| c.is_whitespace() || c == ',')
        .filter(|t| !t.is_empty())
        .map(parse_card)
        .collect()
}

/// Format a list of cards as space-separated names
pub fn names_of(cards: &[Card]) -> String {
    cards.iter().map(|&c| name_of(c)).collect::<Vec<_>>().join(" ")
}

/// Cards represented as a 24-bit bitboard
#[derive(Clone, Copy, PartialEq, Eq, Default)]
pub struct Cards {
    bits: u32,
}

impl Cards {
    /// Create empty card set
    #[inline]
    pub const fn new() -> Self {
        Cards { bits: 0 }
    }

    /// All 24 cards of the deck
    #[inline]
    pub const fn full() -> Self {
        Cards {
            bits: (1u32 << TOTAL_CARDS) - 1,
        }
    }

    /// Create from raw bits
    #[inline]
    pub const fn from_bits(bits: u32) -> Self {
        Cards { bits }
    }

    /// Get raw bits value
    #[inline]
    pub fn value(&self) -> u32 {
        self.bits
    }

    /// Count number of cards
    #[inline]
    pub fn size(&self) -> usize {
        self.bits.count_ones() as usize
    }

    /// Check if a card is present
    #[inline]
    pub fn have(&self, card: Card) -> bool {
        self.bits & (1u32 << card) != 0
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bits == 0
    }

    /// Get cards of a printed suit
    #[inline]
    pub fn suit(&self, suit: Suit) -> Cards {
        Cards::from_bits(self.bits & mask_of(suit))
    }

    /// Get cards whose adjusted suit under `trump` is `suit`
    pub fn adjusted(&self, suit: Suit, trump: Suit) -> Cards {
        self.iter()
            .filter(|&c| adjusted_suit(c, trump) == suit)
            .collect()
    }

    #[inline]
    pub fn union(&self, other: Cards) -> Cards {
        Cards::from_bits(self.bits | other.bits)
    }

    #[inline]
    pub fn intersect(&self, other: Cards) -> Cards {
        Cards::from_bits(self.bits & other.bits)
    }

    /// Difference (cards in self but not in other)
    #[inline]
    pub fn different(&self, other: Cards) -> Cards {
        Cards::from_bits(self.bits & !other.bits)
    }

    /// Complement within the deck
    #[inline]
    pub fn complement(&self) -> Cards {
        Cards::full().different(*self)
    }

    #[inline]
    pub fn add(&mut self, card: Card) -> &mut Self {
        self.bits |= 1u32 << card;
        self
    }

    #[inline]
    pub fn remove(&mut self, card: Card) -> &mut Self {
        self.bits &= !(1u32 << card);
        self
    }

    #[inline]
    pub fn add_cards(&mut self, cards: &[Card]) -> &mut Self {
        for &card in cards {
            self.add(card);
        }
        self
    }

    /// Iterate over cards, lowest index first
    pub fn iter(&self) -> CardsIterator {
        CardsIterator { bits: self.bits }
    }

    pub fn to_vec(&self) -> Vec<Card> {
        self.iter().collect()
    }
}

impl FromIterator<Card> for Cards {
    fn from_iter<I: IntoIterator<Item = Card>>(iter: I) -> Self {
        let mut cards = Cards::new();
        for card in iter {
            cards.add(card);
        }
        cards
    }
}

impl std::fmt::Debug for Cards {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Cards(")?;
        for suit in 0..NUM_SUITS {
            let suit_cards = self.suit(suit);
            if !suit_cards.is_empty() {
                write!(f, "{}: ", suit_letter(suit))?;
                for card in suit_cards.iter() {
                    write!(f, "{}", rank_name(rank_of(card)))?;
                }
                write!(f, " ")?;
            }
        }
        write!(f, ")")
    }
}

impl std::fmt::Display for Cards {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for suit in 0..NUM_SUITS {
            let suit_cards = self.suit(suit);
            write!(f, "{} ", suit_letter(suit))?;
            if suit_cards.is_empty() {
                write!(f, "- ")?;
            } else {
                for card in suit_cards.iter() {
                    write!(f, "{}", rank_name(rank_of(card)))?;
                }
                write!(f, " ")?;
            }
        }
        Ok(())
    }
}

/// Iterator over cards in a Cards bitset
pub struct CardsIterator {
    bits: u32,
}

impl Iterator for CardsIterator {
    type Item = Card;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        if self.bits == 0 {
            None
        } else {
            let card = self.bits.trailing_zeros() as usize;
            self.bits &= self.bits - 1; // Clear lowest set bit
            Some(card)
        }
    }
}

impl IntoIterator for Cards {
    type Item = Card;
    type IntoIter = CardsIterator;

    fn into_iter(self) -> Self::IntoIter {
        CardsIterator { bits: self.bits }
    }
}

impl IntoIterator for &Cards {
    type Item = Card;
    type IntoIter = CardsIterator;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_card_indices() {
        assert_eq!(card_of(SPADE, ACE), 0);
        assert_eq!(card_of(SPADE, NINE), 5);
        assert_eq!(card_of(HEART, ACE), 6);
        assert_eq!(card_of(CLUB, NINE), 23);
        assert_eq!(suit_of(23), CLUB);
        assert_eq!(rank_of(23), NINE);
        assert_eq!(Cards::full().size(), TOTAL_CARDS);
    }

    #[test]
    fn test_adjusted_suit_left_bower() {
        let jd = card_of(DIAMOND, JACK);
        assert_eq!(adjusted_suit(jd, HEART), HEART);
        assert_eq!(adjusted_suit(jd, DIAMOND), DIAMOND);
        assert_eq!(adjusted_suit(jd, SPADE), DIAMOND);
        assert_eq!(adjusted_suit(card_of(DIAMOND, ACE), HEART), DIAMOND);
    }

    #[test]
    fn test_adjusted_rank_bowers() {
        assert_eq!(adjusted_rank(card_of(CLUB, JACK), CLUB), RIGHT_BOWER);
        assert_eq!(adjusted_rank(card_of(SPADE, JACK), CLUB), LEFT_BOWER);
        assert_eq!(adjusted_rank(card_of(HEART, JACK), CLUB), JACK);
        assert_eq!(adjusted_rank(card_of(CLUB, ACE), CLUB), ACE);
    }

    #[test]
    fn test_parse_and_name() {
        assert_eq!(parse_card("HJ"), Ok(card_of(HEART, JACK)));
        assert_eq!(parse_card("s9"), Ok(card_of(SPADE, NINE)));
        assert_eq!(parse_card("D10"), Ok(card_of(DIAMOND, TEN)));
        assert!(parse_card("X9").is_err());
        assert!(parse_card("H2").is_err());
        assert!(parse_card("").is_err());
        assert_eq!(name_of(card_of(CLUB, TEN)), "CT");

        let cards = parse_cards("HJ, SA  C9").unwrap();
        assert_eq!(names_of(&cards), "HJ SA C9");
    }

    #[test]
    fn test_cards_set_algebra() {
        let mut a = Cards::new();
        a.add(card_of(SPADE, ACE)).add(card_of(SPADE, KING));
        let b: Cards = [card_of(SPADE, KING), card_of(HEART, ACE)]
            .into_iter()
            .collect();

        assert_eq!(a.union(b).size(), 3);
        assert_eq!(a.intersect(b).to_vec(), vec![card_of(SPADE, KING)]);
        assert_eq!(a.different(b).to_vec(), vec![card_of(SPADE, ACE)]);
        assert_eq!(a.complement().size(), TOTAL_CARDS - 2);
        assert_eq!(a.suit(SPADE).size(), 2);
    }

    #[test]
    fn test_cards_adjusted_includes_left_bower() {
        let hand: Cards = [card_of(DIAMOND, JACK), card_of(HEART, NINE), card_of(DIAMOND, ACE)]
            .into_iter()
            .collect();
        let hearts = hand.adjusted(HEART, HEART);
        assert_eq!(hearts.size(), 2);
        assert!(hearts.have(card_of(DIAMOND, JACK)));
        assert_eq!(hand.adjusted(DIAMOND, HEART).to_vec(), vec![card_of(DIAMOND, ACE)]);
    }
}
