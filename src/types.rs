//! Core type definitions for the 24-card euchre deck

/// Suits: SPADE=0, HEART=1, DIAMOND=2, CLUB=3
pub type Suit = usize;
pub const SPADE: Suit = 0;
pub const HEART: Suit = 1;
pub const DIAMOND: Suit = 2;
pub const CLUB: Suit = 3;
pub const NUM_SUITS: usize = 4;

/// Ranks: NINE=0, TEN=1, JACK=2, QUEEN=3, KING=4, ACE=5
pub type Rank = usize;
pub const NINE: Rank = 0;
pub const TEN: Rank = 1;
pub const JACK: Rank = 2;
pub const QUEEN: Rank = 3;
pub const KING: Rank = 4;
pub const ACE: Rank = 5;
pub const NUM_RANKS: usize = 6;

/// Adjusted ranks of the bowers within the trump suit (above ACE)
pub const LEFT_BOWER: Rank = 6;
pub const RIGHT_BOWER: Rank = 7;

/// Seats 0-3 in play order; seat 0 is the player we decide for
pub type Seat = usize;
pub const NUM_SEATS: usize = 4;

pub const TOTAL_TRICKS: usize = 5;
pub const HAND_SIZE: usize = TOTAL_TRICKS;
pub const KITTY_SIZE: usize = 4;
pub const TOTAL_CARDS: usize = NUM_RANKS * NUM_SUITS;

/// Team of a seat: 0 for seats 0 and 2, 1 for seats 1 and 3
#[inline]
pub fn team_of(seat: Seat) -> usize {
    seat & 1
}

/// Get partner seat
#[inline]
pub fn partner(seat: Seat) -> Seat {
    (seat + 2) % NUM_SEATS
}

/// Get next seat (clockwise)
#[inline]
pub fn next_seat(seat: Seat) -> Seat {
    (seat + 1) % NUM_SEATS
}

/// Get previous seat (counter-clockwise)
#[inline]
pub fn prev_seat(seat: Seat) -> Seat {
    (seat + NUM_SEATS - 1) % NUM_SEATS
}

/// The suit sharing a color with `suit`; its Jack is the left bower when
/// `suit` is trump.
#[inline]
pub fn left_of(suit: Suit) -> Suit {
    NUM_SUITS - 1 - suit
}

/// Get seat name
pub fn seat_name(seat: Seat) -> &'static str {
    const NAMES: [&str; 4] = ["Seat0", "Seat1", "Seat2", "Seat3"];
    NAMES[seat]
}

/// Get suit name
pub fn suit_name(suit: Suit) -> &'static str {
    const NAMES: [&str; 4] = ["Spade", "Heart", "Diamond", "Club"];
    NAMES[suit]
}

/// Get suit letter
pub fn suit_letter(suit: Suit) -> char {
    const LETTERS: [char; 4] = ['S', 'H', 'D', 'C'];
    LETTERS[suit]
}

/// Get rank name (character)
pub fn rank_name(rank: Rank) -> char {
    const NAMES: [char; 6] = ['9', 'T', 'J', 'Q', 'K', 'A'];
    NAMES[rank]
}

/// Convert character to suit
pub fn char_to_suit(c: char) -> Option<Suit> {
    match c.to_ascii_uppercase() {
        'S' => Some(SPADE),
        'H' => Some(HEART),
        'D' => Some(DIAMOND),
        'C' => Some(CLUB),
        _ => None,
    }
}

/// Convert character to rank
pub fn char_to_rank(c: char) -> Option<Rank> {
    match c.to_ascii_uppercase() {
        '9' => Some(NINE),
        'T' | '1' => Some(TEN),
        'J' => Some(JACK),
        'Q' => Some(QUEEN),
        'K' => Some(KING),
        'A' => Some(ACE),
        _ => None,
    }
}

/// Convert character to seat
pub fn char_to_seat(c: char) -> Option<Seat> {
    match c {
        '0'..='3' => Some(c as usize - '0' as usize),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_team_of() {
        assert_eq!(team_of(0), 0);
        assert_eq!(team_of(1), 1);
        assert_eq!(team_of(2), 0);
        assert_eq!(team_of(3), 1);
    }

    #[test]
    fn test_partner_and_rotation() {
        assert_eq!(partner(0), 2);
        assert_eq!(partner(3), 1);
        assert_eq!(next_seat(3), 0);
        assert_eq!(prev_seat(0), 3);
    }

    #[test]
    fn test_left_of_shares_color() {
        assert_eq!(left_of(SPADE), CLUB);
        assert_eq!(left_of(CLUB), SPADE);
        assert_eq!(left_of(HEART), DIAMOND);
        assert_eq!(left_of(DIAMOND), HEART);
    }

    #[test]
    fn test_char_conversions() {
        assert_eq!(char_to_suit('h'), Some(HEART));
        assert_eq!(char_to_suit('N'), None);
        assert_eq!(char_to_rank('9'), Some(NINE));
        assert_eq!(char_to_rank('T'), Some(TEN));
        assert_eq!(char_to_rank('2'), None);
        assert_eq!(char_to_seat('2'), Some(2));
        assert_eq!(char_to_seat('4'), None);
    }
}
