//! Turning seat 0's partial view into one fully-known deal

use rand::seq::SliceRandom;
use rand::Rng;
use tracing::warn;

use super::cards::*;
use super::deal::Deal;
use super::error::{EuchreError, Result};
use super::inference::NoSuits;
use super::state::State;
use super::types::*;

/// Fresh shuffles tried before giving up on a position
pub const MAX_DETERMINIZE_ATTEMPTS: usize = 64;

/// Slot index of the kitty; seats use their own index
pub const KITTY_SLOT: usize = NUM_SEATS;
pub(crate) const NUM_SLOTS: usize = NUM_SEATS + 1;

/// The cards seat 0 cannot place and where they may go
pub(crate) struct Unknowns {
    pub cards: Vec<Card>,
    pub quotas: [usize; NUM_SLOTS],
    /// Cards whose location is already known
    base: Deal,
    no_suits: NoSuits,
    trump: Suit,
}

impl Unknowns {
    /// Panics if the quotas do not account for every unseen card, which
    /// `State::validate` rules out.
    pub fn from_state(state: &State) -> Self {
        let cards = state.unseen().to_vec();
        let quotas = state.unknown_quotas();
        let places: usize = quotas.iter().sum();
        assert_eq!(
            places,
            cards.len(),
            "{} unknown places for {} unseen cards",
            places,
            cards.len()
        );

        let mut base = Deal::new();
        if state.setup.is_active(0) {
            base.hands[0] = state.hands[0].clone();
        } else {
            base.kitty.extend_from_slice(&state.hands[0]);
        }
        if let Some(dealer) = state.top_holder() {
            base.hands[dealer].push(state.setup.top);
        }
        if let Some(card) = state.kitty_card() {
            base.kitty.push(card);
        }

        Unknowns {
            cards,
            quotas,
            base,
            no_suits: state.no_suits(),
            trump: state.trump(),
        }
    }

    /// Whether `card` may go to `slot`. The kitty takes anything.
    #[inline]
    pub fn eligible(&self, slot: usize, card: Card) -> bool {
        slot == KITTY_SLOT || !self.no_suits.excludes(slot, card, self.trump)
    }

    pub fn satisfies(&self, groups: &[Vec<Card>; NUM_SLOTS]) -> bool {
        groups
            .iter()
            .enumerate()
            .all(|(slot, cards)| cards.iter().all(|&c| self.eligible(slot, c)))
    }

    /// Map a partition of indices into `cards` onto the slots
    pub fn groups_of(&self, partition: Vec<Vec<usize>>) -> [Vec<Card>; NUM_SLOTS] {
        let mut groups: [Vec<Card>; NUM_SLOTS] = Default::default();
        for (slot, indices) in partition.into_iter().enumerate().take(NUM_SLOTS) {
            groups[slot] = indices.into_iter().map(|i| self.cards[i]).collect();
        }
        groups
    }

    /// Known cards plus one group per slot. Seat 0 keeps its hand order.
    pub fn complete(&self, groups: [Vec<Card>; NUM_SLOTS]) -> Deal {
        let mut deal = self.base.clone();
        for (slot, cards) in groups.into_iter().enumerate() {
            if slot == KITTY_SLOT {
                deal.kitty.extend(cards);
                deal.kitty.sort_unstable();
            } else if slot != 0 {
                deal.hands[slot].extend(cards);
                deal.hands[slot].sort_unstable();
            }
        }
        deal
    }

    /// One greedy pass over a shuffled universe. `None` when a card ends up
    /// with no open slot.
    fn assign<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<[Vec<Card>; NUM_SLOTS]> {
        let mut cards = self.cards.clone();
        cards.shuffle(rng);

        let mut remaining = self.quotas;
        // Unassigned cards each slot could still take
        let mut options = [0usize; NUM_SLOTS];
        for &card in &cards {
            for (slot, count) in options.iter_mut().enumerate() {
                if self.eligible(slot, card) {
                    *count += 1;
                }
            }
        }

        let mut groups: [Vec<Card>; NUM_SLOTS] = Default::default();
        for &card in &cards {
            let open: Vec<usize> = (0..NUM_SLOTS)
                .filter(|&slot| remaining[slot] > 0 && self.eligible(slot, card))
                .collect();
            if open.is_empty() {
                return None;
            }
            // A slot with exactly as many options as places must take them all
            let slot = match open.iter().copied().find(|&s| remaining[s] == options[s]) {
                Some(forced) => forced,
                None => open[rng.random_range(0..open.len())],
            };

            remaining[slot] -= 1;
            groups[slot].push(card);
            for (s, count) in options.iter_mut().enumerate() {
                if self.eligible(s, card) {
                    *count -= 1;
                }
            }
        }
        Some(groups)
    }

    /// Retry the greedy pass with fresh shuffles until one completes
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Deal> {
        for attempt in 1..=MAX_DETERMINIZE_ATTEMPTS {
            if let Some(groups) = self.assign(rng) {
                return Ok(self.complete(groups));
            }
            warn!(attempt, "determinization dead-ended, reshuffling");
        }
        Err(EuchreError::Infeasible(MAX_DETERMINIZE_ATTEMPTS))
    }
}

/// Deal every card seat 0 cannot see so that each seat gets exactly the
/// cards it must still hold and no seat gets a suit it showed out of.
///
/// Known locations are kept: seat 0's hand, a picked-up top still with the
/// dealer, and the turned-down top or seat 0's discard in the kitty.
pub fn determinize<R: Rng + ?Sized>(state: &State, rng: &mut R) -> Result<Deal> {
    state.validate()?;
    Unknowns::from_state(state).sample(rng)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::setup::{Pickup, Setup};
    use crate::trick::Trick;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn c(s: &str) -> Card {
        parse_card(s).unwrap()
    }

    fn cs(s: &str) -> Vec<Card> {
        parse_cards(s).unwrap()
    }

    /// Hands and kitty plus the played cards hold every card exactly once
    fn assert_complete(deal: &Deal, state: &State) {
        let played = state.played_cards();
        assert_eq!(deal.all_cards().size(), deal.len(), "a card was dealt twice");
        assert!(deal.all_cards().intersect(played).is_empty());
        assert_eq!(deal.all_cards().union(played).size(), TOTAL_CARDS);
        assert_eq!(deal[0], state.hands[0]);
        for seat in 1..NUM_SEATS {
            assert_eq!(deal[seat].len(), state.hand_size(seat), "seat {}", seat);
        }
    }

    #[test]
    fn test_fresh_deal() {
        let setup = Setup::new(1, 2, c("S9"), HEART, Pickup::TurnedDown);
        let state = State::new(setup, cs("HJ HA SA CK D9"));
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..20 {
            let deal = determinize(&state, &mut rng).unwrap();
            assert_complete(&deal, &state);
            assert_eq!(deal.kitty.len(), KITTY_SIZE);
            assert!(deal.kitty.contains(&c("S9")));
        }
    }

    #[test]
    fn test_respects_inference() {
        // Seat 1 showed out of spades on the first trick
        let setup = Setup::new(1, 2, c("CA"), HEART, Pickup::TurnedDown);
        let trick = Trick::new(cs("S9 ST SA D9"), 2, HEART);
        let state = State::from_parts(setup, 1, cs("HJ CK DA"), cs("SK"), vec![trick]);
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..50 {
            let deal = determinize(&state, &mut rng).unwrap();
            assert_complete(&deal, &state);
            assert!(deal[1].iter().all(|&card| adjusted_suit(card, HEART) != SPADE));
            assert!(deal.kitty.contains(&c("CA")));
        }
    }

    #[test]
    fn test_kept_top_stays_with_dealer() {
        let setup = Setup::new(3, 1, c("H9"), HEART, Pickup::Kept);
        let state = State::new(setup, cs("HJ HA SA CK D9"));
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..20 {
            let deal = determinize(&state, &mut rng).unwrap();
            assert_complete(&deal, &state);
            assert!(deal[3].contains(&c("H9")));
            assert_eq!(deal.kitty.len(), KITTY_SIZE);
        }
    }

    #[test]
    fn test_discard_goes_to_kitty() {
        let setup = Setup::new(0, 1, c("H9"), HEART, Pickup::Discarded(c("C9")));
        let state = State::new(setup, cs("H9 HA SA CK D9"));
        let mut rng = StdRng::seed_from_u64(5);
        let deal = determinize(&state, &mut rng).unwrap();
        assert_complete(&deal, &state);
        assert!(deal.kitty.contains(&c("C9")));
    }

    #[test]
    fn test_lone_partner_hand_joins_kitty() {
        // Seat 1 alone, so seat 3 sits out
        let setup = Setup::new(0, 1, c("S9"), HEART, Pickup::TurnedDown).with_alone(1);
        let state = State::new(setup, cs("HJ HA SA CK D9"));
        let mut rng = StdRng::seed_from_u64(9);
        let deal = determinize(&state, &mut rng).unwrap();
        assert!(deal[3].is_empty());
        assert_eq!(deal.kitty.len(), KITTY_SIZE + HAND_SIZE);
        assert_eq!(deal.all_cards().size(), TOTAL_CARDS);
    }

    #[test]
    fn test_impossible_constraints_are_infeasible() {
        let setup = Setup::new(1, 2, c("S9"), HEART, Pickup::TurnedDown);
        let state = State::new(setup, cs("HJ HA SA CK D9"));
        let mut unknowns = Unknowns::from_state(&state);
        for suit in 0..NUM_SUITS {
            unknowns.no_suits.mark(1, suit);
        }
        let mut rng = StdRng::seed_from_u64(1);
        assert!(matches!(
            unknowns.sample(&mut rng),
            Err(EuchreError::Infeasible(MAX_DETERMINIZE_ATTEMPTS))
        ));
    }

    #[test]
    fn test_invalid_state_is_rejected() {
        let setup = Setup::new(1, 2, c("S9"), HEART, Pickup::TurnedDown);
        let state = State::new(setup, cs("HJ HA SA CK"));
        let mut rng = StdRng::seed_from_u64(1);
        assert!(determinize(&state, &mut rng).is_err());
    }
}
