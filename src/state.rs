//! Euchre play state and its game-tree implementation

use super::cards::*;
use super::deal::Deal;
use super::error::{EuchreError, Result};
use super::inference::{infer_no_suits, NoSuits};
use super::play::possible;
use super::search::{Game, Move};
use super::setup::Setup;
use super::trick::Trick;
use super::types::*;

/// A position during play, as seen by seat 0.
///
/// Seat 0's hand is always known. Other hands are either empty (unknown) or
/// hold exactly the cards that seat has left, as after determinization.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct State {
    pub setup: Setup,
    /// Seat to play
    pub player: Seat,
    pub hands: [Vec<Card>; NUM_SEATS],
    /// Cards played to the unfinished trick
    pub played: Vec<Card>,
    /// Completed tricks
    pub prior: Vec<Trick>,
}

impl State {
    /// State before the first lead, with seat 0 holding `hand`
    pub fn new(setup: Setup, hand: Vec<Card>) -> Self {
        State {
            setup,
            player: setup.first_leader(),
            hands: [hand, Vec::new(), Vec::new(), Vec::new()],
            played: Vec::new(),
            prior: Vec::new(),
        }
    }

    pub fn from_parts(
        setup: Setup,
        player: Seat,
        hand: Vec<Card>,
        played: Vec<Card>,
        prior: Vec<Trick>,
    ) -> Self {
        State {
            setup,
            player,
            hands: [hand, Vec::new(), Vec::new(), Vec::new()],
            played,
            prior,
        }
    }

    /// Same position with every hand taken from `deal`
    pub fn with_deal(&self, deal: &Deal) -> Self {
        State {
            hands: deal.hands.clone(),
            ..self.clone()
        }
    }

    #[inline]
    pub fn trump(&self) -> Suit {
        self.setup.trump
    }

    /// Seat that led the unfinished trick (or leads next, if it is empty)
    pub fn leader(&self) -> Seat {
        let mut seat = self.player;
        for _ in 0..self.played.len() {
            seat = self.setup.prev_active(seat);
        }
        seat
    }

    /// Seat that should lead the unfinished trick given the completed ones
    pub fn expected_leader(&self) -> Seat {
        self.prior
            .last()
            .map(Trick::winner)
            .unwrap_or_else(|| self.setup.first_leader())
    }

    /// Whether `seat` already played to the unfinished trick
    pub fn has_played(&self, seat: Seat) -> bool {
        let mut current = self.leader();
        for _ in 0..self.played.len() {
            if current == seat {
                return true;
            }
            current = self.setup.next_active(current);
        }
        false
    }

    /// Cards `seat` must still hold
    pub fn hand_size(&self, seat: Seat) -> usize {
        if !self.setup.is_active(seat) {
            return 0;
        }
        (HAND_SIZE - self.prior.len().min(HAND_SIZE)).saturating_sub(self.has_played(seat) as usize)
    }

    /// Whether the cards of `seat` are known
    pub fn is_known(&self, seat: Seat) -> bool {
        self.hands[seat].len() == self.hand_size(seat)
    }

    /// Every card played so far, completed tricks first
    pub fn played_cards(&self) -> Cards {
        let mut cards = Cards::new();
        for trick in &self.prior {
            cards.add_cards(&trick.cards);
        }
        cards.add_cards(&self.played);
        cards
    }

    /// Whether the dealer must have discarded the picked-up top: it was
    /// never played, yet the dealer ran out of cards or showed out of trump
    pub fn top_discarded(&self) -> bool {
        match self.setup.known_top_holder() {
            Some(dealer) => {
                !self.played_cards().have(self.setup.top)
                    && (self.hand_size(dealer) == 0 || self.no_suits().lacks(dealer, self.trump()))
            }
            None => false,
        }
    }

    /// Seat still holding the picked-up top card, when seat 0 knows who
    pub fn top_holder(&self) -> Option<Seat> {
        let holder = self.setup.known_top_holder()?;
        if self.played_cards().have(self.setup.top) || self.top_discarded() {
            None
        } else {
            Some(holder)
        }
    }

    /// Card seat 0 knows to be in the kitty: the turned-down top, its own
    /// discard, or a top the dealer must have discarded
    pub fn kitty_card(&self) -> Option<Card> {
        match self.setup.known_kitty_card() {
            Some(card) => Some(card),
            None if self.top_discarded() => Some(self.setup.top),
            None => None,
        }
    }

    /// Cards seat 0 has seen or can place: its hand, played cards, the known
    /// kitty card and a picked-up top still held by the dealer
    pub fn seen(&self) -> Cards {
        let mut seen = self.played_cards();
        seen.add_cards(&self.hands[0]);
        if let Some(card) = self.kitty_card() {
            seen.add(card);
        }
        if self.top_holder().is_some() {
            seen.add(self.setup.top);
        }
        seen
    }

    /// Cards whose location seat 0 cannot place
    pub fn unseen(&self) -> Cards {
        self.seen().complement()
    }

    /// Suit inference from completed tricks and the unfinished one
    pub fn no_suits(&self) -> NoSuits {
        let mut no_suits = infer_no_suits(&self.prior, self.trump());
        no_suits.observe_partial(&self.played, self.leader(), self.trump(), self.setup.alone);
        no_suits
    }

    /// Tricks won by each team so far
    pub fn tricks_won(&self) -> [usize; 2] {
        let mut won = [0; 2];
        for trick in &self.prior {
            won[team_of(trick.winner())] += 1;
        }
        won
    }

    /// Cards the acting seat may play. A known hand follows suit; an unknown
    /// hand may play any card it could hold.
    pub fn candidates(&self) -> Vec<Card> {
        let hand = &self.hands[self.player];
        if self.is_known(self.player) {
            return possible(hand, &self.played, self.trump())
                .into_iter()
                .map(|i| hand[i])
                .collect();
        }

        let no_suits = self.no_suits();
        let mut cards: Vec<Card> = self
            .unseen()
            .iter()
            .filter(|&c| !no_suits.excludes(self.player, c, self.trump()))
            .collect();
        if self.top_holder() == Some(self.player) {
            cards.push(self.setup.top);
        }
        cards
    }

    /// Successor after the acting seat plays `card`
    pub fn play(&self, card: Card) -> State {
        let mut next = self.clone();
        if self.is_known(self.player) {
            if let Some(pos) = next.hands[self.player].iter().position(|&c| c == card) {
                next.hands[self.player].remove(pos);
            }
        }
        next.played.push(card);

        if next.played.len() == self.setup.trick_size() {
            let trick = Trick::new(std::mem::take(&mut next.played), self.leader(), self.trump())
                .with_alone(self.setup.alone);
            next.player = trick.winner();
            next.prior.push(trick);
        } else {
            next.player = self.setup.next_active(self.player);
        }
        next
    }

    /// Check the position is one play could have produced
    pub fn validate(&self) -> Result<()> {
        self.setup.validate()?;
        let invalid = |msg: String| Err(EuchreError::InvalidState(msg));

        if self.player >= NUM_SEATS || !self.setup.is_active(self.player) {
            return invalid(format!("seat {} cannot be to play", self.player));
        }
        if self.prior.len() > TOTAL_TRICKS {
            return invalid(format!("{} completed tricks", self.prior.len()));
        }
        if self.played.len() >= self.setup.trick_size() {
            return invalid(format!("{} cards in the unfinished trick", self.played.len()));
        }
        if self.prior.len() == TOTAL_TRICKS && !self.played.is_empty() {
            return invalid("cards played after the last trick".into());
        }

        let mut leader = self.setup.first_leader();
        for (i, trick) in self.prior.iter().enumerate() {
            if trick.cards.len() != self.setup.trick_size() {
                return invalid(format!("trick {} has {} cards", i + 1, trick.cards.len()));
            }
            if trick.led != leader {
                return invalid(format!("trick {} led by seat {}, expected {}", i + 1, trick.led, leader));
            }
            if trick.trump != self.trump() || trick.alone != self.setup.alone {
                return invalid(format!("trick {} does not match the setup", i + 1));
            }
            leader = trick.winner();
        }
        if self.leader() != leader {
            return invalid(format!(
                "seat {} to play after {} card(s) means seat {} led, expected {}",
                self.player,
                self.played.len(),
                self.leader(),
                leader
            ));
        }

        for seat in 0..NUM_SEATS {
            let held = self.hands[seat].len();
            let expected = self.hand_size(seat);
            let out_of_play_hand = seat == 0 && !self.setup.is_active(0) && held == HAND_SIZE;
            let ok = if seat == 0 {
                held == expected || out_of_play_hand
            } else {
                held == 0 || held == expected
            };
            if !ok {
                return invalid(format!("seat {seat} holds {held} cards, expected {expected}"));
            }
        }

        let mut all = Cards::new();
        let mut count = 0;
        let mut place = |cards: &[Card]| {
            all.add_cards(cards);
            count += cards.len();
        };
        for hand in &self.hands {
            place(hand);
        }
        place(&self.played);
        for trick in &self.prior {
            place(&trick.cards);
        }
        if let Some(card) = self.kitty_card() {
            place(&[card]);
        }
        if count != all.size() || all.value() >> TOTAL_CARDS != 0 {
            return invalid("a card appears twice".into());
        }

        if let Some(dealer) = self.setup.known_top_holder() {
            let top = self.setup.top;
            if (0..NUM_SEATS).any(|s| s != dealer && self.hands[s].contains(&top)) {
                return invalid(format!("{} cannot be outside the dealer's hand", name_of(top)));
            }
        }

        let expected_unseen: usize = self.unknown_quotas().iter().sum();
        if self.unseen().size() != expected_unseen {
            return invalid(format!(
                "{} unseen cards but {} unknown places",
                self.unseen().size(),
                expected_unseen
            ));
        }

        Ok(())
    }

    /// Unknown cards per seat, with the kitty last: seat 0 has none, the
    /// dealer's known top card is not counted, and a sitting-out partner's
    /// hand goes to the kitty
    pub fn unknown_quotas(&self) -> [usize; NUM_SEATS + 1] {
        let mut quotas = [0; NUM_SEATS + 1];
        for (seat, quota) in quotas.iter_mut().enumerate().take(NUM_SEATS).skip(1) {
            *quota = self.hand_size(seat);
            if self.top_holder() == Some(seat) {
                *quota = quota.saturating_sub(1);
            }
        }

        let mut kitty = KITTY_SIZE;
        if self.kitty_card().is_some() {
            kitty -= 1;
        }
        if let Some(out) = self.setup.sitting_out() {
            if out != 0 || self.hands[0].is_empty() {
                kitty += HAND_SIZE;
            }
        }
        quotas[NUM_SEATS] = kitty;
        quotas
    }
}

impl Game for State {
    type Action = Card;

    /// Seats 0 and 2 maximize
    fn favorable(&self) -> bool {
        team_of(self.player) == 0
    }

    fn is_terminal(&self) -> bool {
        self.played.is_empty() && self.prior.len() == TOTAL_TRICKS
    }

    fn successors(&self) -> Vec<Move<Card, State>> {
        self.candidates()
            .into_iter()
            .map(|card| Move {
                action: card,
                state: self.play(card),
            })
            .collect()
    }

    fn evaluation(&self) -> i32 {
        score(self.tricks_won(), &self.setup)
    }
}

/// Points for a finished deal from the even team's point of view.
///
/// The makers score 1 for 3 or 4 tricks, 2 for all 5, 4 for all 5 alone.
/// Makers held under 3 tricks are euchred: the defenders score 2.
pub fn score(tricks_won: [usize; 2], setup: &Setup) -> i32 {
    let makers = team_of(setup.caller);
    let (team, points) = if tricks_won[makers] >= 3 {
        let points = match (tricks_won[makers], setup.alone) {
            (TOTAL_TRICKS, Some(_)) => 4,
            (TOTAL_TRICKS, None) => 2,
            _ => 1,
        };
        (makers, points)
    } else {
        (1 - makers, 2)
    };

    if team == 0 {
        points
    } else {
        -points
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::determinize::determinize;
    use crate::setup::Pickup;
    use crate::solver::{choose_card, SolverConfig};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn c(s: &str) -> Card {
        parse_card(s).unwrap()
    }

    fn cs(s: &str) -> Vec<Card> {
        parse_cards(s).unwrap()
    }

    fn hearts_setup() -> Setup {
        // Seat 1 dealt and turned down S9; seat 2 called hearts
        Setup::new(1, 2, c("S9"), HEART, Pickup::TurnedDown)
    }

    #[test]
    fn test_new_state_leader_and_sizes() {
        let state = State::new(hearts_setup(), cs("HJ HA SA CK D9"));
        assert_eq!(state.player, 2);
        assert_eq!(state.leader(), 2);
        assert_eq!(state.hand_size(0), 5);
        assert_eq!(state.hand_size(3), 5);
        assert_eq!(state.unseen().size(), 18);
        assert_eq!(state.unknown_quotas(), [0, 5, 5, 5, 3]);
        assert!(state.validate().is_ok());
    }

    #[test]
    fn test_mid_trick_sizes() {
        let state = State::from_parts(hearts_setup(), 0, cs("HJ HA SA CK D9"), cs("CA DA"), vec![]);
        assert_eq!(state.leader(), 2);
        assert!(state.has_played(2));
        assert!(state.has_played(3));
        assert!(!state.has_played(1));
        assert_eq!(state.unknown_quotas(), [0, 5, 4, 4, 3]);
        assert!(state.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_wrong_hand_size() {
        let state = State::from_parts(hearts_setup(), 0, cs("HJ HA SA CK"), cs("CA DA"), vec![]);
        assert!(matches!(state.validate(), Err(EuchreError::InvalidState(_))));
    }

    #[test]
    fn test_validate_rejects_wrong_leader() {
        // Seat 2 leads the first trick, so seat 0 cannot be to play after one card
        let state = State::from_parts(hearts_setup(), 0, cs("HJ HA SA CK D9"), cs("CA"), vec![]);
        assert!(state.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_duplicates() {
        let state = State::from_parts(hearts_setup(), 0, cs("HJ HA SA CK D9"), cs("CA HJ"), vec![]);
        assert!(state.validate().is_err());
        // The turned-down top is known to be in the kitty
        let state = State::new(hearts_setup(), cs("HJ HA SA CK S9"));
        assert!(state.validate().is_err());
    }

    #[test]
    fn test_kept_top_goes_to_dealer() {
        let setup = Setup::new(3, 1, c("H9"), HEART, Pickup::Kept);
        let state = State::new(setup, cs("HJ HA SA CK D9"));
        assert_eq!(state.top_holder(), Some(3));
        assert_eq!(state.unknown_quotas(), [0, 5, 5, 4, 4]);
        assert_eq!(state.unseen().size(), 18);
        assert!(state.validate().is_ok());
    }

    /// Seat 3 dealt and kept H9, then played its last card without it
    fn kept_top_never_played() -> State {
        let setup = Setup::new(3, 1, c("H9"), HEART, Pickup::Kept);
        let prior = vec![
            Trick::new(cs("SA S9 ST SK"), 0, HEART),
            Trick::new(cs("CA C9 CT CK"), 0, HEART),
            Trick::new(cs("DA D9 DT DK"), 0, HEART),
            Trick::new(cs("CQ CJ SQ HA"), 0, HEART),
        ];
        State::from_parts(setup, 0, cs("HQ"), cs("HK"), prior)
    }

    #[test]
    fn test_kept_top_discarded_by_dealer() {
        let state = kept_top_never_played();
        assert_eq!(state.hand_size(3), 0);
        assert!(state.top_discarded());
        assert_eq!(state.top_holder(), None);
        assert_eq!(state.kitty_card(), Some(c("H9")));
        assert_eq!(state.unknown_quotas(), [0, 1, 1, 0, 3]);
        assert_eq!(state.unseen(), cs("HJ HT SJ DJ DQ").into_iter().collect::<Cards>());
        assert!(state.validate().is_ok());

        let mut rng = StdRng::seed_from_u64(8);
        let deal = determinize(&state, &mut rng).unwrap();
        assert!(deal.kitty.contains(&c("H9")));
        assert_eq!(deal.kitty.len(), KITTY_SIZE);
        let decision = choose_card(&state, &SolverConfig::default(), &mut rng).unwrap();
        assert_eq!(decision.card, c("HQ"));
    }

    #[test]
    fn test_kept_top_discarded_when_dealer_shows_out_of_trump() {
        // Seat 0 led trump and the dealer discarded a spade
        let setup = Setup::new(3, 1, c("H9"), HEART, Pickup::Kept);
        let state = State::from_parts(setup, 1, cs("HQ SA CA DA"), cs("HA"), vec![])
            .play(c("HT"))
            .play(c("HK"))
            .play(c("S9"));
        assert_eq!(state.prior.len(), 1);
        assert!(state.top_discarded());
        assert_eq!(state.kitty_card(), Some(c("H9")));
        assert_eq!(state.unknown_quotas(), [0, 4, 4, 4, 3]);
        assert!(state.validate().is_ok());
    }

    #[test]
    fn test_kept_top_in_another_hand_is_rejected() {
        let setup = Setup::new(3, 1, c("H9"), HEART, Pickup::Kept);
        let state = State::new(setup, cs("H9 HA SA CK D9"));
        assert!(matches!(state.validate(), Err(EuchreError::InvalidState(_))));
    }

    #[test]
    fn test_lone_hand_quotas() {
        // Seat 1 alone, seat 3 sits out; seat 0 dealt and turned down
        let setup = Setup::new(0, 1, c("S9"), HEART, Pickup::TurnedDown).with_alone(1);
        let state = State::new(setup, cs("HJ HA SA CK D9"));
        assert_eq!(state.player, 1);
        assert_eq!(state.hand_size(3), 0);
        assert_eq!(state.unknown_quotas(), [0, 5, 5, 0, 8]);
        assert!(state.validate().is_ok());
    }

    #[test]
    fn test_play_completes_trick() {
        // Top CA turned down; seat 2 led S9, seat 3 followed ST
        let setup = Setup::new(1, 2, c("CA"), HEART, Pickup::TurnedDown);
        let state = State::from_parts(setup, 0, cs("HJ HA SA CK D9"), cs("S9 ST"), vec![]);
        assert!(state.validate().is_ok());

        let after = state.play(c("SA"));
        assert_eq!(after.player, 1);
        assert_eq!(after.played, cs("S9 ST SA"));
        assert_eq!(after.hands[0], cs("HJ HA CK D9"));
        assert_eq!(state.hands[0].len(), 5);

        let done = after.play(c("SK"));
        assert!(done.played.is_empty());
        assert_eq!(done.prior.len(), 1);
        assert_eq!(done.prior[0].led, 2);
        assert_eq!(done.player, 0);
        assert_eq!(done.hand_size(1), 4);
        assert!(done.validate().is_ok());
    }

    #[test]
    fn test_unknown_hand_candidates_respect_inference() {
        // Seat 1 showed out of spades in the first trick, which seat 0 won
        let setup = Setup::new(1, 2, c("CA"), HEART, Pickup::TurnedDown);
        let trick = Trick::new(cs("S9 ST SA D9"), 2, HEART);
        let state = State::from_parts(setup, 1, cs("HJ CK DA"), cs("SK"), vec![trick]);
        assert!(state.validate().is_ok());
        assert!(!state.is_known(1));

        let candidates = state.candidates();
        assert!(!candidates.is_empty());
        assert!(candidates.iter().all(|&card| adjusted_suit(card, HEART) != SPADE));
        assert!(!candidates.contains(&c("CA")));
        assert!(!candidates.contains(&c("HJ")));
        assert!(candidates.contains(&c("CJ")));
    }

    #[test]
    fn test_terminal_and_evaluation() {
        let setup = hearts_setup();
        let mut state = State::new(setup, Vec::new());
        state.prior = (0..5)
            .map(|i| Trick::new(vec![], if i < 3 { 0 } else { 1 }, HEART))
            .collect();
        assert!(state.is_terminal());
        // Seat 2 called; even team took 3 tricks
        assert_eq!(state.evaluation(), 1);
    }

    #[test]
    fn test_score_table() {
        let even_called = Setup::new(1, 0, c("S9"), HEART, Pickup::TurnedDown);
        let even_alone = even_called.with_alone(0);
        let odd_called = Setup::new(0, 3, c("S9"), HEART, Pickup::TurnedDown);

        assert_eq!(score([5, 0], &even_alone), 4);
        assert_eq!(score([5, 0], &even_called), 2);
        assert_eq!(score([4, 1], &even_called), 1);
        assert_eq!(score([3, 2], &even_called), 1);
        assert_eq!(score([2, 3], &even_called), -2);
        assert_eq!(score([0, 5], &even_called), -2);
        assert_eq!(score([2, 3], &odd_called), -1);
        assert_eq!(score([3, 2], &odd_called), 2);
        assert_eq!(score([0, 5], &odd_called), -2);
        assert_eq!(score([0, 5], &odd_called.with_alone(1)), -4);
    }
}
