//! Elixir regeneration and the hand/queue card cycle.
//!
//! Each team holds a fixed-size hand backed by a FIFO queue. Playing a card
//! sends it to the back of the queue and refills the hand from the front, so
//! a deck cycles in a fixed rotation and hand + queue always hold the same
//! cards.
//!
//! ```
//! use lane_battle::cards::CardId;
//! use lane_battle::economy::DeckState;
//!
//! let cards: Vec<CardId> = (1..=8).map(CardId::new).collect();
//! let mut deck = DeckState::from_order(&cards, 4);
//! assert_eq!(deck.next_card, Some(CardId::new(5)));
//!
//! assert!(deck.play(CardId::new(2), 4));
//! let hand: Vec<CardId> = [1, 3, 4, 5].into_iter().map(CardId::new).collect();
//! assert_eq!(deck.hand.as_slice(), hand.as_slice());
//! assert_eq!(deck.queue.back(), Some(&CardId::new(2)));
//! ```

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::cards::CardId;
use crate::core::{GameRng, TeamMap};

/// One team's hand and draw queue.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeckState {
    pub hand: SmallVec<[CardId; 4]>,
    pub queue: VecDeque<CardId>,
    /// Head of the queue, shown as the upcoming card.
    pub next_card: Option<CardId>,
}

impl DeckState {
    /// Deal `cards` in the given order: the first `hand_size` go to the hand.
    #[must_use]
    pub fn from_order(cards: &[CardId], hand_size: usize) -> Self {
        let split = hand_size.min(cards.len());
        let mut deck = Self {
            hand: cards[..split].iter().copied().collect(),
            queue: cards[split..].iter().copied().collect(),
            next_card: None,
        };
        deck.refresh_next();
        deck
    }

    /// Shuffle `cards` with `rng`, then deal them.
    #[must_use]
    pub fn deal(cards: &[CardId], hand_size: usize, rng: &mut GameRng) -> Self {
        let mut order = cards.to_vec();
        rng.shuffle(&mut order);
        Self::from_order(&order, hand_size)
    }

    #[must_use]
    pub fn in_hand(&self, card: CardId) -> bool {
        self.hand.contains(&card)
    }

    /// Cycle `card` out of the hand. Returns false if it was not in hand.
    pub fn play(&mut self, card: CardId, hand_size: usize) -> bool {
        let Some(slot) = self.hand.iter().position(|c| *c == card) else {
            return false;
        };
        self.hand.remove(slot);
        self.queue.push_back(card);
        if self.hand.len() < hand_size {
            if let Some(drawn) = self.queue.pop_front() {
                self.hand.push(drawn);
            }
        }
        self.refresh_next();
        true
    }

    /// Cards in hand plus queue.
    #[must_use]
    pub fn total_cards(&self) -> usize {
        self.hand.len() + self.queue.len()
    }

    fn refresh_next(&mut self) {
        self.next_card = self.queue.front().copied();
    }
}

/// Regenerate every team's elixir by `rate * dt`, capped at `max`.
pub fn regenerate(elixir: &mut TeamMap<f32>, rate: f32, max: f32, dt: f32) {
    elixir.for_each_mut(|_, e| *e = (*e + rate * dt).clamp(0.0, max));
}

/// Spend `cost` if affordable. Returns false and leaves the pool untouched
/// otherwise.
pub fn try_spend(pool: &mut f32, cost: f32) -> bool {
    if *pool + f32::EPSILON < cost {
        return false;
    }
    *pool = (*pool - cost).max(0.0);
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Team;

    fn ids(range: std::ops::RangeInclusive<u32>) -> Vec<CardId> {
        range.map(CardId::new).collect()
    }

    #[test]
    fn test_play_rotates() {
        let mut deck = DeckState::from_order(&ids(1..=8), 4);
        for _ in 0..20 {
            let card = deck.hand[0];
            assert!(deck.play(card, 4));
            assert_eq!(deck.hand.len(), 4);
            assert_eq!(deck.total_cards(), 8);
            assert_eq!(deck.next_card, deck.queue.front().copied());
        }
    }

    #[test]
    fn test_full_cycle_returns_first_card() {
        let mut deck = DeckState::from_order(&ids(1..=8), 4);
        // Play the leftmost card four times: 1, 2, 3, 4 all go to the queue.
        for _ in 0..4 {
            let card = deck.hand[0];
            deck.play(card, 4);
        }
        assert_eq!(deck.hand.as_slice(), &ids(5..=8)[..]);
        assert_eq!(deck.next_card, Some(CardId::new(1)));
    }

    #[test]
    fn test_play_card_not_in_hand() {
        let mut deck = DeckState::from_order(&ids(1..=8), 4);
        let before = deck.clone();
        assert!(!deck.play(CardId::new(7), 4));
        assert_eq!(deck, before);
    }

    #[test]
    fn test_small_deck() {
        let mut deck = DeckState::from_order(&ids(1..=3), 4);
        assert_eq!(deck.hand.len(), 3);
        assert!(deck.next_card.is_none());
        assert!(deck.play(CardId::new(2), 4));
        // The played card comes straight back.
        assert_eq!(deck.hand.len(), 3);
        assert!(deck.in_hand(CardId::new(2)));
    }

    #[test]
    fn test_deal_is_deterministic() {
        let a = DeckState::deal(&ids(1..=8), 4, &mut GameRng::new(9));
        let b = DeckState::deal(&ids(1..=8), 4, &mut GameRng::new(9));
        assert_eq!(a, b);
        assert_eq!(a.total_cards(), 8);
    }

    #[test]
    fn test_regenerate_caps() {
        let mut elixir = TeamMap::with_value(9.9);
        regenerate(&mut elixir, 0.4, 10.0, 1.0);
        assert_eq!(elixir[Team::Blue], 10.0);
        assert_eq!(elixir[Team::Red], 10.0);

        let mut low = TeamMap::with_value(0.0);
        regenerate(&mut low, 0.4, 10.0, 0.5);
        assert!((low[Team::Blue] - 0.2).abs() < 1e-6);
    }

    #[test]
    fn test_try_spend() {
        let mut pool = 3.0;
        assert!(!try_spend(&mut pool, 4.0));
        assert_eq!(pool, 3.0);
        assert!(try_spend(&mut pool, 3.0));
        assert_eq!(pool, 0.0);
    }
}
