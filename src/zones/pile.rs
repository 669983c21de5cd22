//! Ordered card piles.
//!
//! A `Pile` is an ordered sequence of cards backed by `im::Vector`, so
//! cloning a pile (for NOPE restore points) is O(1).
//!
//! Index 0 is the front. The draw pile draws from the front; the discard
//! pile appends to the back, so its back is the most recent play.
//!
//! ## Usage
//!
//! ```
//! use kitten_engine::cards::{Card, CardId, CardKind};
//! use kitten_engine::zones::{Pile, ZonePosition};
//!
//! let mut pile = Pile::new();
//! pile.push_back(Card::new(CardId::new(1), CardKind::Skip));
//! pile.insert(Card::new(CardId::new(2), CardKind::ExplodingKitten), ZonePosition::Top);
//!
//! assert_eq!(pile.pop_front().map(|c| c.id), Some(CardId::new(2)));
//! assert_eq!(pile.len(), 1);
//! ```

use im::Vector;
use serde::{Deserialize, Serialize};

use crate::cards::{Card, CardType};
use crate::core::rng::RandomSource;

/// Where to insert a card into a pile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ZonePosition {
    /// Front of the pile (next card drawn).
    Top,
    /// Back of the pile.
    Bottom,
    /// Specific index, 0 = top. Clamped to the pile length.
    Index(usize),
}

/// An ordered pile of cards.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Pile {
    cards: Vector<Card>,
}

impl Pile {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn from_cards(cards: impl IntoIterator<Item = Card>) -> Self {
        Self {
            cards: cards.into_iter().collect(),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Card> {
        self.cards.iter()
    }

    #[must_use]
    pub fn to_vec(&self) -> Vec<Card> {
        self.cards.iter().copied().collect()
    }

    /// Remove and return the front card.
    pub fn pop_front(&mut self) -> Option<Card> {
        self.cards.pop_front()
    }

    /// Append to the back.
    pub fn push_back(&mut self, card: Card) {
        self.cards.push_back(card);
    }

    /// Insert a card at the given position.
    pub fn insert(&mut self, card: Card, position: ZonePosition) {
        match position {
            ZonePosition::Top => self.cards.push_front(card),
            ZonePosition::Bottom => self.cards.push_back(card),
            ZonePosition::Index(i) => {
                let idx = i.min(self.cards.len());
                self.cards.insert(idx, card);
            }
        }
    }

    /// The first `n` cards from the front (fewer if the pile is short).
    #[must_use]
    pub fn peek_front(&self, n: usize) -> Vec<Card> {
        self.cards.iter().take(n).copied().collect()
    }

    /// The card `n` places before the back (0 = the back itself).
    #[must_use]
    pub fn nth_from_back(&self, n: usize) -> Option<&Card> {
        let len = self.cards.len();
        if n < len {
            self.cards.get(len - 1 - n)
        } else {
            None
        }
    }

    /// Count cards of a type.
    #[must_use]
    pub fn count_type(&self, card_type: CardType) -> usize {
        self.cards.iter().filter(|c| c.is(card_type)).count()
    }

    /// Uniformly re-order the pile.
    pub fn shuffle(&mut self, rng: &mut dyn RandomSource) {
        let mut cards = self.to_vec();
        rng.shuffle_cards(&mut cards);
        self.cards = cards.into_iter().collect();
    }
}
