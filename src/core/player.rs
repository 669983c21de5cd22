//! Player identification and per-player game data.
//!
//! ## PlayerId
//!
//! Opaque identifier supplied by the session layer. The engine only
//! compares ids; it never interprets them.
//!
//! ## Player
//!
//! A seat at the table: identity, private hand, liveness and the number of
//! turns still owed before play passes on.

use im::Vector;
use serde::{Deserialize, Serialize};

use crate::cards::{Card, CardId, CardType};

/// Player identifier as issued by the session layer.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(pub String);

impl PlayerId {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PlayerId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// Identity of a player joining or creating a game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewPlayer {
    pub id: PlayerId,
    pub username: String,
}

impl NewPlayer {
    #[must_use]
    pub fn new(id: impl Into<String>, username: impl Into<String>) -> Self {
        Self {
            id: PlayerId::new(id),
            username: username.into(),
        }
    }
}

/// A player seated in a game.
///
/// The hand uses `im::Vector` so snapshots of the whole table stay cheap.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    pub id: PlayerId,
    pub username: String,
    pub hand: Vector<Card>,
    pub alive: bool,
    /// Turns still owed before play passes on. Normally 1.
    pub pending_turns: u32,
}

impl Player {
    #[must_use]
    pub fn new(identity: NewPlayer) -> Self {
        Self {
            id: identity.id,
            username: identity.username,
            hand: Vector::new(),
            alive: true,
            pending_turns: 1,
        }
    }

    /// Number of cards held.
    #[must_use]
    pub fn card_count(&self) -> usize {
        self.hand.len()
    }

    /// Index of a card in hand by id.
    #[must_use]
    pub fn find_card(&self, card_id: CardId) -> Option<usize> {
        self.hand.iter().position(|c| c.id == card_id)
    }

    /// Index of the first card of the given type.
    #[must_use]
    pub fn find_type(&self, card_type: CardType) -> Option<usize> {
        self.hand.iter().position(|c| c.is(card_type))
    }

    #[must_use]
    pub fn holds(&self, card_type: CardType) -> bool {
        self.find_type(card_type).is_some()
    }

    /// Add a card to the hand.
    pub fn give(&mut self, card: Card) {
        self.hand.push_back(card);
    }

    /// Remove the card at `index`.
    ///
    /// Callers obtain `index` from `find_card`/`find_type` first.
    pub fn take_at(&mut self, index: usize) -> Card {
        self.hand.remove(index)
    }
}
