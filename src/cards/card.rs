//! Card identity and type vocabulary.
//!
//! A `Card` is an immutable pair of identity (`CardId`) and kind. The id
//! stays the same while the card moves between hands and piles; the kind
//! drives effect resolution.
//!
//! Cat cards carry their sub-type inside `CardKind::Cat`, so a cat type can
//! only exist on a cat card.

use serde::{Deserialize, Serialize};

/// Unique identifier for a card within one game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CardId(pub u32);

impl CardId {
    /// Create a new card ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Card({})", self.0)
    }
}

/// Cat sub-types. Two cats of the same sub-type form a pair.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CatType {
    Taco,
    Rainbow,
    Beard,
    Potato,
    Melon,
}

impl CatType {
    pub const ALL: [CatType; 5] = [
        CatType::Taco,
        CatType::Rainbow,
        CatType::Beard,
        CatType::Potato,
        CatType::Melon,
    ];
}

/// Card type without the cat payload.
///
/// This is what the public view exposes about a played card.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CardType {
    ExplodingKitten,
    Defuse,
    Nope,
    Attack,
    Skip,
    SeeTheFuture,
    Shuffle,
    Favor,
    Cat,
}

/// Full card kind, including the cat sub-type.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CardKind {
    ExplodingKitten,
    Defuse,
    Nope,
    Attack,
    Skip,
    SeeTheFuture,
    Shuffle,
    Favor,
    Cat {
        #[serde(rename = "catType")]
        cat_type: CatType,
    },
}

impl CardKind {
    /// Drop the cat payload.
    #[must_use]
    pub fn card_type(self) -> CardType {
        match self {
            CardKind::ExplodingKitten => CardType::ExplodingKitten,
            CardKind::Defuse => CardType::Defuse,
            CardKind::Nope => CardType::Nope,
            CardKind::Attack => CardType::Attack,
            CardKind::Skip => CardType::Skip,
            CardKind::SeeTheFuture => CardType::SeeTheFuture,
            CardKind::Shuffle => CardType::Shuffle,
            CardKind::Favor => CardType::Favor,
            CardKind::Cat { .. } => CardType::Cat,
        }
    }

    /// Does playing this card require a target player?
    #[must_use]
    pub fn needs_target(self) -> bool {
        matches!(self, CardKind::Favor | CardKind::Cat { .. })
    }
}

/// A card in play.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Card {
    pub id: CardId,
    #[serde(flatten)]
    pub kind: CardKind,
}

impl Card {
    #[must_use]
    pub const fn new(id: CardId, kind: CardKind) -> Self {
        Self { id, kind }
    }

    #[must_use]
    pub fn card_type(&self) -> CardType {
        self.kind.card_type()
    }

    #[must_use]
    pub fn is(&self, card_type: CardType) -> bool {
        self.card_type() == card_type
    }

    #[must_use]
    pub fn cat_type(&self) -> Option<CatType> {
        match self.kind {
            CardKind::Cat { cat_type } => Some(cat_type),
            _ => None,
        }
    }
}
