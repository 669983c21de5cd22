//! Card system: identity, types, deck construction and dealing.
//!
//! ## Key Types
//!
//! - `CardId`: Per-game unique card identity
//! - `CardKind`: Full card kind (cat cards carry a `CatType`)
//! - `CardType`: Kind without the cat payload, as shown in public views
//! - `Card`: Immutable id + kind pair
//! - `CardMint`: Id allocation and card counting for one game

pub mod card;
pub mod deck;

pub use card::{Card, CardId, CardKind, CardType, CatType};
pub use deck::{build_base_deck, deal, kind_for, CardMint, Deal};
