//! Card piles.
//!
//! ## Key Types
//!
//! - `Pile`: ordered card sequence (draw pile, discard pile)
//! - `ZonePosition`: insertion point for re-inserting a card

pub mod pile;

pub use pile::{Pile, ZonePosition};
