//! Exploding Kittens.
//!
//! Players take turns playing any number of action cards and then drawing
//! one card. Drawing an Exploding Kitten eliminates the player unless they
//! hold a Defuse, in which case they put the kitten back anywhere in the
//! draw pile. The last player alive wins.
//!
//! ## Move flow
//!
//! - `PLAY_CARD`: resolved by `EffectResolver`; Attack and Skip end the turn
//! - `DRAW_CARD`: ends the turn, or opens the defuse placement sub-phase
//! - `DEFUSE_KITTEN`: the only move accepted during placement
//! - `NOPE`: rolls the table back to before the last played card's effect

mod game;

pub use game::KittensRules;
