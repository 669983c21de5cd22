//! Shared, concurrent game store.
//!
//! ## Key Types
//!
//! - `GameStore`: every live game, addressed by `GameId`
//! - `GameSession`: one game's state plus its random source
//! - `MoveOutcome`: an applied move and the events to relay for it

mod games;

pub use games::{GameSession, GameStore, MoveOutcome, RngFactory};
