//! Rules engine trait and turn order.
//!
//! Games implement `RulesEngine` to define:
//! - Legal moves for each game state
//! - How moves modify state
//! - Win conditions
//!
//! `turn` holds the shared turn-order machinery: pending turns, skipping
//! dead seats and game-end detection.

pub mod engine;
pub mod turn;

pub use engine::{GameResult, RulesEngine};
pub use turn::{check_game_end, end_turn, next_player, next_player_index, TurnEnd};
