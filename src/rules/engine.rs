//! Rules engine trait.
//!
//! The store drives games through `RulesEngine`:
//! - What moves a player may attempt
//! - How a move modifies state
//! - Whether the game is over
//!
//! ## Implementation Notes
//!
//! - `apply_move` must validate everything before it mutates anything; a
//!   rejected move leaves the state exactly as it was.
//! - All randomness comes from the `rng` argument.

use crate::core::{GameState, Move, MoveKind, PlayerId, RandomSource};
use crate::error::EngineResult;

/// Result of a completed game.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GameResult {
    /// Last player standing.
    Winner(PlayerId),
}

impl GameResult {
    /// Check if a player won.
    #[must_use]
    pub fn is_winner(&self, player: &PlayerId) -> bool {
        match self {
            GameResult::Winner(p) => p == player,
        }
    }
}

/// Rules engine trait.
pub trait RulesEngine {
    /// Move kinds `player` may attempt right now.
    ///
    /// Empty if the player cannot act.
    fn legal_moves(&self, state: &GameState, player: &PlayerId) -> Vec<MoveKind>;

    /// Validate and apply a move.
    fn apply_move(
        &self,
        state: &mut GameState,
        mv: &Move,
        rng: &mut dyn RandomSource,
    ) -> EngineResult<()>;

    /// Returns `Some(result)` if the game has ended, `None` if it continues.
    fn is_terminal(&self, state: &GameState) -> Option<GameResult>;

    /// Is this move kind currently available to the player?
    fn is_legal(&self, state: &GameState, player: &PlayerId, kind: MoveKind) -> bool {
        self.legal_moves(state, player).contains(&kind)
    }
}
