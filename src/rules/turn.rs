//! Turn advancement and game-end detection.
//!
//! ## Pending turns
//!
//! Each player owes `pending_turns` turns before play passes on (1 unless
//! attacked). A normal end of turn pays one of them; a hard end (Attack,
//! elimination) clears them all. When nothing is owed the counter resets
//! to 1 and the next alive seat in the turn direction takes over.

use tracing::info;

use super::engine::GameResult;
use crate::core::{GameState, GameStatus, Player};

/// How the current turn ends.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TurnEnd {
    /// Pay one pending turn.
    Normal,
    /// Drop every pending turn.
    Hard,
}

/// Seat index of the next alive player after the current one.
///
/// Skips dead seats. If every other seat is dead the search stops at the
/// current player.
#[must_use]
pub fn next_player_index(state: &GameState) -> Option<usize> {
    let current = state.player_index(&state.current_turn)?;
    let len = state.players.len() as isize;
    let step = state.direction.step();

    let mut idx = current;
    loop {
        idx = (idx as isize + step).rem_euclid(len) as usize;
        if idx == current || state.players[idx].alive {
            return Some(idx);
        }
    }
}

/// The next alive player after the current one.
#[must_use]
pub fn next_player(state: &GameState) -> Option<&Player> {
    next_player_index(state).map(|idx| &state.players[idx])
}

/// End the current player's turn.
pub fn end_turn(state: &mut GameState, how: TurnEnd) {
    let Some(current) = state.player_index(&state.current_turn) else {
        return;
    };

    let player = &mut state.players[current];
    player.pending_turns = match how {
        TurnEnd::Normal => player.pending_turns.saturating_sub(1),
        TurnEnd::Hard => 0,
    };
    if player.pending_turns > 0 {
        return;
    }
    player.pending_turns = 1;

    if let Some(next) = next_player_index(state) {
        state.current_turn = state.players[next].id.clone();
    }
}

/// Finish the game if exactly one player is alive.
pub fn check_game_end(state: &mut GameState) -> Option<GameResult> {
    let winner = {
        let mut alive = state.alive_players();
        let (Some(last), None) = (alive.next(), alive.next()) else {
            return None;
        };
        last.id.clone()
    };

    state.status = GameStatus::Finished;
    state.winner = Some(winner.clone());
    info!(game_id = %state.id, winner = %winner, "Game finished");

    Some(GameResult::Winner(winner))
}
