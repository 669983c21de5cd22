//! Per-player projections of game state.
//!
//! A `GameView` is what a client is allowed to see. It never contains a
//! hand; the viewer's own cards come from `hand_of`.

pub mod projector;

pub use projector::{hand_of, project, ActionView, GameView, PlayerSummary, WinnerView};
