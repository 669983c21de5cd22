//! Core engine types: players, state, moves, RNG, configuration.

pub mod action;
pub mod config;
pub mod player;
pub mod rng;
pub mod state;

pub use action::{GameAction, Move, MoveKind};
pub use config::{DealFixture, DeckComposition, EngineConfig, MAX_PLAYERS, MIN_PLAYERS};
pub use player::{NewPlayer, Player, PlayerId};
pub use rng::{FixedRng, GameRng, RandomSource};
pub use state::{GameId, GameState, GameStatus, RevealedCards, TurnDirection, TurnPhase};
