//! # kitten-engine
//!
//! A server-authoritative rules engine for Exploding Kittens, played by
//! 3 to 10 players in real time.
//!
//! ## Design Principles
//!
//! 1. **Single source of truth**: the engine owns the only trusted copy of
//!    each game and is the sole judge of which moves are legal.
//!
//! 2. **Validate, then commit**: a rejected move leaves the game exactly as
//!    it was. `GameState` is `PartialEq`, so this is testable directly.
//!
//! 3. **Nothing leaks**: clients only ever see a `GameView` projected for
//!    them. Hands, the draw pile order and card ids stay on the server.
//!
//! ## Architecture
//!
//! - **Persistent Data Structures**: hands and piles use `im-rs`, so the
//!   NOPE restore point is an O(1) copy of the table.
//!
//! - **Injected randomness**: every shuffle and theft goes through a
//!   `RandomSource`; tests script it with `FixedRng`.
//!
//! - **Per-game serialization**: `GameStore` keeps each game behind its own
//!   mutex; different games never contend.
//!
//! ## Modules
//!
//! - `core`: Players, state, moves, RNG, configuration
//! - `cards`: Card model, deck building and dealing
//! - `zones`: Draw and discard piles
//! - `rules`: RulesEngine trait and turn order
//! - `effects`: Played-card effects
//! - `games`: The Exploding Kittens rule set
//! - `view`: Per-player redacted projections
//! - `store`: Concurrent game store and lifecycle
//! - `events`: Events relayed to clients

pub mod core;
pub mod zones;
pub mod cards;
pub mod rules;
pub mod effects;
pub mod games;
pub mod view;
pub mod store;
pub mod events;
pub mod error;

// Re-export commonly used types
pub use crate::core::{
    PlayerId, NewPlayer, Player,
    GameRng, FixedRng, RandomSource,
    EngineConfig, DeckComposition, DealFixture,
    Move, MoveKind, GameAction,
    GameId, GameState, GameStatus, TurnDirection, TurnPhase,
};

pub use crate::zones::{Pile, ZonePosition};

pub use crate::cards::{Card, CardId, CardKind, CardType, CatType};

pub use crate::rules::{RulesEngine, GameResult};

pub use crate::effects::EffectResolver;

pub use crate::games::KittensRules;

pub use crate::view::{GameView, PlayerSummary, ActionView, WinnerView};

pub use crate::store::{GameStore, GameSession, MoveOutcome};

pub use crate::events::{GameEvent, Outbound, Recipient, ErrorPayload};

pub use crate::error::{EngineError, EngineResult, ConfigError};
