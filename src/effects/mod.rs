//! Effect system for played cards.
//!
//! ## Key Types
//!
//! - `EffectResolver`: validates a PLAY_CARD move and resolves the card's
//!   effect (Attack, Skip, See the Future, Shuffle, Favor, cat pairs)

pub mod resolver;

pub use resolver::EffectResolver;
