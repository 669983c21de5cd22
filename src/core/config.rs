//! Engine configuration.
//!
//! Servers configure the engine once at startup:
//! - `DeckComposition`: how many of each card the base deck holds
//! - `DealFixture`: opt-in forced cards for every dealt hand (test tables only)
//! - `EngineConfig`: table sizes, hand size, RNG seed
//!
//! All types deserialize from camelCase JSON with every field optional.

use serde::{Deserialize, Serialize};

use crate::cards::CardType;
use crate::error::ConfigError;

/// Smallest table the rules support.
pub const MIN_PLAYERS: usize = 3;

/// Largest table the rules support.
pub const MAX_PLAYERS: usize = 10;

/// Card counts of the base deck (kittens excluded; they depend on the
/// player count).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DeckComposition {
    pub defuse: usize,
    pub nope: usize,
    pub attack: usize,
    pub skip: usize,
    pub see_the_future: usize,
    pub shuffle: usize,
    pub favor: usize,
    /// Copies of each of the five cat sub-types.
    pub cats_per_type: usize,
}

impl Default for DeckComposition {
    fn default() -> Self {
        Self {
            defuse: 6,
            nope: 5,
            attack: 4,
            skip: 4,
            see_the_future: 5,
            shuffle: 4,
            favor: 4,
            cats_per_type: 4,
        }
    }
}

impl DeckComposition {
    /// Total number of cards in the base deck, `None` on overflow.
    #[must_use]
    pub fn total(&self) -> Option<usize> {
        [
            self.defuse,
            self.nope,
            self.attack,
            self.skip,
            self.see_the_future,
            self.shuffle,
            self.favor,
        ]
        .into_iter()
        .try_fold(self.cats_per_type.checked_mul(5)?, usize::checked_add)
    }
}

/// Cards forced into every dealt hand.
///
/// Replaces random picks, it does not add to the hand size. Never active
/// unless configured.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DealFixture {
    pub forced_cards: Vec<CardType>,
}

/// Engine configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EngineConfig {
    /// Player count at which a waiting game deals and starts.
    pub auto_start_players: usize,

    /// Seats per game.
    pub max_players: usize,

    /// Random cards dealt per hand, on top of the guaranteed Defuse.
    pub hand_size: usize,

    /// Cards revealed by See the Future.
    pub see_the_future_count: usize,

    pub deck: DeckComposition,

    /// Fixes every game's RNG stream. `None` seeds from OS entropy.
    pub seed: Option<u64>,

    pub deal_fixture: Option<DealFixture>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            auto_start_players: MIN_PLAYERS,
            max_players: MAX_PLAYERS,
            hand_size: 7,
            see_the_future_count: 3,
            deck: DeckComposition::default(),
            seed: None,
            deal_fixture: None,
        }
    }
}

impl EngineConfig {
    /// Parse and validate a JSON configuration.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Set the RNG seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Force cards into every dealt hand.
    #[must_use]
    pub fn with_deal_fixture(mut self, forced_cards: Vec<CardType>) -> Self {
        self.deal_fixture = Some(DealFixture { forced_cards });
        self
    }

    /// Check table sizes and that the deck can deal the starting table.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(MIN_PLAYERS..=MAX_PLAYERS).contains(&self.max_players) {
            return Err(ConfigError::Invalid(format!(
                "maxPlayers must be within {MIN_PLAYERS}..={MAX_PLAYERS}, got {}",
                self.max_players
            )));
        }
        if !(MIN_PLAYERS..=self.max_players).contains(&self.auto_start_players) {
            return Err(ConfigError::Invalid(format!(
                "autoStartPlayers must be within {MIN_PLAYERS}..={}, got {}",
                self.max_players, self.auto_start_players
            )));
        }
        if self.deck.defuse == 0 {
            return Err(ConfigError::Invalid("deck needs at least one Defuse".into()));
        }

        // Guaranteed Defuses come out of the deck first, the rest is dealt at random.
        let players = self.auto_start_players;
        let guaranteed = players.min(self.deck.defuse);
        let total = self
            .deck
            .total()
            .ok_or_else(|| ConfigError::Invalid("deck card counts overflow".into()))?;
        let needed = players.checked_mul(self.hand_size).ok_or_else(|| {
            ConfigError::Invalid(format!("handSize {} is too large", self.hand_size))
        })?;
        if needed > total - guaranteed {
            return Err(ConfigError::Invalid(format!(
                "deck of {total} cards cannot deal {players} hands of {}",
                self.hand_size
            )));
        }
        Ok(())
    }
}
