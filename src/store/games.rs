//! Game store: lifecycle and move entry point.
//!
//! Games live in a `DashMap`, each behind its own mutex. A lookup only
//! clones the session's `Arc`, so the map shard lock is released before
//! the game lock is taken: moves on one game run one at a time, moves on
//! different games never wait on each other.

use std::sync::Arc;

use dashmap::DashMap;
use parking_lot::Mutex;
use tracing::{debug, info, warn};

use crate::cards::{self, Card};
use crate::core::{
    EngineConfig, GameId, GameRng, GameState, GameStatus, Move, MoveKind, NewPlayer, PlayerId,
    RandomSource,
};
use crate::error::{ConfigError, EngineError, EngineResult};
use crate::events::{self, GameEvent, Outbound};
use crate::games::KittensRules;
use crate::rules::RulesEngine;
use crate::view::{hand_of, project, GameView};

/// Creates the random source for each new game.
pub type RngFactory = Box<dyn Fn() -> Box<dyn RandomSource> + Send + Sync>;

fn entropy_rng() -> Box<dyn RandomSource> {
    Box::new(GameRng::from_entropy())
}

/// One live game.
pub struct GameSession {
    pub state: GameState,
    rng: Box<dyn RandomSource>,
}

impl GameSession {
    #[must_use]
    pub fn new(state: GameState, rng: Box<dyn RandomSource>) -> Self {
        Self { state, rng }
    }
}

/// Result of an applied move.
#[derive(Clone, Debug)]
pub struct MoveOutcome {
    /// Full state after the move. Never send this to a client.
    pub state: GameState,
    /// Per-recipient events to relay.
    pub events: Vec<Outbound>,
}

/// All live games.
pub struct GameStore {
    games: DashMap<GameId, Arc<Mutex<GameSession>>>,
    rules: KittensRules,
    rng_factory: RngFactory,
}

impl GameStore {
    /// Create a store. With `config.seed` set, every game's RNG is forked
    /// from one seeded stream.
    pub fn new(config: EngineConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let rng_factory: RngFactory = match config.seed {
            Some(seed) => {
                let master = Mutex::new(GameRng::new(seed));
                Box::new(move || -> Box<dyn RandomSource> { Box::new(master.lock().fork()) })
            }
            None => Box::new(entropy_rng),
        };
        Ok(Self {
            games: DashMap::new(),
            rules: KittensRules::new(config),
            rng_factory,
        })
    }

    /// Replace the source of randomness for games created from now on.
    #[must_use]
    pub fn with_rng_factory(
        mut self,
        factory: impl Fn() -> Box<dyn RandomSource> + Send + Sync + 'static,
    ) -> Self {
        self.rng_factory = Box::new(factory);
        self
    }

    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        self.rules.config()
    }

    /// Number of live games.
    #[must_use]
    pub fn game_count(&self) -> usize {
        self.games.len()
    }

    fn session(&self, game_id: GameId) -> EngineResult<Arc<Mutex<GameSession>>> {
        self.games
            .get(&game_id)
            .map(|entry| Arc::clone(entry.value()))
            .ok_or_else(|| EngineError::not_found(format!("Game {game_id} not found")))
    }

    /// Run `f` with exclusive access to one game.
    fn with_session<R>(
        &self,
        game_id: GameId,
        f: impl FnOnce(&mut GameSession) -> EngineResult<R>,
    ) -> EngineResult<R> {
        let session = self.session(game_id)?;
        let mut guard = session.lock();
        f(&mut guard)
    }

    // === Lifecycle ===

    /// Create a waiting game with `creator` as its only player.
    pub fn create_game(&self, creator: NewPlayer) -> GameView {
        let viewer = creator.id.clone();
        let state = GameState::new(GameId::new(), creator);
        let view = project(&state, &viewer);
        info!(game_id = %state.id, creator = %viewer, "Game created");
        self.insert_game(state, (self.rng_factory)());
        view
    }

    /// Register a prepared game. Replaces any game with the same id.
    pub fn insert_game(&self, state: GameState, rng: Box<dyn RandomSource>) {
        let id = state.id;
        self.games
            .insert(id, Arc::new(Mutex::new(GameSession::new(state, rng))));
    }

    /// Seat a player in a waiting game and return their view.
    ///
    /// Reaching the auto-start size deals and starts the game.
    pub fn join_game(&self, game_id: GameId, player: NewPlayer) -> EngineResult<GameView> {
        let viewer = player.id.clone();
        let outcome = self.join_game_with_outcome(game_id, player)?;
        Ok(project(&outcome.state, &viewer))
    }

    /// Seat a player and return the full state plus the events to relay.
    ///
    /// The join that starts the game yields `gameStarted` and the opening
    /// hand for every seat; any other join yields plain state updates.
    pub fn join_game_with_outcome(
        &self,
        game_id: GameId,
        player: NewPlayer,
    ) -> EngineResult<MoveOutcome> {
        let config = self.rules.config();
        self.with_session(game_id, |session| {
            let GameSession { state, rng } = session;
            if state.status != GameStatus::Waiting {
                return Err(EngineError::invalid_state("Game has already started"));
            }
            if state.player_count() >= config.max_players {
                return Err(EngineError::invalid_state("Game is full"));
            }
            if state.player(&player.id).is_some() {
                return Err(EngineError::invalid_move(format!(
                    "Player {} already joined",
                    player.id
                )));
            }

            let joined = player.id.clone();
            state.seat(player);
            info!(game_id = %game_id, player = %joined, seats = state.player_count(), "Player joined");

            if state.player_count() < config.auto_start_players {
                return Ok(MoveOutcome {
                    events: events::state_updates(state),
                    state: state.clone(),
                });
            }

            let deal = cards::deal(state.player_count(), config, &mut state.mint, rng.as_mut());
            state.start(deal);
            info!(
                game_id = %game_id,
                players = state.player_count(),
                draw_pile = state.draw_pile.len(),
                "Game started"
            );
            Ok(MoveOutcome {
                events: events::game_started(state),
                state: state.clone(),
            })
        })
    }

    /// Remove a game. Unknown ids are ignored.
    pub fn delete_game(&self, game_id: GameId) {
        if self.games.remove(&game_id).is_some() {
            info!(game_id = %game_id, "Game deleted");
        }
    }

    /// A player leaves: everyone is told, then the game is removed.
    pub fn leave_game(&self, game_id: GameId, player_id: &PlayerId) -> EngineResult<Vec<Outbound>> {
        self.with_session(game_id, |session| {
            if session.state.player(player_id).is_none() {
                return Err(EngineError::not_found(format!(
                    "Player {player_id} not found in game"
                )));
            }
            Ok(())
        })?;
        info!(game_id = %game_id, player = %player_id, "Player left");
        self.delete_game(game_id);
        Ok(vec![Outbound::to_game(GameEvent::PlayerLeft {
            game_id,
            player_id: player_id.clone(),
        })])
    }

    /// Reconnect a seated player.
    ///
    /// Always answers the caller: the current view on success, an error
    /// event otherwise.
    pub fn rejoin_game(&self, game_id: GameId, player_id: &PlayerId) -> Outbound {
        let event = match self.get_game_state_for_player(game_id, player_id) {
            Ok(view) => GameEvent::RejoinGameSuccess(view),
            Err(err) => {
                debug!(game_id = %game_id, player = %player_id, error = err.kind(), "Rejoin refused");
                GameEvent::RejoinGameError {
                    message: err.to_string(),
                }
            }
        };
        Outbound::to_player(player_id.clone(), event)
    }

    // === Moves ===

    fn apply(&self, session: &mut GameSession, game_id: GameId, mv: &Move) -> EngineResult<()> {
        let GameSession { state, rng } = session;
        match self.rules.apply_move(state, mv, rng.as_mut()) {
            Ok(()) => {
                debug!(game_id = %game_id, player = %mv.player_id, kind = %mv.kind, "Move applied");
                Ok(())
            }
            Err(err) => {
                warn!(
                    game_id = %game_id,
                    player = %mv.player_id,
                    kind = %mv.kind,
                    error = err.kind(),
                    "Move rejected: {err}"
                );
                Err(err)
            }
        }
    }

    /// Apply a move and return the mover's view.
    pub fn make_move(&self, game_id: GameId, mv: &Move) -> EngineResult<GameView> {
        self.with_session(game_id, |session| {
            self.apply(session, game_id, mv)?;
            Ok(project(&session.state, &mv.player_id))
        })
    }

    /// Apply a move and return the full state plus the events to relay.
    pub fn make_move_with_outcome(&self, game_id: GameId, mv: &Move) -> EngineResult<MoveOutcome> {
        self.with_session(game_id, |session| {
            self.apply(session, game_id, mv)?;
            Ok(MoveOutcome {
                events: events::state_updates(&session.state),
                state: session.state.clone(),
            })
        })
    }

    // === Queries ===

    /// Full state, private information included.
    pub fn get_game(&self, game_id: GameId) -> EngineResult<GameState> {
        self.with_session(game_id, |session| Ok(session.state.clone()))
    }

    pub fn get_game_state_for_player(
        &self,
        game_id: GameId,
        player_id: &PlayerId,
    ) -> EngineResult<GameView> {
        self.with_session(game_id, |session| {
            if session.state.player(player_id).is_none() {
                return Err(EngineError::not_found(format!(
                    "Player {player_id} not found in game"
                )));
            }
            Ok(project(&session.state, player_id))
        })
    }

    pub fn get_player_hand(&self, game_id: GameId, player_id: &PlayerId) -> EngineResult<Vec<Card>> {
        self.with_session(game_id, |session| {
            hand_of(&session.state, player_id).ok_or_else(|| {
                EngineError::not_found(format!("Player {player_id} not found in game"))
            })
        })
    }

    /// The See the Future result waiting for `player_id`, if any.
    pub fn see_the_future(
        &self,
        game_id: GameId,
        player_id: &PlayerId,
    ) -> EngineResult<Option<Vec<Card>>> {
        self.with_session(game_id, |session| {
            Ok(session
                .state
                .revealed
                .as_ref()
                .filter(|r| &r.viewer == player_id)
                .map(|r| r.cards.to_vec()))
        })
    }

    /// Move kinds `player_id` may attempt right now.
    pub fn legal_moves(&self, game_id: GameId, player_id: &PlayerId) -> EngineResult<Vec<MoveKind>> {
        self.with_session(game_id, |session| {
            Ok(self.rules.legal_moves(&session.state, player_id))
        })
    }
}

impl Default for GameStore {
    fn default() -> Self {
        Self {
            games: DashMap::new(),
            rules: KittensRules::default(),
            rng_factory: Box::new(entropy_rng),
        }
    }
}
