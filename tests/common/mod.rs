//! Shared helpers for integration tests.

#![allow(dead_code)]

use once_cell::sync::OnceCell;
use tracing_subscriber::{fmt, EnvFilter};

use kitten_engine::{
    Card, CardId, CardKind, GameId, GameState, GameStatus, GameStore, NewPlayer, Pile,
    RandomSource,
};

static INITIALIZED: OnceCell<()> = OnceCell::new();

/// Install a test subscriber once. Level from `TEST_LOG`, then `RUST_LOG`,
/// else `warn`.
pub fn init_logging() {
    INITIALIZED.get_or_init(|| {
        let filter = std::env::var("TEST_LOG")
            .or_else(|_| std::env::var("RUST_LOG"))
            .map(EnvFilter::new)
            .unwrap_or_else(|_| EnvFilter::new("warn"));

        fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .without_time()
            .try_init()
            .ok();
    });
}

pub fn card(id: u32, kind: CardKind) -> Card {
    Card::new(CardId::new(id), kind)
}

/// Player ids used by `table`, in seat order.
pub const SEATS: [&str; 5] = ["a", "b", "c", "d", "e"];

/// A playing game with hand-picked hands and draw pile (front = top).
///
/// Card ids are whatever the caller chose; they should be unique.
pub fn table(hands: Vec<Vec<Card>>, draw: Vec<Card>) -> GameState {
    let mut state = GameState::new(GameId::new(), NewPlayer::new(SEATS[0], "Alice"));
    for seat in &SEATS[1..hands.len()] {
        state.seat(NewPlayer::new(*seat, seat.to_uppercase()));
    }
    for (player, hand) in state.players.iter_mut().zip(hands) {
        player.hand = hand.into_iter().collect();
    }
    state.draw_pile = Pile::from_cards(draw);
    state.status = GameStatus::Playing;
    state
}

/// A store holding exactly `state`, driven by `rng`.
pub fn store_with(state: GameState, rng: impl RandomSource + 'static) -> (GameStore, GameId) {
    init_logging();
    let store = GameStore::default();
    let id = state.id;
    store.insert_game(state, Box::new(rng));
    (store, id)
}

/// A seeded store with one freshly started three-player game.
pub fn started_game(seed: u64) -> (GameStore, GameId) {
    init_logging();
    let config = kitten_engine::EngineConfig::default().with_seed(seed);
    let store = GameStore::new(config).expect("default config is valid");
    let view = store.create_game(NewPlayer::new("a", "Alice"));
    store
        .join_game(view.id, NewPlayer::new("b", "Bob"))
        .expect("second seat");
    store
        .join_game(view.id, NewPlayer::new("c", "Cara"))
        .expect("third seat");
    (store, view.id)
}
