//! Events the transport layer relays to clients.
//!
//! Every event serializes as `{"event": <name>, "data": <payload>}`. State
//! updates are projected per recipient, so one applied move fans out into
//! one `gameStateUpdate` and one `updateHand` per seated player.

use serde::{Deserialize, Serialize};

use crate::cards::Card;
use crate::core::{GameId, GameState, GameStatus, PlayerId};
use crate::error::EngineError;
use crate::view::{hand_of, project, GameView, WinnerView};

#[allow(clippy::large_enum_variant)]
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "camelCase")]
pub enum GameEvent {
    /// A waiting game filled up and cards were dealt.
    GameStarted(GameView),
    GameStateUpdate(GameView),
    UpdateHand(Vec<Card>),
    #[serde(rename_all = "camelCase")]
    PlayerLeft {
        game_id: GameId,
        player_id: PlayerId,
    },
    RejoinGameSuccess(GameView),
    RejoinGameError {
        message: String,
    },
    SeeTheFutureResult(Vec<Card>),
    GameFinished {
        winner: WinnerView,
    },
}

impl GameEvent {
    /// Wire name of the event.
    pub fn name(&self) -> &'static str {
        match self {
            Self::GameStarted(_) => "gameStarted",
            Self::GameStateUpdate(_) => "gameStateUpdate",
            Self::UpdateHand(_) => "updateHand",
            Self::PlayerLeft { .. } => "playerLeft",
            Self::RejoinGameSuccess(_) => "rejoinGameSuccess",
            Self::RejoinGameError { .. } => "rejoinGameError",
            Self::SeeTheFutureResult(_) => "seeTheFutureResult",
            Self::GameFinished { .. } => "gameFinished",
        }
    }
}

/// Who receives an event.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "playerId", rename_all = "camelCase")]
pub enum Recipient {
    /// Everyone connected to the game.
    Game,
    Player(PlayerId),
}

/// An event addressed to its recipients.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Outbound {
    pub recipient: Recipient,
    pub event: GameEvent,
}

impl Outbound {
    #[must_use]
    pub fn to_game(event: GameEvent) -> Self {
        Self {
            recipient: Recipient::Game,
            event,
        }
    }

    #[must_use]
    pub fn to_player(player: PlayerId, event: GameEvent) -> Self {
        Self {
            recipient: Recipient::Player(player),
            event,
        }
    }
}

/// Error payload returned to the originating caller only.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorPayload {
    pub code: String,
    pub message: String,
}

impl From<&EngineError> for ErrorPayload {
    fn from(err: &EngineError) -> Self {
        Self {
            code: err.kind().to_string(),
            message: err.to_string(),
        }
    }
}

/// Per-player state and hand updates after a change to `state`.
///
/// Adds the See the Future result for its viewer, and `gameFinished` once
/// the game is over.
#[must_use]
pub fn state_updates(state: &GameState) -> Vec<Outbound> {
    let mut out = Vec::with_capacity(state.player_count() * 2 + 2);
    for player in &state.players {
        out.push(Outbound::to_player(
            player.id.clone(),
            GameEvent::GameStateUpdate(project(state, &player.id)),
        ));
        out.push(Outbound::to_player(
            player.id.clone(),
            GameEvent::UpdateHand(hand_of(state, &player.id).unwrap_or_default()),
        ));
    }
    if let Some(revealed) = &state.revealed {
        out.push(Outbound::to_player(
            revealed.viewer.clone(),
            GameEvent::SeeTheFutureResult(revealed.cards.to_vec()),
        ));
    }
    if state.status == GameStatus::Finished {
        if let Some(winner) = state.winner_player() {
            out.push(Outbound::to_game(GameEvent::GameFinished {
                winner: WinnerView {
                    id: winner.id.clone(),
                    username: winner.username.clone(),
                },
            }));
        }
    }
    out
}

/// `gameStarted` for every seat, followed by their opening hands.
#[must_use]
pub fn game_started(state: &GameState) -> Vec<Outbound> {
    let mut out = Vec::with_capacity(state.player_count() * 2);
    for player in &state.players {
        out.push(Outbound::to_player(
            player.id.clone(),
            GameEvent::GameStarted(project(state, &player.id)),
        ));
        out.push(Outbound::to_player(
            player.id.clone(),
            GameEvent::UpdateHand(player.hand.iter().copied().collect()),
        ));
    }
    out
}
