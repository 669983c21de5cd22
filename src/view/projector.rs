//! Redaction of `GameState` for one viewer.
//!
//! ## What is hidden
//!
//! - Every hand, including the viewer's own (only its size is shown)
//! - The order of the draw pile (only its size is shown)
//! - Card ids in the discard pile and the last action
//! - The type of a drawn card, except to the drawer
//! - The position a defused kitten went back to
//! - See the Future results, except to the player who saw them

use serde::{Deserialize, Serialize};

use crate::cards::{Card, CardKind, CardType};
use crate::core::{GameId, GameState, GameStatus, MoveKind, Player, PlayerId, TurnDirection};

/// Public facts about one seat.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerSummary {
    pub id: PlayerId,
    pub username: String,
    pub alive: bool,
    pub pending_turns: u32,
    pub card_count: usize,
}

impl From<&Player> for PlayerSummary {
    fn from(player: &Player) -> Self {
        Self {
            id: player.id.clone(),
            username: player.username.clone(),
            alive: player.alive,
            pending_turns: player.pending_turns,
            card_count: player.card_count(),
        }
    }
}

/// The last action without card identity.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionView {
    #[serde(rename = "type")]
    pub kind: MoveKind,
    pub actor_id: PlayerId,
    pub card_type: Option<CardType>,
    pub target_id: Option<PlayerId>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WinnerView {
    pub id: PlayerId,
    pub username: String,
}

/// A game as one player sees it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameView {
    pub id: GameId,
    pub players: Vec<PlayerSummary>,
    pub draw_pile_count: usize,
    /// Discarded kinds, oldest first.
    pub discard_pile: Vec<CardKind>,
    pub current_turn_player_id: PlayerId,
    pub turn_direction: TurnDirection,
    pub status: GameStatus,
    pub awaiting_defuse_placement: bool,
    pub last_action: Option<ActionView>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub revealed_top_cards: Option<Vec<Card>>,
    pub winner: Option<WinnerView>,
}

/// Project `state` for `viewer`.
///
/// The viewer need not be seated; spectators get the same view as any
/// opponent.
#[must_use]
pub fn project(state: &GameState, viewer: &PlayerId) -> GameView {
    let last_action = state.last_action.as_ref().map(|action| {
        let card_visible = action.kind != MoveKind::DrawCard || &action.actor == viewer;
        ActionView {
            kind: action.kind,
            actor_id: action.actor.clone(),
            card_type: action
                .card
                .filter(|_| card_visible)
                .map(|card| card.card_type()),
            target_id: action.target.clone(),
        }
    });

    let revealed_top_cards = state
        .revealed
        .as_ref()
        .filter(|r| &r.viewer == viewer)
        .map(|r| r.cards.to_vec());

    GameView {
        id: state.id,
        players: state.players.iter().map(PlayerSummary::from).collect(),
        draw_pile_count: state.draw_pile.len(),
        discard_pile: state.discard_pile.iter().map(|c| c.kind).collect(),
        current_turn_player_id: state.current_turn.clone(),
        turn_direction: state.direction,
        status: state.status,
        awaiting_defuse_placement: state.is_awaiting_defuse(),
        last_action,
        revealed_top_cards,
        winner: state.winner_player().map(|p| WinnerView {
            id: p.id.clone(),
            username: p.username.clone(),
        }),
    }
}

/// The private hand of `player`, if seated.
#[must_use]
pub fn hand_of(state: &GameState, player: &PlayerId) -> Option<Vec<Card>> {
    state.player(player).map(|p| p.hand.iter().copied().collect())
}
