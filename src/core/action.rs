//! Moves and action records.
//!
//! A `Move` is what a client asks for; a `GameAction` is what the engine
//! records after applying it. The recorded action is the target of a later
//! NOPE and feeds the redacted `lastAction` in every view.

use serde::{Deserialize, Serialize};

use super::player::PlayerId;
use crate::cards::{Card, CardId};

/// The four move kinds the engine accepts.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MoveKind {
    PlayCard,
    DrawCard,
    DefuseKitten,
    Nope,
}

impl MoveKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PlayCard => "PLAY_CARD",
            Self::DrawCard => "DRAW_CARD",
            Self::DefuseKitten => "DEFUSE_KITTEN",
            Self::Nope => "NOPE",
        }
    }
}

impl std::fmt::Display for MoveKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A move submitted by a player.
///
/// Deserializes from the wire shape
/// `{type, playerId, cardId?, targetPlayerId?, targetPosition?}`.
///
/// ```
/// use kitten_engine::core::{Move, MoveKind, PlayerId};
/// use kitten_engine::cards::CardId;
///
/// let play = Move::play("p1", CardId::new(4)).with_target("p2");
/// assert_eq!(play.kind, MoveKind::PlayCard);
/// assert_eq!(play.target_player_id, Some(PlayerId::new("p2")));
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Move {
    #[serde(rename = "type")]
    pub kind: MoveKind,
    pub player_id: PlayerId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub card_id: Option<CardId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_player_id: Option<PlayerId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_position: Option<usize>,
}

impl Move {
    fn bare(kind: MoveKind, player: impl Into<String>) -> Self {
        Self {
            kind,
            player_id: PlayerId::new(player),
            card_id: None,
            target_player_id: None,
            target_position: None,
        }
    }

    #[must_use]
    pub fn play(player: impl Into<String>, card_id: CardId) -> Self {
        Self {
            card_id: Some(card_id),
            ..Self::bare(MoveKind::PlayCard, player)
        }
    }

    #[must_use]
    pub fn draw(player: impl Into<String>) -> Self {
        Self::bare(MoveKind::DrawCard, player)
    }

    #[must_use]
    pub fn defuse(player: impl Into<String>, position: usize) -> Self {
        Self {
            target_position: Some(position),
            ..Self::bare(MoveKind::DefuseKitten, player)
        }
    }

    #[must_use]
    pub fn nope(player: impl Into<String>) -> Self {
        Self::bare(MoveKind::Nope, player)
    }

    #[must_use]
    pub fn with_target(mut self, target: impl Into<String>) -> Self {
        self.target_player_id = Some(PlayerId::new(target));
        self
    }

    #[must_use]
    pub fn with_card(mut self, card_id: CardId) -> Self {
        self.card_id = Some(card_id);
        self
    }
}

/// A move as recorded after it was applied.
///
/// Holds the full card (including its id); views redact it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameAction {
    #[serde(rename = "type")]
    pub kind: MoveKind,
    pub actor: PlayerId,
    pub card: Option<Card>,
    pub target: Option<PlayerId>,
    pub position: Option<usize>,
}

impl GameAction {
    #[must_use]
    pub fn new(kind: MoveKind, actor: PlayerId) -> Self {
        Self {
            kind,
            actor,
            card: None,
            target: None,
            position: None,
        }
    }

    #[must_use]
    pub fn with_card(mut self, card: Card) -> Self {
        self.card = Some(card);
        self
    }

    #[must_use]
    pub fn with_target(mut self, target: Option<PlayerId>) -> Self {
        self.target = target;
        self
    }

    #[must_use]
    pub fn with_position(mut self, position: usize) -> Self {
        self.position = Some(position);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::CardKind;

    #[test]
    fn test_move_from_wire() {
        let json = serde_json::json!({
            "type": "PLAY_CARD",
            "playerId": "p1",
            "cardId": 12,
            "targetPlayerId": "p2"
        });
        let mv: Move = serde_json::from_value(json).unwrap();

        assert_eq!(mv, Move::play("p1", CardId::new(12)).with_target("p2"));
    }

    #[test]
    fn test_move_optional_fields_absent() {
        let json = serde_json::json!({"type": "DRAW_CARD", "playerId": "p3"});
        let mv: Move = serde_json::from_value(json).unwrap();

        assert_eq!(mv.kind, MoveKind::DrawCard);
        assert_eq!(mv.card_id, None);
        assert_eq!(mv.target_position, None);
    }

    #[test]
    fn test_unknown_move_type_rejected() {
        let json = serde_json::json!({"type": "GIVE_CARD", "playerId": "p3"});
        assert!(serde_json::from_value::<Move>(json).is_err());
    }

    #[test]
    fn test_action_builder() {
        let card = Card::new(CardId::new(3), CardKind::Favor);
        let action = GameAction::new(MoveKind::PlayCard, PlayerId::new("p1"))
            .with_card(card)
            .with_target(Some(PlayerId::new("p2")));

        assert_eq!(action.card, Some(card));
        assert_eq!(action.target, Some(PlayerId::new("p2")));
        assert_eq!(action.position, None);
    }
}
