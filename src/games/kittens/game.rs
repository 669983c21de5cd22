//! Exploding Kittens rules.

use tracing::{debug, info};

use crate::cards::{CardKind, CardType};
use crate::core::{
    EngineConfig, GameAction, GameState, GameStatus, Move, MoveKind, PlayerId, RandomSource,
    TurnPhase,
};
use crate::effects::EffectResolver;
use crate::error::{EngineError, EngineResult};
use crate::rules::turn::{check_game_end, end_turn, TurnEnd};
use crate::rules::{GameResult, RulesEngine};
use crate::zones::ZonePosition;

/// The Exploding Kittens rule set.
#[derive(Clone, Debug, Default)]
pub struct KittensRules {
    config: EngineConfig,
}

impl KittensRules {
    #[must_use]
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// The mover must exist, the game must be running, and it must be
    /// their turn.
    fn validate_turn(state: &GameState, player: &PlayerId) -> EngineResult<()> {
        if state.player(player).is_none() {
            return Err(EngineError::not_found(format!("Player {player} not found")));
        }
        if state.status != GameStatus::Playing {
            return Err(EngineError::invalid_state(format!(
                "Game is {}, not playing",
                state.status.as_str()
            )));
        }
        let current = state
            .current_player()
            .filter(|p| p.alive)
            .ok_or_else(|| EngineError::invalid_state("Current player is not valid"))?;
        if &current.id != player {
            return Err(EngineError::invalid_state("Not your turn"));
        }
        Ok(())
    }

    /// Draw the top card and end the turn, unless it is a kitten.
    fn draw_card(&self, state: &mut GameState, actor: &PlayerId) -> EngineResult<()> {
        let top = state
            .draw_pile
            .iter()
            .next()
            .copied()
            .ok_or_else(|| EngineError::invalid_move("No cards left in the draw pile"))?;
        let defuse_idx = state
            .player(actor)
            .ok_or_else(|| EngineError::not_found(format!("Player {actor} not found")))?
            .find_type(CardType::Defuse);

        // Commit
        state.revealed = None;
        state.nope_snapshot = None;
        state.draw_pile.pop_front();
        state.last_action = Some(GameAction::new(MoveKind::DrawCard, actor.clone()).with_card(top));

        if top.kind != CardKind::ExplodingKitten {
            if let Some(player) = state.player_mut(actor) {
                player.give(top);
            }
            debug!(game_id = %state.id, player = %actor, "Card drawn");
            end_turn(state, TurnEnd::Normal);
            return Ok(());
        }

        match defuse_idx {
            Some(idx) => {
                if let Some(player) = state.player_mut(actor) {
                    let defuse = player.take_at(idx);
                    state.discard_pile.push_back(defuse);
                }
                state.phase = TurnPhase::AwaitingDefusePlacement { kitten: top };
                info!(game_id = %state.id, player = %actor, "Exploding kitten defused");
            }
            None => {
                if let Some(player) = state.player_mut(actor) {
                    player.alive = false;
                }
                state.discard_pile.push_back(top);
                info!(game_id = %state.id, player = %actor, "Player exploded");
                check_game_end(state);
                end_turn(state, TurnEnd::Hard);
            }
        }
        Ok(())
    }

    /// Put the withheld kitten back into the draw pile.
    fn defuse_kitten(&self, state: &mut GameState, mv: &Move) -> EngineResult<()> {
        let TurnPhase::AwaitingDefusePlacement { kitten } = state.phase else {
            return Err(EngineError::invalid_state("No exploding kitten to defuse"));
        };
        let position = mv
            .target_position
            .ok_or_else(|| EngineError::invalid_move("targetPosition is required"))?;
        if position > state.draw_pile.len() {
            return Err(EngineError::invalid_move(format!(
                "Invalid position {position} for exploding kitten, pile has {} cards",
                state.draw_pile.len()
            )));
        }

        // Commit
        state.revealed = None;
        state.draw_pile.insert(kitten, ZonePosition::Index(position));
        state.phase = TurnPhase::Acting;
        state.last_action = Some(
            GameAction::new(MoveKind::DefuseKitten, mv.player_id.clone()).with_position(position),
        );
        debug!(game_id = %state.id, player = %mv.player_id, "Kitten placed");
        end_turn(state, TurnEnd::Normal);
        Ok(())
    }

    /// Cancel the last played card by rolling back to its restore point.
    fn nope(&self, state: &mut GameState, mv: &Move) -> EngineResult<()> {
        let actor = &mv.player_id;
        let noped = state
            .last_action
            .as_ref()
            .ok_or_else(|| EngineError::invalid_state("No action to nope"))?
            .actor
            .clone();

        let player = state
            .player(actor)
            .ok_or_else(|| EngineError::not_found(format!("Player {actor} not found")))?;
        let nope_idx = match mv.card_id {
            Some(id) => player.find_card(id).filter(|&i| player.hand[i].is(CardType::Nope)),
            None => player.find_type(CardType::Nope),
        }
        .ok_or_else(|| EngineError::gameplay_violation("No nope card found"))?;
        let nope_card = player.hand[nope_idx];

        let snapshot = state
            .nope_snapshot
            .as_deref()
            .ok_or_else(|| EngineError::invalid_state("The last action cannot be noped"))?;
        let restored_idx = snapshot
            .players
            .iter()
            .find(|p| &p.id == actor)
            .and_then(|p| p.find_card(nope_card.id))
            .ok_or_else(|| {
                EngineError::gameplay_violation("Nope card was gained by the action it would cancel")
            })?;

        // Commit
        let Some(snapshot) = state.nope_snapshot.take() else {
            return Err(EngineError::invalid_state("The last action cannot be noped"));
        };
        state.restore_snapshot(*snapshot);
        state.revealed = None;
        if let Some(player) = state.player_mut(actor) {
            player.take_at(restored_idx);
        }
        let replacement = state.mint.remint(CardKind::Nope);
        state.discard_pile.push_back(replacement);
        state.last_action = Some(
            GameAction::new(MoveKind::Nope, actor.clone())
                .with_card(replacement)
                .with_target(Some(noped)),
        );
        info!(game_id = %state.id, player = %actor, "Action noped");
        Ok(())
    }
}

impl RulesEngine for KittensRules {
    fn legal_moves(&self, state: &GameState, player: &PlayerId) -> Vec<MoveKind> {
        if Self::validate_turn(state, player).is_err() {
            return vec![];
        }
        if state.is_awaiting_defuse() {
            return vec![MoveKind::DefuseKitten];
        }
        let Some(hand) = state.player(player).map(|p| &p.hand) else {
            return vec![];
        };

        let mut moves = Vec::new();
        if hand
            .iter()
            .any(|c| !matches!(c.kind, CardKind::ExplodingKitten | CardKind::Defuse))
        {
            moves.push(MoveKind::PlayCard);
        }
        if !state.draw_pile.is_empty() {
            moves.push(MoveKind::DrawCard);
        }
        if state.has_nope_target() && hand.iter().any(|c| c.is(CardType::Nope)) {
            moves.push(MoveKind::Nope);
        }
        moves
    }

    fn apply_move(
        &self,
        state: &mut GameState,
        mv: &Move,
        rng: &mut dyn RandomSource,
    ) -> EngineResult<()> {
        Self::validate_turn(state, &mv.player_id)?;
        if state.is_awaiting_defuse() && mv.kind != MoveKind::DefuseKitten {
            return Err(EngineError::invalid_state(
                "The defused kitten must be placed first",
            ));
        }

        match mv.kind {
            MoveKind::PlayCard => {
                EffectResolver::play_card(state, mv, self.config.see_the_future_count, rng)
            }
            MoveKind::DrawCard => self.draw_card(state, &mv.player_id),
            MoveKind::DefuseKitten => self.defuse_kitten(state, mv),
            MoveKind::Nope => self.nope(state, mv),
        }
    }

    fn is_terminal(&self, state: &GameState) -> Option<GameResult> {
        match (state.status, &state.winner) {
            (GameStatus::Finished, Some(winner)) => Some(GameResult::Winner(winner.clone())),
            _ => None,
        }
    }
}
