//! Card effect resolution for PLAY_CARD.
//!
//! `EffectResolver::play_card` runs in two halves:
//!
//! 1. Validate: the card is in hand, it is playable, a targeted card names
//!    a living opponent with cards. Nothing is touched yet.
//! 2. Commit: the card moves to the discard pile, becomes the last action,
//!    the NOPE restore point is taken, and the effect resolves.

use tracing::debug;

use crate::cards::{Card, CardKind};
use crate::core::{GameAction, GameState, Move, MoveKind, PlayerId, RandomSource, RevealedCards};
use crate::error::{EngineError, EngineResult};
use crate::rules::turn::{end_turn, next_player_index, TurnEnd};

/// Resolves played cards against game state.
pub struct EffectResolver;

impl EffectResolver {
    /// Validate and play a card from the mover's hand.
    ///
    /// `reveal_count` is how many cards See the Future shows.
    pub fn play_card(
        state: &mut GameState,
        mv: &Move,
        reveal_count: usize,
        rng: &mut dyn RandomSource,
    ) -> EngineResult<()> {
        let actor = &mv.player_id;
        let card_id = mv
            .card_id
            .ok_or_else(|| EngineError::invalid_move("cardId is required to play a card"))?;

        let player = state
            .player(actor)
            .ok_or_else(|| EngineError::not_found(format!("Player {actor} not found")))?;
        let hand_idx = player
            .find_card(card_id)
            .ok_or_else(|| EngineError::invalid_move("Card not found in player hand"))?;
        let card = player.hand[hand_idx];

        match card.kind {
            CardKind::ExplodingKitten | CardKind::Defuse => {
                return Err(EngineError::invalid_move(format!(
                    "{:?} cannot be played directly",
                    card.card_type()
                )));
            }
            kind if kind.needs_target() => {
                Self::check_target(state, actor, mv.target_player_id.as_ref())?;
            }
            _ => {}
        }

        let paired = Self::completes_cat_pair(state, actor, card);

        // Commit
        state.revealed = None;
        if let Some(player) = state.player_mut(actor) {
            player.take_at(hand_idx);
        }
        state.discard_pile.push_back(card);
        state.last_action = Some(
            GameAction::new(MoveKind::PlayCard, actor.clone())
                .with_card(card)
                .with_target(mv.target_player_id.clone()),
        );
        state.nope_snapshot = Some(Box::new(state.take_snapshot()));

        debug!(game_id = %state.id, player = %actor, card = ?card.card_type(), "Card played");

        match card.kind {
            CardKind::Attack => Self::attack(state),
            CardKind::Skip => end_turn(state, TurnEnd::Normal),
            CardKind::SeeTheFuture => {
                state.revealed = Some(RevealedCards {
                    viewer: actor.clone(),
                    cards: state.draw_pile.peek_front(reveal_count).into_iter().collect(),
                });
            }
            CardKind::Shuffle => state.draw_pile.shuffle(rng),
            CardKind::Favor => {
                if let Some(target) = &mv.target_player_id {
                    Self::steal_random(state, target, actor, rng);
                }
            }
            CardKind::Cat { .. } => {
                if let (true, Some(target)) = (paired, &mv.target_player_id) {
                    Self::steal_random(state, target, actor, rng);
                }
            }
            CardKind::ExplodingKitten | CardKind::Defuse | CardKind::Nope => {}
        }

        Ok(())
    }

    /// A targeted card needs a living opponent holding at least one card.
    fn check_target(
        state: &GameState,
        actor: &PlayerId,
        target: Option<&PlayerId>,
    ) -> EngineResult<()> {
        let target =
            target.ok_or_else(|| EngineError::invalid_move("Target player is required"))?;
        if target == actor {
            return Err(EngineError::invalid_move("Cannot target yourself"));
        }
        let target = state
            .player(target)
            .filter(|p| p.alive)
            .ok_or_else(|| EngineError::invalid_move("Target player not found or not alive"))?;
        if target.card_count() == 0 {
            return Err(EngineError::invalid_move("Target player has no cards"));
        }
        Ok(())
    }

    /// Is `card` the second of two matching cats played back to back?
    ///
    /// Looks at the top of the discard pile and the last recorded play;
    /// matching is by kind, never by card id.
    fn completes_cat_pair(state: &GameState, actor: &PlayerId, card: Card) -> bool {
        let CardKind::Cat { .. } = card.kind else {
            return false;
        };
        let top_matches = state
            .discard_pile
            .nth_from_back(0)
            .is_some_and(|prev| prev.kind == card.kind);
        let same_actor = state.last_action.as_ref().is_some_and(|action| {
            action.kind == MoveKind::PlayCard
                && &action.actor == actor
                && action.card.is_some_and(|c| c.kind == card.kind)
        });
        top_matches && same_actor
    }

    /// Pass the turn and stack extra turns on the next player.
    fn attack(state: &mut GameState) {
        let current = state.player_index(&state.current_turn);
        let next = next_player_index(state);
        if let (Some(current), Some(next)) = (current, next) {
            if next != current {
                let owed = state.players[current].pending_turns;
                state.players[next].pending_turns = if owed > 1 { owed + 2 } else { 2 };
            }
        }
        end_turn(state, TurnEnd::Hard);
    }

    /// Move a uniformly random card from `from`'s hand to `to`'s hand.
    fn steal_random(
        state: &mut GameState,
        from: &PlayerId,
        to: &PlayerId,
        rng: &mut dyn RandomSource,
    ) {
        let Some(victim) = state.player_mut(from) else {
            return;
        };
        if victim.hand.is_empty() {
            return;
        }
        let idx = rng.next_index(victim.hand.len());
        let card = victim.take_at(idx);
        if let Some(thief) = state.player_mut(to) {
            thief.give(card);
        }
        debug!(game_id = %state.id, from = %from, to = %to, "Card stolen");
    }
}
