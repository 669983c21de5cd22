//! Redaction and read-only queries.

mod common;

use std::collections::HashSet;

use common::{card, started_game, store_with, table};
use kitten_engine::{CardId, CardKind, FixedRng, Move, PlayerId};

fn ids_in(json: &serde_json::Value, out: &mut HashSet<u64>) {
    match json {
        serde_json::Value::Object(map) => {
            for (key, value) in map {
                if key == "id" {
                    if let Some(n) = value.as_u64() {
                        out.insert(n);
                    }
                }
                ids_in(value, out);
            }
        }
        serde_json::Value::Array(items) => items.iter().for_each(|v| ids_in(v, out)),
        _ => {}
    }
}

/// No card id from any hand or the draw pile shows up in any view.
#[test]
fn test_views_never_expose_private_cards() {
    let (store, id) = started_game(11);
    let state = store.get_game(id).unwrap();

    let private: HashSet<u64> = state
        .players
        .iter()
        .flat_map(|p| p.hand.iter())
        .chain(state.draw_pile.iter())
        .map(|c| u64::from(c.id.raw()))
        .collect();

    for player in &state.players {
        let view = store.get_game_state_for_player(id, &player.id).unwrap();
        let json = serde_json::to_value(&view).unwrap();

        let mut seen = HashSet::new();
        ids_in(&json, &mut seen);
        assert!(seen.is_disjoint(&private), "leak to {}", player.id);

        for summary in json["players"].as_array().unwrap() {
            assert!(summary.get("hand").is_none());
            assert_eq!(summary["cardCount"], 8);
        }
        assert!(json.get("drawPile").is_none());
        assert_eq!(json["drawPileCount"], 30);
    }
}

#[test]
fn test_own_hand_only_through_accessor() {
    let (store, id) = started_game(12);
    let a = PlayerId::new("a");

    let hand = store.get_player_hand(id, &a).unwrap();
    let view = store.get_game_state_for_player(id, &a).unwrap();
    let json = serde_json::to_string(&view).unwrap();

    assert_eq!(hand.len(), 8);
    for card in &hand {
        assert!(!json.contains(&format!("\"id\":{}", card.id.raw())));
    }
}

#[test]
fn test_played_card_id_not_in_last_action() {
    let (store, id) = started_game(13);
    let a = PlayerId::new("a");
    let hand = store.get_player_hand(id, &a).unwrap();

    // Any card that needs no target and keeps the turn
    let Some(card) = hand.iter().find(|c| {
        matches!(
            c.card_type(),
            kitten_engine::CardType::Shuffle | kitten_engine::CardType::SeeTheFuture
        )
    }) else {
        return;
    };
    store.make_move(id, &Move::play("a", card.id)).unwrap();

    let view = store.get_game_state_for_player(id, &PlayerId::new("b")).unwrap();
    let action = serde_json::to_value(view.last_action.unwrap()).unwrap();
    assert_eq!(action.get("cardId"), None);
    assert_eq!(action.get("id"), None);
    assert_eq!(action["type"], "PLAY_CARD");
    assert_eq!(action["actorId"], "a");
}

/// Once played, a card's id stays off the wire for every seat.
#[test]
fn test_played_card_id_not_in_discard_pile() {
    let state = table(
        vec![
            vec![card(41, CardKind::Shuffle), card(42, CardKind::Skip)],
            vec![card(43, CardKind::Nope)],
            vec![card(44, CardKind::Favor)],
        ],
        vec![card(45, CardKind::Attack), card(46, CardKind::Defuse)],
    );
    let (store, id) = store_with(state, FixedRng::new());

    store.make_move(id, &Move::play("a", CardId::new(41))).unwrap();

    for seat in ["a", "b", "c"] {
        let view = store.get_game_state_for_player(id, &PlayerId::new(seat)).unwrap();
        assert_eq!(view.discard_pile, vec![CardKind::Shuffle]);

        let json = serde_json::to_value(&view).unwrap();
        let mut seen = HashSet::new();
        ids_in(&json, &mut seen);
        assert!(!seen.contains(&41), "played id visible to {seat}");
        assert!(json["discardPile"][0].get("id").is_none());
    }
}

#[test]
fn test_reads_do_not_mutate() {
    let (store, id) = started_game(14);
    let a = PlayerId::new("a");

    let first = store.get_game(id).unwrap();
    let view_first = store.get_game_state_for_player(id, &a).unwrap();
    for _ in 0..3 {
        store.get_game_state_for_player(id, &a).unwrap();
        store.get_player_hand(id, &a).unwrap();
        store.see_the_future(id, &a).unwrap();
        store.legal_moves(id, &a).unwrap();
    }

    assert_eq!(store.get_game(id).unwrap(), first);
    assert_eq!(store.get_game_state_for_player(id, &a).unwrap(), view_first);
}

#[test]
fn test_unknown_card_rejected_without_change() {
    let (store, id) = started_game(15);
    let before = store.get_game(id).unwrap();

    let result = store.make_move(id, &Move::play("a", CardId::new(9999)));
    assert!(result.is_err());
    assert_eq!(store.get_game(id).unwrap(), before);
}
