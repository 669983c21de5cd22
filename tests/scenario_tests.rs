//! End-to-end game flows through the store.

mod common;

use common::{card, started_game, store_with, table};
use kitten_engine::{
    CardId, CardKind, CardType, EngineError, FixedRng, GameStatus, Move, MoveKind, PlayerId,
};

fn pid(id: &str) -> PlayerId {
    PlayerId::new(id)
}

/// Three players join: the game starts and deals 8 cards each.
#[test]
fn test_three_players_auto_start() {
    let (store, id) = started_game(42);
    let state = store.get_game(id).unwrap();

    assert_eq!(state.status, GameStatus::Playing);
    assert_eq!(state.current_turn, pid("a"));
    for player in &state.players {
        assert_eq!(player.card_count(), 8);
        assert!(player.holds(CardType::Defuse));
        assert!(!player.holds(CardType::ExplodingKitten));
        assert_eq!(player.pending_turns, 1);
    }
    assert_eq!(state.draw_pile.len(), 52 - 21 - 3 + 2);
    assert_eq!(state.draw_pile.count_type(CardType::ExplodingKitten), 2);
    assert_eq!(state.total_cards(), 54);
}

#[test]
fn test_skip_passes_turn() {
    let state = table(
        vec![vec![card(1, CardKind::Skip)], vec![], vec![]],
        vec![card(2, CardKind::Favor)],
    );
    let (store, id) = store_with(state, FixedRng::new());

    let view = store.make_move(id, &Move::play("a", CardId::new(1))).unwrap();

    assert_eq!(view.current_turn_player_id, pid("b"));
    assert_eq!(view.players[0].pending_turns, 1);
    assert_eq!(view.players[1].pending_turns, 1);
    assert_eq!(view.discard_pile.len(), 1);
    let action = view.last_action.unwrap();
    assert_eq!(action.kind, MoveKind::PlayCard);
    assert_eq!(action.card_type, Some(CardType::Skip));
}

/// Drawing a kitten with no Defuse eliminates; the last survivor wins.
#[test]
fn test_explosion_finishes_game() {
    let mut state = table(
        vec![vec![card(1, CardKind::Skip)], vec![], vec![]],
        vec![card(2, CardKind::ExplodingKitten)],
    );
    state.players[2].alive = false;
    let (store, id) = store_with(state, FixedRng::new());

    let outcome = store.make_move_with_outcome(id, &Move::draw("a")).unwrap();

    let a = outcome.state.player(&pid("a")).unwrap();
    assert!(!a.alive);
    assert_eq!(outcome.state.status, GameStatus::Finished);
    assert_eq!(outcome.state.winner, Some(pid("b")));
    assert!(outcome
        .events
        .iter()
        .any(|o| o.event.name() == "gameFinished"));

    let after = store.make_move(id, &Move::draw("b"));
    assert!(matches!(after, Err(EngineError::InvalidState(_))));
}

/// Elimination with players left passes the turn to the next live seat.
#[test]
fn test_explosion_skips_dead_seats() {
    let mut state = table(
        vec![vec![], vec![], vec![], vec![]],
        vec![card(1, CardKind::ExplodingKitten), card(2, CardKind::Skip)],
    );
    state.players[1].alive = false;
    let (store, id) = store_with(state, FixedRng::new());

    let view = store.make_move(id, &Move::draw("a")).unwrap();

    assert_eq!(view.status, GameStatus::Playing);
    assert_eq!(view.current_turn_player_id, pid("c"));
    assert!(!view.players[0].alive);
    assert_eq!(view.discard_pile[0].card_type(), CardType::ExplodingKitten);
}

#[test]
fn test_defuse_then_place_on_top() {
    let state = table(
        vec![vec![card(1, CardKind::Defuse), card(2, CardKind::Skip)], vec![], vec![]],
        vec![
            card(3, CardKind::ExplodingKitten),
            card(4, CardKind::Shuffle),
            card(5, CardKind::Favor),
        ],
    );
    let (store, id) = store_with(state, FixedRng::new());

    let view = store.make_move(id, &Move::draw("a")).unwrap();
    assert!(view.awaiting_defuse_placement);
    assert_eq!(view.current_turn_player_id, pid("a"));
    assert_eq!(view.draw_pile_count, 2);
    assert_eq!(view.discard_pile.len(), 1);
    assert_eq!(view.discard_pile[0].card_type(), CardType::Defuse);

    let hand = store.get_player_hand(id, &pid("a")).unwrap();
    assert_eq!(hand, vec![card(2, CardKind::Skip)]);

    // Nothing but the placement is accepted now
    let skip = store.make_move(id, &Move::play("a", CardId::new(2)));
    assert!(matches!(skip, Err(EngineError::InvalidState(_))));

    let view = store.make_move(id, &Move::defuse("a", 0)).unwrap();
    assert!(!view.awaiting_defuse_placement);
    assert_eq!(view.current_turn_player_id, pid("b"));
    assert_eq!(view.draw_pile_count, 3);

    let state = store.get_game(id).unwrap();
    assert_eq!(state.draw_pile.iter().next().map(|c| c.id), Some(CardId::new(3)));
}

#[test]
fn test_defuse_position_required() {
    let state = table(
        vec![vec![card(1, CardKind::Defuse)], vec![], vec![]],
        vec![card(2, CardKind::ExplodingKitten)],
    );
    let (store, id) = store_with(state, FixedRng::new());
    store.make_move(id, &Move::draw("a")).unwrap();

    let mut no_position = Move::defuse("a", 0);
    no_position.target_position = None;
    let result = store.make_move(id, &no_position);
    assert!(matches!(result, Err(EngineError::InvalidMove(_))));

    // Pile is empty; the only valid slot is 0
    let result = store.make_move(id, &Move::defuse("a", 1));
    assert!(matches!(result, Err(EngineError::InvalidMove(_))));
    store.make_move(id, &Move::defuse("a", 0)).unwrap();
}

/// 1 -> 2 -> 2 + 2 = 4 pending turns across chained attacks.
#[test]
fn test_attack_stacking() {
    let state = table(
        vec![
            vec![card(1, CardKind::Attack)],
            vec![card(2, CardKind::Attack)],
            vec![],
        ],
        vec![card(3, CardKind::Skip), card(4, CardKind::Skip)],
    );
    let (store, id) = store_with(state, FixedRng::new());

    let view = store.make_move(id, &Move::play("a", CardId::new(1))).unwrap();
    assert_eq!(view.current_turn_player_id, pid("b"));
    assert_eq!(view.players[1].pending_turns, 2);
    assert_eq!(view.players[0].pending_turns, 1);

    let view = store.make_move(id, &Move::play("b", CardId::new(2))).unwrap();
    assert_eq!(view.current_turn_player_id, pid("c"));
    assert_eq!(view.players[2].pending_turns, 4);
    assert_eq!(view.players[1].pending_turns, 1);
}

#[test]
fn test_attacked_player_takes_two_turns() {
    let state = table(
        vec![vec![card(1, CardKind::Attack)], vec![], vec![]],
        vec![card(2, CardKind::Skip), card(3, CardKind::Skip), card(4, CardKind::Skip)],
    );
    let (store, id) = store_with(state, FixedRng::new());
    store.make_move(id, &Move::play("a", CardId::new(1))).unwrap();

    let view = store.make_move(id, &Move::draw("b")).unwrap();
    assert_eq!(view.current_turn_player_id, pid("b"));
    assert_eq!(view.players[1].pending_turns, 1);

    let view = store.make_move(id, &Move::draw("b")).unwrap();
    assert_eq!(view.current_turn_player_id, pid("c"));
}

#[test]
fn test_favor_steals_one_card() {
    let state = table(
        vec![
            vec![card(1, CardKind::Favor)],
            vec![card(2, CardKind::Skip), card(3, CardKind::Nope)],
            vec![],
        ],
        vec![],
    );
    let (store, id) = store_with(state, FixedRng::with_indices([1]));

    let view = store
        .make_move(id, &Move::play("a", CardId::new(1)).with_target("b"))
        .unwrap();

    assert_eq!(view.current_turn_player_id, pid("a"));
    assert_eq!(view.players[1].card_count, 1);
    let hand = store.get_player_hand(id, &pid("a")).unwrap();
    assert_eq!(hand, vec![card(3, CardKind::Nope)]);
}

#[test]
fn test_favor_target_errors() {
    let state = table(
        vec![vec![card(1, CardKind::Favor)], vec![], vec![card(2, CardKind::Skip)]],
        vec![],
    );
    let (store, id) = store_with(state, FixedRng::new());
    let before = store.get_game(id).unwrap();

    for mv in [
        Move::play("a", CardId::new(1)),
        Move::play("a", CardId::new(1)).with_target("b"),
        Move::play("a", CardId::new(1)).with_target("a"),
        Move::play("a", CardId::new(1)).with_target("zed"),
        Move::play("a", CardId::new(99)).with_target("c"),
    ] {
        let result = store.make_move(id, &mv);
        assert!(matches!(result, Err(EngineError::InvalidMove(_))), "{mv:?}");
    }
    assert_eq!(store.get_game(id).unwrap(), before);
}

#[test]
fn test_cat_pair_steals_only_on_match() {
    let taco = CardKind::Cat {
        cat_type: kitten_engine::CatType::Taco,
    };
    let melon = CardKind::Cat {
        cat_type: kitten_engine::CatType::Melon,
    };
    let state = table(
        vec![
            vec![card(1, taco), card(2, melon), card(3, taco)],
            vec![card(4, CardKind::Skip)],
            vec![],
        ],
        vec![],
    );
    let (store, id) = store_with(state, FixedRng::new());

    store
        .make_move(id, &Move::play("a", CardId::new(1)).with_target("b"))
        .unwrap();
    let view = store
        .make_move(id, &Move::play("a", CardId::new(2)).with_target("b"))
        .unwrap();
    assert_eq!(view.players[1].card_count, 1);

    // Melon on top: a taco does not pair with it
    let view = store
        .make_move(id, &Move::play("a", CardId::new(3)).with_target("b"))
        .unwrap();
    assert_eq!(view.players[1].card_count, 1);
    assert!(store.get_player_hand(id, &pid("a")).unwrap().is_empty());
}

#[test]
fn test_see_the_future_reveal() {
    let state = table(
        vec![vec![card(1, CardKind::SeeTheFuture)], vec![], vec![]],
        vec![
            card(2, CardKind::Skip),
            card(3, CardKind::ExplodingKitten),
            card(4, CardKind::Favor),
            card(5, CardKind::Nope),
        ],
    );
    let (store, id) = store_with(state, FixedRng::new());

    let outcome = store
        .make_move_with_outcome(id, &Move::play("a", CardId::new(1)))
        .unwrap();
    let reveal: Vec<_> = outcome
        .events
        .iter()
        .filter(|o| o.event.name() == "seeTheFutureResult")
        .collect();
    assert_eq!(reveal.len(), 1);

    let seen = store.see_the_future(id, &pid("a")).unwrap().unwrap();
    assert_eq!(
        seen.iter().map(|c| c.id.raw()).collect::<Vec<_>>(),
        vec![2, 3, 4]
    );
    assert_eq!(store.see_the_future(id, &pid("b")).unwrap(), None);

    let mine = store.get_game_state_for_player(id, &pid("a")).unwrap();
    let theirs = store.get_game_state_for_player(id, &pid("b")).unwrap();
    assert_eq!(mine.revealed_top_cards.map(|c| c.len()), Some(3));
    assert_eq!(theirs.revealed_top_cards, None);

    // The next move clears the reveal
    store.make_move(id, &Move::draw("a")).unwrap();
    assert_eq!(store.see_the_future(id, &pid("a")).unwrap(), None);
}

#[test]
fn test_draw_from_empty_pile_rejected() {
    let state = table(vec![vec![], vec![], vec![]], vec![]);
    let (store, id) = store_with(state, FixedRng::new());

    let result = store.make_move(id, &Move::draw("a"));
    assert!(matches!(result, Err(EngineError::InvalidMove(_))));
}

#[test]
fn test_unknown_game_and_player() {
    let (store, id) = started_game(3);

    let missing = store.make_move(kitten_engine::GameId::new(), &Move::draw("a"));
    assert!(matches!(missing, Err(EngineError::NotFound(_))));

    let stranger = store.make_move(id, &Move::draw("zed"));
    assert!(matches!(stranger, Err(EngineError::NotFound(_))));
}

#[test]
fn test_legal_moves_follow_state() {
    let state = table(
        vec![vec![card(1, CardKind::Defuse)], vec![], vec![]],
        vec![card(2, CardKind::ExplodingKitten)],
    );
    let (store, id) = store_with(state, FixedRng::new());

    assert_eq!(store.legal_moves(id, &pid("a")).unwrap(), vec![MoveKind::DrawCard]);
    assert!(store.legal_moves(id, &pid("b")).unwrap().is_empty());

    store.make_move(id, &Move::draw("a")).unwrap();
    assert_eq!(
        store.legal_moves(id, &pid("a")).unwrap(),
        vec![MoveKind::DefuseKitten]
    );
}
