//! Deck construction and dealing.
//!
//! ## Dealing order
//!
//! 1. Build the base deck from `DeckComposition` and shuffle it.
//! 2. Give every player one guaranteed Defuse out of the deck (minted only
//!    when the deck has run out of Defuses), plus any fixture cards.
//! 3. Fill each hand with uniformly random picks from what is left.
//! 4. Mint `n - 1` Exploding Kittens, add them to the remaining deck and
//!    reshuffle. Kittens therefore never appear in a starting hand.

use serde::{Deserialize, Serialize};

use super::card::{Card, CardId, CardKind, CardType, CatType};
use crate::core::config::{DeckComposition, EngineConfig};
use crate::core::rng::RandomSource;

/// Issues card ids for one game and counts the cards that exist.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardMint {
    next_id: u32,
    issued: usize,
}

impl CardMint {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new card. It counts toward the game's card total.
    pub fn mint(&mut self, kind: CardKind) -> Card {
        self.issued += 1;
        self.remint(kind)
    }

    /// Create a replacement card under a fresh id.
    ///
    /// The card it replaces leaves play, so the total is unchanged.
    pub fn remint(&mut self, kind: CardKind) -> Card {
        let card = Card::new(CardId::new(self.next_id), kind);
        self.next_id += 1;
        card
    }

    /// Cards in play created by this mint.
    #[must_use]
    pub fn issued(&self) -> usize {
        self.issued
    }
}

/// Default kind for a card type. Cats get the first sub-type.
#[must_use]
pub fn kind_for(card_type: CardType) -> CardKind {
    match card_type {
        CardType::ExplodingKitten => CardKind::ExplodingKitten,
        CardType::Defuse => CardKind::Defuse,
        CardType::Nope => CardKind::Nope,
        CardType::Attack => CardKind::Attack,
        CardType::Skip => CardKind::Skip,
        CardType::SeeTheFuture => CardKind::SeeTheFuture,
        CardType::Shuffle => CardKind::Shuffle,
        CardType::Favor => CardKind::Favor,
        CardType::Cat => CardKind::Cat {
            cat_type: CatType::Taco,
        },
    }
}

/// Build the unshuffled base deck (no kittens).
pub fn build_base_deck(composition: &DeckComposition, mint: &mut CardMint) -> Vec<Card> {
    let mut deck = Vec::with_capacity(composition.total().unwrap_or_default());
    let counts = [
        (CardKind::Defuse, composition.defuse),
        (CardKind::Nope, composition.nope),
        (CardKind::Attack, composition.attack),
        (CardKind::Skip, composition.skip),
        (CardKind::SeeTheFuture, composition.see_the_future),
        (CardKind::Shuffle, composition.shuffle),
        (CardKind::Favor, composition.favor),
    ];
    for (kind, count) in counts {
        deck.extend((0..count).map(|_| mint.mint(kind)));
    }
    for cat_type in CatType::ALL {
        let kind = CardKind::Cat { cat_type };
        deck.extend((0..composition.cats_per_type).map(|_| mint.mint(kind)));
    }
    deck
}

/// Result of dealing: one hand per seat and the draw pile (front = top).
#[derive(Clone, Debug)]
pub struct Deal {
    pub hands: Vec<Vec<Card>>,
    pub draw_pile: Vec<Card>,
}

/// Take the first card of a type out of the deck, minting one if none is left.
fn take_or_mint(deck: &mut Vec<Card>, card_type: CardType, mint: &mut CardMint) -> Card {
    match deck.iter().position(|c| c.is(card_type)) {
        Some(pos) => deck.remove(pos),
        None => mint.mint(kind_for(card_type)),
    }
}

/// Build, shuffle and deal a deck for `player_count` players.
pub fn deal(
    player_count: usize,
    config: &EngineConfig,
    mint: &mut CardMint,
    rng: &mut dyn RandomSource,
) -> Deal {
    let mut deck = build_base_deck(&config.deck, mint);
    rng.shuffle_cards(&mut deck);

    let forced: &[CardType] = config
        .deal_fixture
        .as_ref()
        .map_or(&[], |f| f.forced_cards.as_slice());

    // Guaranteed cards first so every seat gets its Defuse from the deck
    // before random picks can drain them.
    let mut hands: Vec<Vec<Card>> = (0..player_count)
        .map(|_| {
            let mut hand = Vec::with_capacity(1 + config.hand_size);
            hand.push(take_or_mint(&mut deck, CardType::Defuse, mint));
            hand
        })
        .collect();

    for hand in &mut hands {
        for &card_type in forced {
            hand.push(take_or_mint(&mut deck, card_type, mint));
        }
    }

    let random_picks = config.hand_size.saturating_sub(forced.len());
    for hand in &mut hands {
        for _ in 0..random_picks {
            if deck.is_empty() {
                break;
            }
            let idx = rng.next_index(deck.len());
            hand.push(deck.remove(idx));
        }
    }

    for _ in 1..player_count {
        deck.push(mint.mint(CardKind::ExplodingKitten));
    }
    rng.shuffle_cards(&mut deck);

    Deal {
        hands,
        draw_pile: deck,
    }
}
