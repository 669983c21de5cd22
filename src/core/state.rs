//! Game state: the single trusted copy of one game.
//!
//! ## GameState
//!
//! Complete game state including private information:
//! - Seats in turn order, each with a private hand
//! - Draw pile (front = next draw) and discard pile (back = latest play)
//! - Turn owner, direction, status and the defuse sub-state
//! - Last action (NOPE target) and its restore point
//! - Transient See the Future reveal
//!
//! Views for clients are derived from this by `crate::view`.
//!
//! Players and piles use `im` persistent structures, so the NOPE restore
//! point is an O(1) copy of the table.

use im::Vector;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use uuid::Uuid;

use super::action::GameAction;
use super::player::{NewPlayer, Player, PlayerId};
use crate::cards::{Card, CardMint, CardType, Deal};
use crate::zones::Pile;

/// Game identifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GameId(pub Uuid);

impl GameId {
    /// A fresh random id.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse an id received from a client.
    pub fn parse(s: &str) -> Option<Self> {
        Uuid::parse_str(s).ok().map(Self)
    }
}

impl Default for GameId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for GameId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// Game lifecycle. Only ever moves forward.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameStatus {
    /// Waiting for enough players
    #[default]
    Waiting,
    /// Cards dealt, moves accepted
    Playing,
    /// One player left alive
    Finished,
}

impl GameStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Waiting => "waiting",
            Self::Playing => "playing",
            Self::Finished => "finished",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TurnDirection {
    #[default]
    Clockwise,
    Counterclockwise,
}

impl TurnDirection {
    /// Seat step in this direction.
    #[must_use]
    pub fn step(self) -> isize {
        match self {
            Self::Clockwise => 1,
            Self::Counterclockwise => -1,
        }
    }
}

/// Sub-state of a playing game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "phase", rename_all = "camelCase")]
pub enum TurnPhase {
    /// The current player may play cards or draw.
    #[default]
    Acting,
    /// A kitten was drawn and defused; it is held here until the player
    /// chooses where it goes back into the draw pile.
    AwaitingDefusePlacement { kitten: Card },
}

/// Cards shown to one player by See the Future.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevealedCards {
    pub viewer: PlayerId,
    pub cards: SmallVec<[Card; 3]>,
}

/// Table state right after a noppable card hit the discard pile,
/// before its effect.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct NopeSnapshot {
    pub players: Vector<Player>,
    pub draw_pile: Pile,
    pub discard_pile: Pile,
    pub current_turn: PlayerId,
}

/// Full game state including private information.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameState {
    pub id: GameId,

    /// Seats in turn order.
    pub players: Vector<Player>,

    pub draw_pile: Pile,

    pub discard_pile: Pile,

    /// Whose turn it is. Alive while playing.
    pub current_turn: PlayerId,

    pub direction: TurnDirection,

    pub status: GameStatus,

    pub phase: TurnPhase,

    pub last_action: Option<GameAction>,

    pub revealed: Option<RevealedCards>,

    pub winner: Option<PlayerId>,

    pub mint: CardMint,

    #[serde(skip)]
    pub(crate) nope_snapshot: Option<Box<NopeSnapshot>>,
}

impl GameState {
    /// Create a waiting game with the creator as the only player.
    #[must_use]
    pub fn new(id: GameId, creator: NewPlayer) -> Self {
        let current_turn = creator.id.clone();
        Self {
            id,
            players: Vector::unit(Player::new(creator)),
            draw_pile: Pile::new(),
            discard_pile: Pile::new(),
            current_turn,
            direction: TurnDirection::default(),
            status: GameStatus::Waiting,
            phase: TurnPhase::Acting,
            last_action: None,
            revealed: None,
            winner: None,
            mint: CardMint::new(),
            nope_snapshot: None,
        }
    }

    /// Get player count.
    #[must_use]
    pub fn player_count(&self) -> usize {
        self.players.len()
    }

    // === Players ===

    #[must_use]
    pub fn player_index(&self, id: &PlayerId) -> Option<usize> {
        self.players.iter().position(|p| &p.id == id)
    }

    #[must_use]
    pub fn player(&self, id: &PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| &p.id == id)
    }

    pub fn player_mut(&mut self, id: &PlayerId) -> Option<&mut Player> {
        let idx = self.player_index(id)?;
        self.players.get_mut(idx)
    }

    /// The player whose turn it is.
    #[must_use]
    pub fn current_player(&self) -> Option<&Player> {
        self.player(&self.current_turn)
    }

    pub fn alive_players(&self) -> impl Iterator<Item = &Player> {
        self.players.iter().filter(|p| p.alive)
    }

    #[must_use]
    pub fn alive_count(&self) -> usize {
        self.alive_players().count()
    }

    /// The winning player, once the game is finished.
    #[must_use]
    pub fn winner_player(&self) -> Option<&Player> {
        self.winner.as_ref().and_then(|id| self.player(id))
    }

    /// Add a seat to a waiting game.
    pub fn seat(&mut self, player: NewPlayer) {
        self.players.push_back(Player::new(player));
    }

    // === Lifecycle ===

    /// Install a deal and start play with the first seat.
    pub fn start(&mut self, deal: Deal) {
        for (player, hand) in self.players.iter_mut().zip(deal.hands) {
            player.hand = hand.into_iter().collect();
            player.alive = true;
            player.pending_turns = 1;
        }
        self.draw_pile = Pile::from_cards(deal.draw_pile);
        self.discard_pile = Pile::new();
        if let Some(first) = self.players.front() {
            self.current_turn = first.id.clone();
        }
        self.phase = TurnPhase::Acting;
        self.status = GameStatus::Playing;
    }

    #[must_use]
    pub fn is_awaiting_defuse(&self) -> bool {
        matches!(self.phase, TurnPhase::AwaitingDefusePlacement { .. })
    }

    // === Card accounting ===

    /// Cards generated for this game.
    #[must_use]
    pub fn total_cards(&self) -> usize {
        self.mint.issued()
    }

    /// Every card currently in play: piles, hands and a withheld kitten.
    pub fn all_cards(&self) -> impl Iterator<Item = &Card> {
        let withheld = match &self.phase {
            TurnPhase::AwaitingDefusePlacement { kitten } => Some(kitten),
            TurnPhase::Acting => None,
        };
        self.draw_pile
            .iter()
            .chain(self.discard_pile.iter())
            .chain(self.players.iter().flat_map(|p| p.hand.iter()))
            .chain(withheld)
    }

    /// Count of cards in play by type.
    #[must_use]
    pub fn card_census(&self) -> FxHashMap<CardType, usize> {
        let mut census = FxHashMap::default();
        for card in self.all_cards() {
            *census.entry(card.card_type()).or_insert(0) += 1;
        }
        census
    }

    // === NOPE restore point ===

    pub(crate) fn take_snapshot(&self) -> NopeSnapshot {
        NopeSnapshot {
            players: self.players.clone(),
            draw_pile: self.draw_pile.clone(),
            discard_pile: self.discard_pile.clone(),
            current_turn: self.current_turn.clone(),
        }
    }

    pub(crate) fn restore_snapshot(&mut self, snapshot: NopeSnapshot) {
        self.players = snapshot.players;
        self.draw_pile = snapshot.draw_pile;
        self.discard_pile = snapshot.discard_pile;
        self.current_turn = snapshot.current_turn;
    }

    /// Can the last action still be noped?
    #[must_use]
    pub fn has_nope_target(&self) -> bool {
        self.nope_snapshot.is_some()
    }
}
