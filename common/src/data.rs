use std::fmt;

use itertools::Itertools as _;
use serde::{Deserialize, Deserializer, Serialize};

use crate::moves::{AllowedMoves, CardZone};
use crate::{Card, Face};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(pub i64);

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// A special rule value: a single rank, a list of ranks, or free text the
/// server stored verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum RuleValue {
    One(Face),
    Many(Vec<Face>),
    Text(String),
}

impl RuleValue {
    pub fn faces(&self) -> &[Face] {
        match self {
            RuleValue::One(face) => std::slice::from_ref(face),
            RuleValue::Many(faces) => faces,
            RuleValue::Text(_) => &[],
        }
    }
}

impl fmt::Display for RuleValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuleValue::Text(text) => f.write_str(text),
            value => {
                let names = value.faces().iter().map(Face::name).join(", ");
                f.write_str(&names)
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GameState {
    pub game_id: i64,
    pub this_player_id: PlayerId,
    pub number_of_players: usize,
    /// Head is the next player to act.
    #[serde(default)]
    pub play_order: Vec<PlayerId>,

    #[serde(default)]
    pub burn_card: Option<RuleValue>,
    #[serde(default)]
    pub less_than_card: Option<RuleValue>,
    #[serde(default)]
    pub reset_card: Option<RuleValue>,
    #[serde(default)]
    pub transparent_card: Option<RuleValue>,
    #[serde(default)]
    pub play_on_anything_cards: Option<RuleValue>,

    #[serde(default)]
    pub pile_deck_size: Option<usize>,
    #[serde(default)]
    pub pile_burn_size: Option<usize>,
    #[serde(default)]
    pub pile_played_size: Option<usize>,
    /// Most recently played card last.
    #[serde(default)]
    pub play_list: Option<Vec<Card>>,
}

impl GameState {
    pub fn next_player(&self) -> Option<PlayerId> {
        self.play_order.first().copied()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PlayerState {
    pub player_id: PlayerId,
    #[serde(default)]
    pub face_down_cards: Option<Vec<Card>>,
    #[serde(default)]
    pub face_up_cards: Option<Vec<Card>>,
    #[serde(default)]
    pub hand_cards: Option<Vec<Card>>,
    #[serde(default)]
    pub number_face_down: Option<usize>,
    #[serde(default)]
    pub number_face_up: Option<usize>,
    #[serde(default)]
    pub number_in_hand: Option<usize>,
}

impl PlayerState {
    pub fn cards(&self, zone: CardZone) -> Option<&[Card]> {
        match zone {
            CardZone::FaceDown => self.face_down_cards.as_deref(),
            CardZone::FaceUp => self.face_up_cards.as_deref(),
            CardZone::Hand => self.hand_cards.as_deref(),
        }
    }

    pub fn count(&self, zone: CardZone) -> Option<usize> {
        match zone {
            CardZone::FaceDown => self.number_face_down,
            CardZone::FaceUp => self.number_face_up,
            CardZone::Hand => self.number_in_hand,
        }
    }
}

/// One complete server response to a state query.
///
/// Snapshots are never patched; each poll replaces the previous one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    pub active: bool,
    pub state: Option<GameState>,
    pub players_state: Vec<PlayerState>,
    pub allowed_moves: Option<AllowedMoves>,
    pub checksum: Option<String>,
}

impl Snapshot {
    pub fn inactive() -> Self {
        Self {
            active: false,
            state: None,
            players_state: Vec::new(),
            allowed_moves: None,
            checksum: None,
        }
    }

    /// The state of an active game.
    pub fn game(&self) -> Option<&GameState> {
        self.state.as_ref().filter(|_| self.active)
    }

    pub fn player(&self, id: PlayerId) -> Option<&PlayerState> {
        self.players_state.iter().find(|p| p.player_id == id)
    }

    /// The player this snapshot was computed for.
    pub fn local_player(&self) -> Option<&PlayerState> {
        self.game().and_then(|state| self.player(state.this_player_id))
    }

    pub fn is_terminal(&self) -> bool {
        self.allowed_moves
            .as_ref()
            .is_some_and(AllowedMoves::is_terminal)
    }
}

mod wire {
    use serde::Deserialize;

    use super::{GameState, PlayerState};
    use crate::moves::{self, AllowedMoves};

    #[derive(Deserialize)]
    pub struct Game {
        #[serde(rename = "active-game")]
        pub active: bool,
        #[serde(default)]
        pub state: Option<GameState>,
    }

    /// The server either nests the game under `game`, or sends a bare
    /// `{"active-game": false}` when there is no game at all.
    #[derive(Deserialize)]
    pub struct Snapshot {
        #[serde(default)]
        pub game: Option<Game>,
        #[serde(default, rename = "active-game")]
        pub active: Option<bool>,
        #[serde(default)]
        pub players_state: Vec<PlayerState>,
        #[serde(default, deserialize_with = "moves::deserialize_optional")]
        pub allowed_moves: Option<AllowedMoves>,
        #[serde(default)]
        pub checksum: Option<String>,
    }
}

impl<'de> Deserialize<'de> for Snapshot {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let wire = wire::Snapshot::deserialize(deserializer)?;

        let game = match (wire.game, wire.active) {
            (Some(game), _) => game,
            (None, Some(active)) => wire::Game {
                active,
                state: None,
            },
            (None, None) => return Err(serde::de::Error::missing_field("game")),
        };

        if game.active && game.state.is_none() {
            return Err(serde::de::Error::custom("active game without state"));
        }

        Ok(Snapshot {
            active: game.active,
            state: game.state,
            players_state: wire.players_state,
            allowed_moves: wire.allowed_moves,
            checksum: wire.checksum,
        })
    }
}
