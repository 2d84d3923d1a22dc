//! Projection of a [`Snapshot`] into plain view data.
//!
//! Nothing here touches a terminal or the network: [`build`] is a pure
//! function, so every decision about what the user sees and may select can
//! be tested on its own.

mod actions;
mod piles;
mod select;

use common::data::{PlayerId, PlayerState, Snapshot};
use common::moves::CardZone;
use common::selection::CardSelection;
use common::Card;
use tracing::warn;

pub use actions::{action_panel, ActionPanel, Button};
pub use piles::{PlayedCard, PlayedPile, Piles, Rule};
pub use select::is_selectable;

/// Text shown while waiting on others to swap.
pub const WAITING_FOR_PLAYERS: &str = "waiting for other players";

/// Everything the user can see after one render pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewModel {
    NoActiveGame,
    Game(GameView),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameView {
    pub summary: String,
    pub players: Vec<PlayerPanel>,
    /// Missing when the local player is not among the players.
    pub my_counts: Option<ZoneCounts>,
    pub piles: Piles,
    pub rules: Vec<Rule>,
    pub actions: ActionPanel,
    pub keep_polling: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerPanel {
    pub player_id: PlayerId,
    pub is_local: bool,
    /// Head of the play order.
    pub is_next: bool,
    pub zones: Vec<ZonePanel>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZonePanel {
    pub zone: CardZone,
    pub display: ZoneDisplay,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ZoneDisplay {
    Static(Vec<Card>),
    Selector(Vec<SelectOption>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectOption {
    pub value: CardSelection,
    pub card: Card,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ZoneCounts {
    pub face_down: usize,
    pub face_up: usize,
    pub in_hand: usize,
}

impl ViewModel {
    /// Polling stops once the game is over for the local player.
    pub fn keep_polling(&self) -> bool {
        match self {
            ViewModel::NoActiveGame => true,
            ViewModel::Game(game) => game.keep_polling,
        }
    }

    pub fn actions(&self) -> Option<&ActionPanel> {
        match self {
            ViewModel::NoActiveGame => None,
            ViewModel::Game(game) => Some(&game.actions),
        }
    }

    pub fn offers(&self, button: Button) -> bool {
        self.actions()
            .is_some_and(|panel| panel.buttons.contains(&button))
    }

    /// Every option offered by a selector in this view.
    pub fn selectable(&self) -> Vec<SelectOption> {
        let ViewModel::Game(game) = self else {
            return Vec::new();
        };

        game.players
            .iter()
            .flat_map(|p| &p.zones)
            .filter_map(|z| match &z.display {
                ZoneDisplay::Selector(options) => Some(options.iter().copied()),
                ZoneDisplay::Static(_) => None,
            })
            .flatten()
            .collect()
    }
}

impl ZoneDisplay {
    pub fn cards(&self) -> Vec<Card> {
        match self {
            ZoneDisplay::Static(cards) => cards.clone(),
            ZoneDisplay::Selector(options) => options.iter().map(|o| o.card).collect(),
        }
    }

    pub fn is_selector(&self) -> bool {
        matches!(self, ZoneDisplay::Selector(_))
    }
}

/// Builds the whole view from one snapshot.
pub fn build(snapshot: &Snapshot) -> ViewModel {
    let Some(state) = snapshot.game() else {
        return ViewModel::NoActiveGame;
    };

    let local = state.this_player_id;
    let next = state.next_player();
    let moves = snapshot.allowed_moves.as_ref();

    let local_entries = snapshot
        .players_state
        .iter()
        .filter(|p| p.player_id == local)
        .count();
    // selection ids are only unique with exactly one local entry
    let local_known = local_entries == 1;

    let players = snapshot
        .players_state
        .iter()
        .map(|player| PlayerPanel {
            player_id: player.player_id,
            is_local: player.player_id == local,
            is_next: next == Some(player.player_id),
            zones: CardZone::ALL
                .into_iter()
                .map(|zone| {
                    let selectable =
                        local_known && is_selectable(moves, local, player.player_id, zone);
                    ZonePanel {
                        zone,
                        display: zone_display(player, zone, selectable),
                    }
                })
                .collect(),
        })
        .collect();

    let my_counts = match (local_entries, snapshot.player(local)) {
        (1, Some(me)) => Some(ZoneCounts {
            face_down: me.count(CardZone::FaceDown).unwrap_or_default(),
            face_up: me.count(CardZone::FaceUp).unwrap_or_default(),
            in_hand: me.count(CardZone::Hand).unwrap_or_default(),
        }),
        (0, _) => {
            warn!(player = %local, "local player missing from players state");
            None
        }
        (entries, _) => {
            warn!(player = %local, entries, "local player listed more than once");
            None
        }
    };

    ViewModel::Game(GameView {
        summary: format!(
            "You are player {local}. There are {} players in this game.",
            state.number_of_players
        ),
        players,
        my_counts,
        piles: Piles::from_state(state),
        rules: piles::rules(state),
        actions: action_panel(moves, local),
        keep_polling: !snapshot.is_terminal(),
    })
}

/// Most backs drawn for one zone; a whole deck.
const MAX_BACKS: usize = 52;

/// Cards of one zone, with backs standing in for cards only known by count.
fn zone_cards(player: &PlayerState, zone: CardZone) -> Vec<Card> {
    match (player.cards(zone), player.count(zone)) {
        (Some(cards), _) => cards.to_vec(),
        (None, Some(count)) => {
            if count > MAX_BACKS {
                warn!(player = %player.player_id, %zone, count, "card count too large, capping backs");
            }
            vec![Card::BACK; count.min(MAX_BACKS)]
        }
        (None, None) => Vec::new(),
    }
}

fn zone_display(player: &PlayerState, zone: CardZone, selectable: bool) -> ZoneDisplay {
    let cards = zone_cards(player, zone);

    if !selectable {
        return ZoneDisplay::Static(cards);
    }

    let options = cards
        .into_iter()
        .enumerate()
        .map(|(index, card)| SelectOption {
            value: CardSelection::new(zone, index),
            card,
        })
        .collect();

    ZoneDisplay::Selector(options)
}
