use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

use crate::data::PlayerId;

/// A named group of one player's cards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CardZone {
    FaceDown,
    FaceUp,
    Hand,
}

impl CardZone {
    /// All zones, in the order they are laid out.
    pub const ALL: [CardZone; 3] = [CardZone::FaceDown, CardZone::FaceUp, CardZone::Hand];

    /// Single letter used in card selection identifiers.
    pub const fn code(&self) -> char {
        match self {
            CardZone::FaceDown => 'd',
            CardZone::FaceUp => 'f',
            CardZone::Hand => 'h',
        }
    }

    pub const fn from_code(code: char) -> Option<Self> {
        match code {
            'd' => Some(CardZone::FaceDown),
            'f' => Some(CardZone::FaceUp),
            'h' => Some(CardZone::Hand),
            _ => None,
        }
    }

    /// Wire name, as in `allowed_cards`.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "face_down" => Some(CardZone::FaceDown),
            "face_up" => Some(CardZone::FaceUp),
            "hand" => Some(CardZone::Hand),
            _ => None,
        }
    }

    pub const fn title(&self) -> &'static str {
        match self {
            CardZone::FaceDown => "face down",
            CardZone::FaceUp => "face up",
            CardZone::Hand => "in hand",
        }
    }

    /// Face down cards can never be swapped.
    pub const fn is_swappable(&self) -> bool {
        matches!(self, CardZone::FaceUp | CardZone::Hand)
    }
}

impl fmt::Display for CardZone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

/// What the local player may do right now, as computed by the server.
///
/// Each variant only carries the fields the server fills in for that action.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "allowed_action", rename_all = "snake_case")]
pub enum AllowedMoves {
    Play {
        #[serde(default)]
        is_next_player: bool,
        /// A zone this client does not know reads as none, so nothing is selectable.
        #[serde(default, deserialize_with = "lenient_zone")]
        allowed_cards: Option<CardZone>,
        #[serde(default)]
        action_message: String,
    },
    Swap {
        #[serde(default)]
        allowed_players: Vec<PlayerId>,
        #[serde(default)]
        action_message: String,
    },
    Wait {
        #[serde(default)]
        action_message: String,
    },
    Pick {
        #[serde(default)]
        action_message: String,
    },
    Lost {
        #[serde(default)]
        action_message: String,
    },
    Finished {
        #[serde(default)]
        action_message: String,
    },
    /// An action this client does not know about.
    #[serde(other)]
    Unknown,
}

impl AllowedMoves {
    /// `lost` and `finished` end the game for this player.
    pub const fn is_terminal(&self) -> bool {
        matches!(self, AllowedMoves::Lost { .. } | AllowedMoves::Finished { .. })
    }

    pub fn action_message(&self) -> Option<&str> {
        match self {
            AllowedMoves::Play { action_message, .. }
            | AllowedMoves::Swap { action_message, .. }
            | AllowedMoves::Wait { action_message }
            | AllowedMoves::Pick { action_message }
            | AllowedMoves::Lost { action_message }
            | AllowedMoves::Finished { action_message } => Some(action_message),
            AllowedMoves::Unknown => None,
        }
    }

    /// The wire name of the action.
    pub const fn name(&self) -> &'static str {
        match self {
            AllowedMoves::Play { .. } => "play",
            AllowedMoves::Swap { .. } => "swap",
            AllowedMoves::Wait { .. } => "wait",
            AllowedMoves::Pick { .. } => "pick",
            AllowedMoves::Lost { .. } => "lost",
            AllowedMoves::Finished { .. } => "finished",
            AllowedMoves::Unknown => "unknown",
        }
    }
}

fn lenient_zone<'de, D>(deserializer: D) -> Result<Option<CardZone>, D::Error>
where
    D: Deserializer<'de>,
{
    let name = Option::<String>::deserialize(deserializer)?;

    Ok(name.as_deref().and_then(CardZone::from_name))
}

/// Reads `allowed_moves`, treating `null` and `{}` as no moves at all.
pub(crate) fn deserialize_optional<'de, D>(deserializer: D) -> Result<Option<AllowedMoves>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;

    match value {
        None | Some(serde_json::Value::Null) => Ok(None),
        Some(serde_json::Value::Object(map)) if map.is_empty() => Ok(None),
        Some(value) => AllowedMoves::deserialize(value)
            .map(Some)
            .map_err(serde::de::Error::custom),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse(value: serde_json::Value) -> AllowedMoves {
        serde_json::from_value(value).expect("valid allowed moves")
    }

    #[test]
    fn play_variant() {
        let moves = parse(json!({
            "allowed_action": "play",
            "is_next_player": true,
            "allowed_cards": "hand",
            "allowed_players": [1, 2],
            "action_message": "your go",
        }));

        assert_eq!(
            moves,
            AllowedMoves::Play {
                is_next_player: true,
                allowed_cards: Some(CardZone::Hand),
                action_message: "your go".to_owned(),
            }
        );
    }

    #[test]
    fn swap_variant() {
        let moves = parse(json!({
            "allowed_action": "swap",
            "allowed_players": [3, 7],
        }));

        assert_eq!(
            moves,
            AllowedMoves::Swap {
                allowed_players: vec![PlayerId(3), PlayerId(7)],
                action_message: String::new(),
            }
        );
    }

    #[test]
    fn unknown_zone_selects_nothing() {
        let moves = parse(json!({
            "allowed_action": "play",
            "is_next_player": true,
            "allowed_cards": "deck",
        }));

        assert_eq!(
            moves,
            AllowedMoves::Play {
                is_next_player: true,
                allowed_cards: None,
                action_message: String::new(),
            }
        );

        let moves = parse(json!({ "allowed_action": "play", "allowed_cards": null }));
        assert!(matches!(moves, AllowedMoves::Play { allowed_cards: None, .. }));
    }

    #[test]
    fn unknown_action_is_not_an_error() {
        let moves = parse(json!({ "allowed_action": "dance", "action_message": "?" }));
        assert_eq!(moves, AllowedMoves::Unknown);
        assert_eq!(moves.action_message(), None);
    }

    #[test]
    fn terminal_actions() {
        assert!(parse(json!({ "allowed_action": "lost" })).is_terminal());
        assert!(parse(json!({ "allowed_action": "finished" })).is_terminal());
        assert!(!parse(json!({ "allowed_action": "wait" })).is_terminal());
    }

    #[test]
    fn zone_codes() {
        for zone in CardZone::ALL {
            assert_eq!(CardZone::from_code(zone.code()), Some(zone));

            let name = serde_json::to_value(zone).unwrap();
            assert_eq!(CardZone::from_name(name.as_str().unwrap()), Some(zone));
        }
        assert_eq!(CardZone::from_code('x'), None);
        assert!(!CardZone::FaceDown.is_swappable());
    }
}
