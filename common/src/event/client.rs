use std::str::FromStr;

use itertools::Itertools as _;
use serde::{Deserialize, Serialize};

use crate::selection::{self, CardSelection};

/// Body of the cheap state fingerprint request.
pub const CHECKSUM_REQUEST: &str = "get_checksum";

/// An action submitted on behalf of the local player.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum ActionRequest {
    /// Play the selected cards onto the played pile.
    Play { action_cards: Vec<CardSelection> },
    /// Swap the selected hand and face up cards before play starts.
    Swap { action_cards: Vec<CardSelection> },
    /// Ready to play without swapping.
    NoSwap,
    /// Pick up the played pile.
    Pick,
}

impl ActionRequest {
    pub fn play<'a>(selected: impl IntoIterator<Item = &'a str>) -> Result<Self, selection::ParseError> {
        Ok(ActionRequest::Play {
            action_cards: parse_selected(selected)?,
        })
    }

    pub fn swap<'a>(selected: impl IntoIterator<Item = &'a str>) -> Result<Self, selection::ParseError> {
        Ok(ActionRequest::Swap {
            action_cards: parse_selected(selected)?,
        })
    }

    pub fn cards(&self) -> &[CardSelection] {
        match self {
            ActionRequest::Play { action_cards } | ActionRequest::Swap { action_cards } => {
                action_cards
            }
            ActionRequest::NoSwap | ActionRequest::Pick => &[],
        }
    }

    pub const fn name(&self) -> &'static str {
        match self {
            ActionRequest::Play { .. } => "play",
            ActionRequest::Swap { .. } => "swap",
            ActionRequest::NoSwap => "no_swap",
            ActionRequest::Pick => "pick",
        }
    }
}

/// Parses selector values, keeping the first occurrence of each.
fn parse_selected<'a>(
    selected: impl IntoIterator<Item = &'a str>,
) -> Result<Vec<CardSelection>, selection::ParseError> {
    selected
        .into_iter()
        .map(CardSelection::from_str)
        .process_results(|iter| iter.unique().collect())
}

/// One field of the new game form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormField {
    pub name: String,
    pub value: String,
}

impl FromStr for FormField {
    type Err = String;

    /// Parses `name=value`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once('=') {
            Some((name, value)) if !name.is_empty() => Ok(FormField {
                name: name.to_owned(),
                value: value.to_owned(),
            }),
            _ => Err(format!("expected `name=value`, got `{s}`")),
        }
    }
}

/// The new game form, serialized as a list of name/value pairs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NewGameRequest {
    pub fields: Vec<FormField>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::moves::CardZone;
    use proptest::prelude::*;
    use serde_json::json;

    #[test]
    fn action_json() {
        let play = ActionRequest::play(["h-0", "h-2"]).unwrap();
        assert_eq!(
            serde_json::to_value(&play).unwrap(),
            json!({ "action": "play", "action_cards": ["h-0", "h-2"] })
        );

        assert_eq!(
            serde_json::to_value(ActionRequest::NoSwap).unwrap(),
            json!({ "action": "no_swap" })
        );
        assert_eq!(
            serde_json::to_value(ActionRequest::Pick).unwrap(),
            json!({ "action": "pick" })
        );
    }

    #[test]
    fn duplicates_are_dropped() {
        let swap = ActionRequest::swap(["f-1", "h-0", "f-1"]).unwrap();
        assert_eq!(
            swap.cards(),
            &[
                CardSelection::new(CardZone::FaceUp, 1),
                CardSelection::new(CardZone::Hand, 0)
            ]
        );
    }

    #[test]
    fn bad_selection_fails_whole_request() {
        assert!(ActionRequest::play(["h-0", "nope"]).is_err());
    }

    #[test]
    fn form_fields() {
        let field: FormField = "numberOfPlayers=3".parse().unwrap();
        assert_eq!(field.name, "numberOfPlayers");
        assert_eq!(field.value, "3");

        assert!("=3".parse::<FormField>().is_err());
        assert!("players".parse::<FormField>().is_err());

        let request = NewGameRequest { fields: vec![field] };
        assert_eq!(
            serde_json::to_value(request).unwrap(),
            json!([{ "name": "numberOfPlayers", "value": "3" }])
        );
    }

    fn selection() -> impl Strategy<Value = CardSelection> {
        (prop::sample::select(CardZone::ALL.to_vec()), 0usize..64)
            .prop_map(|(zone, index)| CardSelection::new(zone, index))
    }

    proptest! {
        /// Selector values survive the trip through a request and back unchanged.
        #[test]
        fn selected_values_round_trip(picked in prop::collection::btree_set(selection(), 0..12)) {
            let values = picked.iter().map(ToString::to_string).collect::<Vec<_>>();
            let request = ActionRequest::play(values.iter().map(String::as_str)).unwrap();

            let json = serde_json::to_string(&request).unwrap();
            let parsed: ActionRequest = serde_json::from_str(&json).unwrap();

            let recovered = parsed.cards().iter().copied().collect::<Vec<_>>();
            let expected = picked.into_iter().collect::<Vec<_>>();
            prop_assert_eq!(recovered, expected);
        }
    }
}
