use common::data::{GameState, RuleValue};
use common::Card;

/// How many of the most recent played cards are shown.
const PLAYED_SHOWN: usize = 4;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Piles {
    pub deck: usize,
    pub burn: usize,
    pub played: PlayedPile,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlayedPile {
    /// Only the size is known.
    Closed { count: usize },
    /// Most recent card first.
    Open { count: usize, top: Vec<PlayedCard> },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayedCard {
    /// Position in the server's play list.
    pub index: usize,
    /// 0 for the most recent card, then -1, -2, ...
    pub offset: isize,
    pub card: Card,
}

impl Piles {
    pub(crate) fn from_state(state: &GameState) -> Self {
        Self {
            deck: state.pile_deck_size.unwrap_or_default(),
            burn: state.pile_burn_size.unwrap_or_default(),
            played: played_pile(state),
        }
    }
}

fn played_pile(state: &GameState) -> PlayedPile {
    let (Some(list), Some(count)) = (&state.play_list, state.pile_played_size) else {
        return PlayedPile::Closed {
            count: state.pile_played_size.unwrap_or_default(),
        };
    };

    let top = list
        .iter()
        .enumerate()
        .rev()
        .take(PLAYED_SHOWN)
        .zip(0isize..)
        .map(|((index, &card), n)| PlayedCard {
            index,
            offset: -n,
            card,
        })
        .collect();

    PlayedPile::Open { count, top }
}

/// A special card callout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    pub name: &'static str,
    pub value: String,
}

pub(crate) fn rules(state: &GameState) -> Vec<Rule> {
    fn rule(name: &'static str, value: &Option<RuleValue>) -> Rule {
        Rule {
            name,
            value: value
                .as_ref()
                .map_or_else(|| "none".to_owned(), ToString::to_string),
        }
    }

    vec![
        rule("Burn card", &state.burn_card),
        rule("Less than card", &state.less_than_card),
        rule("Reset card", &state.reset_card),
        rule("Transparent card", &state.transparent_card),
        rule("Cards you can play on anything", &state.play_on_anything_cards),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::data::PlayerId;
    use common::{Face, Suit};

    fn state() -> GameState {
        GameState {
            game_id: 1,
            this_player_id: PlayerId(1),
            number_of_players: 2,
            play_order: vec![PlayerId(1), PlayerId(2)],
            burn_card: Some(RuleValue::One(Face::Ten)),
            less_than_card: Some(RuleValue::One(Face::Seven)),
            reset_card: None,
            transparent_card: None,
            play_on_anything_cards: Some(RuleValue::Many(vec![Face::Two, Face::Ten])),
            pile_deck_size: Some(12),
            pile_burn_size: None,
            pile_played_size: None,
            play_list: None,
        }
    }

    fn ranks(n: u8) -> Vec<Card> {
        (2..2 + n)
            .map(|r| Card::new(Suit::Spades, Face::from_number(r).unwrap()))
            .collect()
    }

    #[test]
    fn last_four_most_recent_first() {
        let mut state = state();
        state.play_list = Some(ranks(10));
        state.pile_played_size = Some(10);

        let PlayedPile::Open { count, top } = Piles::from_state(&state).played else {
            panic!("pile should be open");
        };

        assert_eq!(count, 10);
        assert_eq!(top.iter().map(|c| c.index).collect::<Vec<_>>(), [9, 8, 7, 6]);
        assert_eq!(top.iter().map(|c| c.offset).collect::<Vec<_>>(), [0, -1, -2, -3]);
        assert_eq!(top[0].card, Card::new(Suit::Spades, Face::Jack));
    }

    #[test]
    fn short_play_list() {
        let mut state = state();
        state.play_list = Some(ranks(2));
        state.pile_played_size = Some(2);

        let PlayedPile::Open { top, .. } = Piles::from_state(&state).played else {
            panic!("pile should be open");
        };
        assert_eq!(top.iter().map(|c| c.offset).collect::<Vec<_>>(), [0, -1]);
    }

    #[test]
    fn closed_without_list_or_size() {
        let mut state = state();
        state.pile_played_size = Some(5);
        assert_eq!(Piles::from_state(&state).played, PlayedPile::Closed { count: 5 });

        state.pile_played_size = None;
        state.play_list = Some(ranks(3));
        assert_eq!(Piles::from_state(&state).played, PlayedPile::Closed { count: 0 });
    }

    #[test]
    fn pile_counts() {
        let piles = Piles::from_state(&state());
        assert_eq!(piles.deck, 12);
        assert_eq!(piles.burn, 0);
    }

    #[test]
    fn rule_callouts() {
        let rules = rules(&state());
        let values = rules.iter().map(|r| r.value.as_str()).collect::<Vec<_>>();
        assert_eq!(values, ["ten", "seven", "none", "none", "two, ten"]);
        assert_eq!(rules[4].name, "Cards you can play on anything");
    }
}
