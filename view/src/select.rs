use common::data::PlayerId;
use common::moves::{AllowedMoves, CardZone};

/// Whether `owner`'s `zone` is shown as a selector to the `local` player.
///
/// Only the local player's own zones are ever selectable:
/// - `play`: on their turn, and only the zone named by `allowed_cards`.
/// - `swap`: when they are one of `allowed_players`, for hand and face up cards.
///
/// This is the only thing stopping the user from picking cards they may not
/// play. The server still validates every submitted selection.
pub fn is_selectable(
    moves: Option<&AllowedMoves>,
    local: PlayerId,
    owner: PlayerId,
    zone: CardZone,
) -> bool {
    if owner != local {
        return false;
    }

    match moves {
        Some(AllowedMoves::Play {
            is_next_player,
            allowed_cards,
            ..
        }) => *is_next_player && *allowed_cards == Some(zone),
        Some(AllowedMoves::Swap {
            allowed_players, ..
        }) => allowed_players.contains(&local) && zone.is_swappable(),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{build, ViewModel};
    use proptest::prelude::*;
    use serde_json::json;

    const LOCAL: PlayerId = PlayerId(3);
    const OTHER: PlayerId = PlayerId(7);

    /// The eligibility table, written out case by case.
    fn expected(
        action: &str,
        is_next_player: bool,
        allowed_cards: Option<CardZone>,
        allowed_players: &[PlayerId],
        zone: CardZone,
        owner: PlayerId,
    ) -> bool {
        if owner != LOCAL {
            return false;
        }
        match action {
            "play" => is_next_player && allowed_cards == Some(zone),
            "swap" => allowed_players.contains(&LOCAL) && zone != CardZone::FaceDown,
            _ => false,
        }
    }

    fn moves_json(
        action: &str,
        is_next_player: bool,
        allowed_cards: Option<CardZone>,
        allowed_players: &[PlayerId],
    ) -> serde_json::Value {
        json!({
            "allowed_action": action,
            "is_next_player": is_next_player,
            "allowed_cards": allowed_cards,
            "allowed_players": allowed_players,
            "action_message": "",
        })
    }

    /// Selector presence in a built view for `owner`'s `zone`.
    fn rendered_selector(view: &ViewModel, owner: PlayerId, zone: CardZone) -> bool {
        let ViewModel::Game(game) = view else {
            return false;
        };
        game.players
            .iter()
            .filter(|p| p.player_id == owner)
            .flat_map(|p| &p.zones)
            .any(|z| z.zone == zone && z.display.is_selector())
    }

    const ACTIONS: [&str; 7] = ["play", "swap", "wait", "pick", "lost", "finished", "shuffle"];

    #[test]
    fn every_combination_matches_table() {
        let player_sets: [&[PlayerId]; 4] = [&[], &[LOCAL], &[OTHER], &[LOCAL, OTHER]];
        let allowed_cards = [None, Some(CardZone::FaceDown), Some(CardZone::FaceUp), Some(CardZone::Hand)];

        for action in ACTIONS {
            for is_next in [false, true] {
                for cards in allowed_cards {
                    for players in player_sets {
                        let snapshot =
                            crate::tests::snapshot(moves_json(action, is_next, cards, players));
                        let view = build(&snapshot);

                        for owner in [LOCAL, OTHER] {
                            for zone in CardZone::ALL {
                                let want = expected(action, is_next, cards, players, zone, owner);
                                assert_eq!(
                                    rendered_selector(&view, owner, zone),
                                    want,
                                    "{action} next={is_next} cards={cards:?} players={players:?} owner={owner} zone={zone:?}"
                                );
                                assert_eq!(
                                    is_selectable(snapshot.allowed_moves.as_ref(), LOCAL, owner, zone),
                                    want
                                );
                            }
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn nothing_selectable_without_moves() {
        for zone in CardZone::ALL {
            assert!(!is_selectable(None, LOCAL, LOCAL, zone));
        }
    }

    fn player_id() -> impl Strategy<Value = PlayerId> {
        (0i64..6).prop_map(PlayerId)
    }

    proptest! {
        #[test]
        fn selector_iff_eligible(
            action in prop::sample::select(ACTIONS.to_vec()),
            is_next in any::<bool>(),
            cards in prop::option::of(prop::sample::select(CardZone::ALL.to_vec())),
            players in prop::collection::vec(player_id(), 0..4),
            local in player_id(),
            owner in player_id(),
            zone in prop::sample::select(CardZone::ALL.to_vec()),
        ) {
            let moves = serde_json::from_value(moves_json(action, is_next, cards, &players)).unwrap();

            let eligible = owner == local
                && match action {
                    "play" => is_next && cards == Some(zone),
                    "swap" => players.contains(&local) && zone != CardZone::FaceDown,
                    _ => false,
                };

            prop_assert_eq!(is_selectable(Some(&moves), local, owner, zone), eligible);
        }
    }
}
