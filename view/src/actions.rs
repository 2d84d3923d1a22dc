use std::fmt;

use common::data::PlayerId;
use common::moves::AllowedMoves;
use tracing::{debug, warn};

use crate::WAITING_FOR_PLAYERS;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Button {
    Play,
    Swap,
    Ready,
    Refresh,
    PickUp,
}

impl Button {
    pub const fn label(&self) -> &'static str {
        match self {
            Button::Play => "Play",
            Button::Swap => "Swap",
            Button::Ready => "Ready",
            Button::Refresh => "Refresh",
            Button::PickUp => "Pick up cards",
        }
    }
}

impl fmt::Display for Button {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Buttons offered to the local player, and the status text beside them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActionPanel {
    pub buttons: Vec<Button>,
    pub message: Option<String>,
}

impl ActionPanel {
    fn new(buttons: impl Into<Vec<Button>>, message: Option<&str>) -> Self {
        Self {
            buttons: buttons.into(),
            message: message.filter(|m| !m.is_empty()).map(str::to_owned),
        }
    }
}

pub fn action_panel(moves: Option<&AllowedMoves>, local: PlayerId) -> ActionPanel {
    let Some(moves) = moves else {
        debug!("no allowed moves in snapshot");
        return ActionPanel::default();
    };

    match moves {
        AllowedMoves::Play { is_next_player, .. } => {
            if *is_next_player {
                ActionPanel::new([Button::Play, Button::Refresh], None)
            } else {
                ActionPanel::new([Button::Refresh], None)
            }
        }
        AllowedMoves::Swap {
            allowed_players, ..
        } => {
            if allowed_players.contains(&local) {
                ActionPanel::new([Button::Swap, Button::Ready, Button::Refresh], None)
            } else {
                ActionPanel::new([Button::Refresh], Some(WAITING_FOR_PLAYERS))
            }
        }
        AllowedMoves::Wait { action_message } => {
            ActionPanel::new([Button::Refresh], Some(action_message.as_str()))
        }
        AllowedMoves::Pick { action_message } => {
            ActionPanel::new([Button::PickUp], Some(action_message.as_str()))
        }
        AllowedMoves::Lost { action_message } | AllowedMoves::Finished { action_message } => {
            ActionPanel::new(Vec::new(), Some(action_message.as_str()))
        }
        AllowedMoves::Unknown => {
            warn!("unrecognised allowed action, offering no actions");
            ActionPanel::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tracing_test::traced_test;

    const LOCAL: PlayerId = PlayerId(3);

    fn panel(moves: serde_json::Value) -> ActionPanel {
        let moves: AllowedMoves = serde_json::from_value(moves).unwrap();
        action_panel(Some(&moves), LOCAL)
    }

    #[test]
    fn play() {
        let mine = panel(json!({ "allowed_action": "play", "is_next_player": true }));
        assert_eq!(mine.buttons, [Button::Play, Button::Refresh]);

        let theirs = panel(json!({ "allowed_action": "play", "is_next_player": false }));
        assert_eq!(theirs.buttons, [Button::Refresh]);
        assert_eq!(theirs.message, None);
    }

    #[test]
    fn swap() {
        let eligible = panel(json!({ "allowed_action": "swap", "allowed_players": [3] }));
        assert_eq!(eligible.buttons, [Button::Swap, Button::Ready, Button::Refresh]);
        assert_eq!(eligible.message, None);

        let waiting = panel(json!({ "allowed_action": "swap", "allowed_players": [7] }));
        assert_eq!(waiting.buttons, [Button::Refresh]);
        assert_eq!(waiting.message.as_deref(), Some(WAITING_FOR_PLAYERS));
    }

    #[test]
    fn messages_are_passed_through() {
        let wait = panel(json!({ "allowed_action": "wait", "action_message": "player 7 is thinking" }));
        assert_eq!(wait.buttons, [Button::Refresh]);
        assert_eq!(wait.message.as_deref(), Some("player 7 is thinking"));

        let pick = panel(json!({ "allowed_action": "pick", "action_message": "nothing to play" }));
        assert_eq!(pick.buttons, [Button::PickUp]);
        assert_eq!(pick.message.as_deref(), Some("nothing to play"));

        for action in ["lost", "finished"] {
            let end = panel(json!({ "allowed_action": action, "action_message": "done" }));
            assert!(end.buttons.is_empty());
            assert_eq!(end.message.as_deref(), Some("done"));
        }
    }

    #[test]
    #[traced_test]
    fn unknown_action_is_logged() {
        let unknown = panel(json!({ "allowed_action": "teleport" }));
        assert_eq!(unknown, ActionPanel::default());
        assert!(logs_contain("unrecognised allowed action"));
    }

    #[test]
    fn no_moves_no_buttons() {
        assert_eq!(action_panel(None, LOCAL), ActionPanel::default());
    }
}
