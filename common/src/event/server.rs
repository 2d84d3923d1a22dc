use serde::{Deserialize, Serialize};

/// Result of a submitted action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionResponse {
    #[serde(default)]
    pub action: Option<String>,
    pub action_result: bool,
    #[serde(default)]
    pub action_message: Option<String>,
}

/// Fingerprint of the stored game state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChecksumResponse {
    #[serde(default)]
    pub action: Option<String>,
    #[serde(default)]
    pub database_checksum: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewGameResponse {
    pub startnewgame: bool,
    #[serde(default)]
    pub new_game_id: Option<i64>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub redirect: Option<String>,
    #[serde(default)]
    pub redirect_querystring: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejected_action() {
        let response: ActionResponse = serde_json::from_str(
            r#"{"action": "play", "action_result": false, "action_message": "not your turn"}"#,
        )
        .unwrap();

        assert!(!response.action_result);
        assert_eq!(response.action_message.as_deref(), Some("not your turn"));
    }

    #[test]
    fn checksum_without_value() {
        let response: ChecksumResponse =
            serde_json::from_str(r#"{"action": "haschanged", "database_checksum": null}"#).unwrap();
        assert_eq!(response.database_checksum, None);
    }
}
