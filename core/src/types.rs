//! Wire DTOs for the game API.
//!
//! # Design
//! Plain data holders. None of them use `deny_unknown_fields`: the service
//! adds fields over time and decoding must keep working when it does.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// State of a single game as returned by `GET /api/game[/{id}]`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct GameState {
    pub game_id: String,
    pub lives: u32,
}

/// Error body returned with non-success statuses: `{"error": {...}}`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ErrorPayload {
    pub error: ErrorDetail,
}

/// Contents of the `error` object. `message` is the only field the service
/// reliably sends; anything else is kept verbatim in `fields`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ErrorDetail {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl ErrorDetail {
    pub fn with_message(message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
            fields: Map::new(),
        }
    }
}

impl fmt::Display for ErrorPayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.error.message {
            Some(message) => write!(f, "{message}"),
            None => write!(f, "{}", Value::Object(self.error.fields.clone())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn game_state_reads_camel_case() {
        let state: GameState = serde_json::from_str(r#"{"gameId":"abc","lives":3}"#).unwrap();
        assert_eq!(
            state,
            GameState {
                game_id: "abc".to_string(),
                lives: 3
            }
        );
    }

    #[test]
    fn game_state_ignores_unknown_fields() {
        let state: GameState =
            serde_json::from_str(r#"{"gameId":"abc","lives":3,"knight":{"name":"Sir Ned"}}"#)
                .unwrap();
        assert_eq!(state.game_id, "abc");
        assert_eq!(state.lives, 3);
    }

    #[test]
    fn error_detail_keeps_extra_fields() {
        let payload: ErrorPayload =
            serde_json::from_str(r#"{"error":{"message":"game over","code":17}}"#).unwrap();
        assert_eq!(payload.error.message.as_deref(), Some("game over"));
        assert_eq!(payload.error.fields["code"], 17);
        assert_eq!(payload.to_string(), "game over");
    }

    #[test]
    fn error_without_message_displays_fields() {
        let payload: ErrorPayload = serde_json::from_str(r#"{"error":{"code":17}}"#).unwrap();
        assert!(payload.error.message.is_none());
        assert_eq!(payload.to_string(), r#"{"code":17}"#);
    }

    #[test]
    fn error_payload_requires_error_object() {
        let result: Result<ErrorPayload, _> = serde_json::from_str(r#"{"message":"nope"}"#);
        assert!(result.is_err());
    }
}
