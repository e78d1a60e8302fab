//! The message envelope
//!
//! Every message carries an explicit `type` discriminant in its JSON body
//! and is decoded through tagged-union dispatch. Decoding never guesses the
//! kind from which field names happen to be present.

use serde::{Deserialize, Serialize};
use volley_core::{GameState, Player, Vec2};

/// A message on the wire
///
/// Field names serialize in camelCase, e.g. `gameId`, `playerNumber`,
/// `clientTick`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all_fields = "camelCase")]
pub enum Message {
    /// Client asks the coordinator service for a game slot
    ConnectRequest { device_id: String },
    /// Coordinator assigns the game and the player number
    ConnectResponse {
        game_id: String,
        player_number: Player,
    },
    /// Player 1 asks for the match to begin once both sides are connected
    StartGameRequest {
        game_id: String,
        player_number: Player,
    },
    /// The match begins
    StartGameResponse { game_id: String },
    /// A paddle's absolute position at a given tick
    PaddleMovement {
        game_id: String,
        player_number: Player,
        paddle: Vec2,
        tick: u64,
    },
    /// Client asks for a fresh authoritative snapshot
    StatePullRequest { game_id: String, client_tick: u64 },
    /// Full authoritative game state, flattened into the envelope
    StateSnapshot {
        #[serde(flatten)]
        state: GameState,
    },
}

impl Message {
    /// The game this message belongs to, when it carries one
    pub fn game_id(&self) -> Option<&str> {
        match self {
            Message::ConnectRequest { .. } | Message::StateSnapshot { .. } => None,
            Message::ConnectResponse { game_id, .. }
            | Message::StartGameRequest { game_id, .. }
            | Message::StartGameResponse { game_id }
            | Message::PaddleMovement { game_id, .. }
            | Message::StatePullRequest { game_id, .. } => Some(game_id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{decode, encode};
    use volley_core::GameConfig;

    #[test]
    fn test_explicit_discriminant_on_the_wire() {
        let msg = Message::ConnectRequest {
            device_id: "device-abc".into(),
        };
        let encoded = encode(&msg).unwrap();
        assert!(encoded.contains(r#""type":"ConnectRequest""#));
        assert!(encoded.contains(r#""deviceId":"device-abc""#));
        assert!(encoded.ends_with("\r\n"));
    }

    #[test]
    fn test_paddle_movement_field_names() {
        let msg = Message::PaddleMovement {
            game_id: "g1".into(),
            player_number: Player::Two,
            paddle: Vec2::new(1.5, 7.0),
            tick: 42,
        };
        let encoded = encode(&msg).unwrap();
        assert!(encoded.contains(r#""gameId":"g1""#));
        assert!(encoded.contains(r#""playerNumber":2"#));

        assert_eq!(decode(&encoded).unwrap(), msg);
    }

    #[test]
    fn test_snapshot_flattens_state_into_envelope() {
        let state = GameState::new(&GameConfig::default(), 42);
        let msg = Message::StateSnapshot { state };
        let encoded = encode(&msg).unwrap();

        assert!(encoded.contains(r#""type":"StateSnapshot""#));
        // state fields sit at the top level, not under a nested key
        assert!(encoded.contains(r#""ball":"#));
        assert!(encoded.contains(r#""bounceAngle":35"#));

        assert_eq!(decode(&encoded).unwrap(), msg);
    }

    #[test]
    fn test_unknown_tag_is_malformed() {
        let err = decode(r#"{"type":"SelfDestruct","gameId":"g1"}"#);
        assert!(err.is_err());
    }

    #[test]
    fn test_field_name_collision_does_not_confuse_dispatch() {
        // A pull request shares `gameId` with several kinds; only the tag decides.
        let msg = decode(r#"{"type":"StatePullRequest","gameId":"g1","clientTick":9}"#).unwrap();
        assert_eq!(
            msg,
            Message::StatePullRequest {
                game_id: "g1".into(),
                client_tick: 9
            }
        );
    }
}
