use serde::{Deserialize, Serialize};

/// The game type to request from the hub.
pub const GAME_TYPE: &str = "Gomoku";

/// Message from an agent to the hub.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ClientMessage {
    /// Request to join a room.
    ///
    /// The hub answers with [`HubMessage::YouAre`].
    #[serde(rename_all = "camelCase")]
    StartGame {
        game_type: String,
        room: String,
        /// How many games to play in this room.
        n_games: usize,
        /// Identifies the agent software. Omitted from the JSON
        /// serialization when not set.
        #[serde(skip_serializing_if = "Option::is_none")]
        #[serde(default)]
        user_agent: Option<String>,
    },
    /// Put a stone on the cell with this flattened (row-major) index.
    Move {
        #[serde(rename = "move")]
        index: usize,
    },
}

/// Message from the hub to an agent.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum HubMessage {
    /// The player index assigned to the agent for as long as it stays in the room.
    YouAre { index: usize },
    /// A new game has started.
    #[serde(rename_all = "camelCase")]
    Started {
        /// The index of the player who moves first.
        player_index: usize,
    },
    /// A move has been played. Sent to every player in the room.
    StateUpdate {
        /// The flattened (row-major) index of the cell.
        #[serde(rename = "move")]
        index: usize,
        /// Only present when the move ended the game.
        #[serde(skip_serializing_if = "Option::is_none")]
        #[serde(default)]
        winner: Option<usize>,
    },
    /// Any message type this client does not know.
    #[serde(other)]
    Unknown,
}

impl HubMessage {
    /// The value of the `type` field.
    pub fn kind(&self) -> &'static str {
        match self {
            HubMessage::YouAre { .. } => "YouAre",
            HubMessage::Started { .. } => "Started",
            HubMessage::StateUpdate { .. } => "StateUpdate",
            HubMessage::Unknown => "unknown",
        }
    }
}
