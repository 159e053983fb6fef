use std::path::Path;
use std::time::Duration;

use gomoku::{DEFAULT_BOARD_SIZE, GAME_TYPE};
use serde::{Deserialize, Serialize};

/// Everything an agent needs to know besides the hub address and room.
///
/// Can be loaded from a JSON file, in which every field is optional:
///
/// ```json
/// {
///   "identity": { "name": "Gomugi", "version": "0.1.0", "author": "Alex" },
///   "game": { "gameType": "Gomoku", "boardSize": 15, "moveTimeLimit": 1.0, "numPlayers": 2 }
/// }
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Sent to the hub as the user agent. `null` means no user agent is sent.
    pub identity: Option<AgentIdentity>,
    pub game: GameConfig,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentIdentity {
    pub name: String,
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub author: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GameConfig {
    pub game_type: String,
    pub board_size: usize,
    /// How long the agent may think about a move, in seconds.
    pub move_time_limit: f64,
    pub num_players: usize,
}

impl Config {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&contents)?;
        config.game.validate()?;
        Ok(config)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            identity: Some(AgentIdentity::default()),
            game: GameConfig::default(),
        }
    }
}

impl AgentIdentity {
    /// Renders the identity as `<name> v<version> (by <author>)`.
    pub fn user_agent(&self) -> String {
        let mut result = self.name.clone();
        if let Some(version) = self.version.as_deref().filter(|v| !v.is_empty()) {
            result += " v";
            result += version;
        }
        let author = self
            .author
            .as_deref()
            .filter(|a| !a.is_empty())
            .unwrap_or("Anonymous");
        format!("{} (by {})", result, author)
    }
}

impl Default for AgentIdentity {
    fn default() -> Self {
        Self {
            name: String::from("Gomugi"),
            version: Some(String::from(env!("CARGO_PKG_VERSION"))),
            author: None,
        }
    }
}

impl GameConfig {
    pub fn move_time_limit(&self) -> Duration {
        // Only reachable with an unvalidated config
        Duration::try_from_secs_f64(self.move_time_limit).unwrap_or(Duration::ZERO)
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if self.board_size == 0 {
            anyhow::bail!("The board size must be at least 1");
        }
        if Duration::try_from_secs_f64(self.move_time_limit).is_err() {
            anyhow::bail!(
                "The move time limit must be a non-negative number of seconds, got {}",
                self.move_time_limit
            );
        }
        if self.num_players < 2 {
            anyhow::bail!("A game needs at least two players, got {}", self.num_players);
        }
        Ok(())
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            game_type: String::from(GAME_TYPE),
            board_size: DEFAULT_BOARD_SIZE,
            move_time_limit: 1.0,
            num_players: 2,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_agent_formats() {
        let identity = AgentIdentity {
            name: String::from("Gomugi"),
            version: Some(String::from("0.1.0")),
            author: Some(String::from("Alex")),
        };
        assert_eq!(identity.user_agent(), "Gomugi v0.1.0 (by Alex)");

        let identity = AgentIdentity {
            name: String::from("Gomugi"),
            version: None,
            author: Some(String::new()),
        };
        assert_eq!(identity.user_agent(), "Gomugi (by Anonymous)");
    }

    #[test]
    fn partial_config_uses_defaults() {
        let config: Config = serde_json::from_str(r#"{ "game": { "boardSize": 5 } }"#).unwrap();
        assert_eq!(config.game.board_size, 5);
        assert_eq!(config.game.game_type, "Gomoku");
        assert_eq!(config.game.move_time_limit(), Duration::from_secs(1));
        assert_eq!(config.identity, Some(AgentIdentity::default()));
    }

    #[test]
    fn identity_can_be_disabled() {
        let config: Config = serde_json::from_str(r#"{ "identity": null }"#).unwrap();
        assert_eq!(config.identity, None);
    }

    #[test]
    fn invalid_game_configs() {
        let valid = GameConfig::default();
        assert!(valid.validate().is_ok());
        for invalid in [
            GameConfig {
                board_size: 0,
                ..GameConfig::default()
            },
            GameConfig {
                move_time_limit: -1.0,
                ..GameConfig::default()
            },
            GameConfig {
                move_time_limit: f64::NAN,
                ..GameConfig::default()
            },
            GameConfig {
                num_players: 1,
                ..GameConfig::default()
            },
        ] {
            assert!(invalid.validate().is_err());
        }
    }
}
