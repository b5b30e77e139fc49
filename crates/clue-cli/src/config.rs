use clue_core::game::{MAX_PLAYERS, MIN_PLAYERS};
use clue_core::model::player::PlayerRole;
use serde::Deserialize;
use std::collections::HashSet;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::Level;

const DEFAULT_PLAYERS: usize = 6;

/// Table setup loaded from YAML. Every section is optional.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct GameConfig {
    #[serde(default = "default_players")]
    pub players: usize,
    /// 1-based seats played by the built-in agent. When absent the last
    /// seat is an agent; an empty list seats humans only.
    #[serde(default)]
    pub agents: Option<Vec<u8>>,
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(default)]
    pub max_rounds: Option<u32>,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            players: default_players(),
            agents: None,
            seed: None,
            max_rounds: None,
            logging: LoggingConfig::default(),
        }
    }
}

impl GameConfig {
    /// Load configuration from a YAML file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let path_buf = path.to_path_buf();
        let file = File::open(path).map_err(|source| ConfigError::Read {
            source,
            path: path_buf.clone(),
        })?;
        let reader = BufReader::new(file);
        let mut cfg: GameConfig =
            serde_yaml::from_reader(reader).map_err(|source| ConfigError::Parse {
                source,
                path: path_buf.clone(),
            })?;
        cfg.validate().map_err(|source| ConfigError::Invalid {
            path: path_buf,
            source,
        })?;
        Ok(cfg)
    }

    /// Validate the configuration without performing I/O.
    pub fn validate(&mut self) -> Result<(), ValidationError> {
        if !(MIN_PLAYERS..=MAX_PLAYERS).contains(&self.players) {
            return Err(ValidationError::InvalidField {
                field: "players".to_string(),
                message: format!(
                    "player count must be between {MIN_PLAYERS} and {MAX_PLAYERS}, got {}",
                    self.players
                ),
            });
        }
        if let Some(agents) = &self.agents {
            validate_agents(agents, self.players)?;
        }
        self.logging.normalize();
        if self.logging.level().is_none() {
            return Err(ValidationError::InvalidField {
                field: "logging.level".to_string(),
                message: format!("unknown log level '{}'", self.logging.level),
            });
        }
        Ok(())
    }

    /// Role of every seat, in seat order.
    pub fn roles(&self) -> Vec<PlayerRole> {
        (1..=self.players)
            .map(|seat| {
                let is_agent = match &self.agents {
                    Some(agents) => agents.iter().any(|agent| usize::from(*agent) == seat),
                    None => seat == self.players,
                };
                if is_agent {
                    PlayerRole::Agent
                } else {
                    PlayerRole::Human
                }
            })
            .collect()
    }
}

fn default_players() -> usize {
    DEFAULT_PLAYERS
}

fn validate_agents(agents: &[u8], players: usize) -> Result<(), ValidationError> {
    let mut seen = HashSet::new();
    for seat in agents {
        if *seat == 0 || usize::from(*seat) > players {
            return Err(ValidationError::InvalidField {
                field: "agents".to_string(),
                message: format!("agent seat {seat} is outside 1..={players}"),
            });
        }
        if !seen.insert(*seat) {
            return Err(ValidationError::InvalidField {
                field: "agents".to_string(),
                message: format!("agent seat {seat} listed more than once"),
            });
        }
    }
    Ok(())
}

/// Logging defaults to `info` on stderr.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct LoggingConfig {
    #[serde(default = "default_level")]
    pub level: String,
    /// When set, log lines are written to this file as JSON instead.
    #[serde(default)]
    pub json_path: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            json_path: None,
        }
    }
}

impl LoggingConfig {
    fn normalize(&mut self) {
        if self.level.trim().is_empty() {
            self.level = default_level();
        }
    }

    pub fn level(&self) -> Option<Level> {
        match self.level.trim().to_ascii_lowercase().as_str() {
            "trace" => Some(Level::TRACE),
            "debug" => Some(Level::DEBUG),
            "info" => Some(Level::INFO),
            "warn" | "warning" => Some(Level::WARN),
            "error" => Some(Level::ERROR),
            _ => None,
        }
    }
}

fn default_level() -> String {
    "info".to_string()
}

/// Errors surfaced when loading configuration files.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path:?}: {source}")]
    Read {
        #[source]
        source: std::io::Error,
        path: PathBuf,
    },
    #[error("failed to parse config {path:?}: {source}")]
    Parse {
        #[source]
        source: serde_yaml::Error,
        path: PathBuf,
    },
    #[error("invalid configuration in {path:?}: {source}")]
    Invalid {
        path: PathBuf,
        source: ValidationError,
    },
}

impl ConfigError {
    pub fn path(&self) -> &Path {
        match self {
            ConfigError::Read { path, .. }
            | ConfigError::Parse { path, .. }
            | ConfigError::Invalid { path, .. } => path.as_path(),
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{field}: {message}")]
    InvalidField { field: String, message: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    const TABLE_YAML: &str = r#"
players: 4
agents: [2, 4]
seed: 77
max_rounds: 30
logging:
  level: "debug"
"#;

    #[test]
    fn loads_and_validates_table_config() {
        let mut cfg: GameConfig = serde_yaml::from_str(TABLE_YAML).expect("parse yaml");
        cfg.validate().expect("validate");

        assert_eq!(cfg.seed, Some(77));
        assert_eq!(cfg.max_rounds, Some(30));
        assert_eq!(cfg.logging.level(), Some(Level::DEBUG));
        assert_eq!(cfg.logging.json_path, None);
        assert_eq!(
            cfg.roles(),
            vec![
                PlayerRole::Human,
                PlayerRole::Agent,
                PlayerRole::Human,
                PlayerRole::Agent,
            ]
        );
    }

    #[test]
    fn empty_document_uses_defaults() {
        let mut cfg: GameConfig = serde_yaml::from_str("{}").expect("parse yaml");
        cfg.validate().expect("validate");
        assert_eq!(cfg, GameConfig::default());
        assert_eq!(cfg.roles().last(), Some(&PlayerRole::Agent));
        assert_eq!(cfg.roles().len(), DEFAULT_PLAYERS);
    }

    #[test]
    fn empty_agent_list_seats_only_humans() {
        let mut cfg: GameConfig =
            serde_yaml::from_str("players: 3\nagents: []\n").expect("parse yaml");
        cfg.validate().expect("validate");
        assert_eq!(cfg.roles(), vec![PlayerRole::Human; 3]);
    }

    #[test]
    fn rejects_bad_player_counts() {
        for players in [0, 1, 7] {
            let mut cfg = GameConfig {
                players,
                ..GameConfig::default()
            };
            let err = cfg.validate().expect_err("player count rejected");
            assert!(err.to_string().starts_with("players:"));
        }
    }

    #[test]
    fn rejects_agent_seats_out_of_range_or_repeated() {
        let mut cfg = GameConfig {
            players: 3,
            agents: Some(vec![4]),
            ..GameConfig::default()
        };
        assert!(cfg.validate().is_err());

        cfg.agents = Some(vec![0]);
        assert!(cfg.validate().is_err());

        cfg.agents = Some(vec![2, 2]);
        let err = cfg.validate().expect_err("duplicate seat rejected");
        assert!(err.to_string().contains("more than once"));
    }

    #[test]
    fn blank_level_falls_back_and_unknown_level_fails() {
        let mut cfg = GameConfig::default();
        cfg.logging.level = "  ".to_string();
        cfg.validate().expect("blank level normalized");
        assert_eq!(cfg.logging.level, "info");

        cfg.logging.level = "loud".to_string();
        let err = cfg.validate().expect_err("unknown level rejected");
        assert!(err.to_string().contains("logging.level"));
    }
}
