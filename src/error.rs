//! Error types for the fallible edges of the game.
//!
//! The simulation itself never fails: damage saturates, pools drop shots
//! when full and removal never indexes out of bounds.  Errors only come from
//! loading and validating a [`GameConfig`](crate::config::GameConfig).

use std::fmt;

#[derive(Debug)]
pub enum GameError {
    /// The config file exists but could not be read.
    ConfigRead {
        path: String,
        source: std::io::Error,
    },

    /// The config file is not valid TOML for [`GameConfig`](crate::config::GameConfig).
    ConfigParse {
        path: String,
        source: toml::de::Error,
    },

    /// A tunable is outside the range the simulation can handle.
    InvalidSetting {
        /// Config key, as written in the TOML file.
        name: &'static str,
        /// The value that was rejected.
        value: f64,
        /// Human-readable description of the accepted range.
        expected: &'static str,
    },
}

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameError::ConfigRead { path, source } => {
                write!(f, "failed to read config '{}': {}", path, source)
            }
            GameError::ConfigParse { path, source } => {
                write!(f, "failed to parse config '{}': {}", path, source)
            }
            GameError::InvalidSetting {
                name,
                value,
                expected,
            } => write!(
                f,
                "setting '{}' = {} is outside accepted range {}",
                name, value, expected
            ),
        }
    }
}

impl std::error::Error for GameError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GameError::ConfigRead { source, .. } => Some(source),
            GameError::ConfigParse { source, .. } => Some(source),
            GameError::InvalidSetting { .. } => None,
        }
    }
}

pub type GameResult<T> = Result<T, GameError>;
