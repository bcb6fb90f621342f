use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Table settings, loadable from TOML. Missing keys take the defaults.
///
/// ```
/// use holdem_rs::config::TableConfig;
///
/// let cfg = TableConfig::from_toml_str("players = 4\nsmall_blind = 5").unwrap();
/// assert_eq!(cfg.players, 4);
/// assert_eq!(cfg.buy_in, 200);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct TableConfig {
    pub players: usize,
    pub buy_in: u64,
    pub small_blind: u64,
    /// Completed hands between small blind doublings.
    pub blind_double_every: u32,
    /// Fixed shuffle seed; random when absent.
    pub seed: Option<u64>,
    /// Seat index taken by a person at the terminal.
    pub human_seat: Option<usize>,
    pub decision_timeout_ms: u64,
    /// Extra chips the human's raise key puts in.
    pub human_raise: u64,
    /// Stop after this many hands even if several players remain.
    pub max_hands: Option<u32>,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            players: 8,
            buy_in: 200,
            small_blind: 20,
            blind_double_every: 3,
            seed: None,
            human_seat: None,
            decision_timeout_ms: 30_000,
            human_raise: 40,
            max_hands: None,
        }
    }
}

#[derive(thiserror::Error, Debug)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("cannot read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("cannot parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

impl TableConfig {
    pub const MIN_PLAYERS: usize = 2;
    pub const MAX_PLAYERS: usize = 10;

    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let cfg: TableConfig = toml::from_str(s)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let s = fs::read_to_string(path)?;
        Self::from_toml_str(&s)
    }

    pub fn big_blind(&self) -> u64 {
        self.small_blind * 2
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(Self::MIN_PLAYERS..=Self::MAX_PLAYERS).contains(&self.players) {
            return Err(ConfigError::Invalid(format!(
                "players must be between {} and {}, got {}",
                Self::MIN_PLAYERS,
                Self::MAX_PLAYERS,
                self.players
            )));
        }
        if self.buy_in == 0 || self.small_blind == 0 {
            return Err(ConfigError::Invalid("buy_in and small_blind must be positive".into()));
        }
        if self.buy_in < self.big_blind() {
            return Err(ConfigError::Invalid(format!(
                "buy_in {} does not cover the big blind {}",
                self.buy_in,
                self.big_blind()
            )));
        }
        if self.blind_double_every == 0 {
            return Err(ConfigError::Invalid("blind_double_every must be positive".into()));
        }
        if let Some(seat) = self.human_seat {
            if seat >= self.players {
                return Err(ConfigError::Invalid(format!(
                    "human_seat {seat} is outside a table of {}",
                    self.players
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let cfg = TableConfig::default();
        assert!(cfg.validate().is_ok());
        assert_eq!((cfg.players, cfg.buy_in, cfg.small_blind), (8, 200, 20));
        assert_eq!(cfg.big_blind(), 40);
    }

    #[test]
    fn rejects_bad_tables() {
        let cases = [
            "players = 1",
            "players = 11",
            "buy_in = 0",
            "buy_in = 30\nsmall_blind = 20",
            "blind_double_every = 0",
            "players = 3\nhuman_seat = 3",
        ];
        for s in cases {
            assert!(matches!(TableConfig::from_toml_str(s), Err(ConfigError::Invalid(_))), "{s}");
        }
    }

    #[test]
    fn unknown_keys_fail_to_parse() {
        assert!(matches!(TableConfig::from_toml_str("seats = 3"), Err(ConfigError::Parse(_))));
    }
}
