use anyhow::{Context, Result};
use serde::Deserialize;
use std::env;
use thiserror::Error;

use crate::scheduler::Countdown;

const DEFAULT_COUNTDOWN_TIME_MS: u64 = 10_000;
const DEFAULT_TICK_INTERVAL_MS: u64 = 1_000;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub game: GameConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GameConfig {
    pub countdown_time_ms: u64,
    pub tick_interval_ms: u64,
    /// Fixed shuffle seed; `None` shuffles from OS entropy
    pub word_shuffle_seed: Option<u64>,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("countdown time must be greater than zero")]
    ZeroCountdown,
    #[error("tick interval must be greater than zero")]
    ZeroTickInterval,
    #[error("tick interval ({tick_ms}ms) is longer than the countdown ({countdown_ms}ms)")]
    TickLongerThanCountdown { tick_ms: u64, countdown_ms: u64 },
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            countdown_time_ms: DEFAULT_COUNTDOWN_TIME_MS,
            tick_interval_ms: DEFAULT_TICK_INTERVAL_MS,
            word_shuffle_seed: None,
        }
    }
}

impl GameConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.countdown_time_ms == 0 {
            return Err(ConfigError::ZeroCountdown);
        }
        if self.tick_interval_ms == 0 {
            return Err(ConfigError::ZeroTickInterval);
        }
        if self.tick_interval_ms > self.countdown_time_ms {
            return Err(ConfigError::TickLongerThanCountdown {
                tick_ms: self.tick_interval_ms,
                countdown_ms: self.countdown_time_ms,
            });
        }
        Ok(())
    }

    pub fn countdown(&self) -> Countdown {
        Countdown::from_millis(self.countdown_time_ms, self.tick_interval_ms)
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let game = GameConfig {
            countdown_time_ms: lookup("COUNTDOWN_TIME_MS")
                .unwrap_or_else(|| DEFAULT_COUNTDOWN_TIME_MS.to_string())
                .parse()
                .context("COUNTDOWN_TIME_MS must be a number")?,
            tick_interval_ms: lookup("TICK_INTERVAL_MS")
                .unwrap_or_else(|| DEFAULT_TICK_INTERVAL_MS.to_string())
                .parse()
                .context("TICK_INTERVAL_MS must be a number")?,
            word_shuffle_seed: lookup("WORD_SHUFFLE_SEED")
                .map(|seed| seed.parse())
                .transpose()
                .context("WORD_SHUFFLE_SEED must be a number")?,
        };

        game.validate().context("Invalid game configuration")?;

        Ok(Config { game })
    }
}
