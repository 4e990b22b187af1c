//! Runtime configuration
//!
//! Defaults are the standard game pacing. The binary overlays a few
//! environment variables on top:
//!
//! - `TIME_MACHINE_LOG`: write logs to this file (logging is off otherwise)
//! - `TIME_MACHINE_TICK_MS`: input poll interval in milliseconds
//! - `TIME_MACHINE_PACE`: multiplier applied to every game delay

use crate::GameError;
use std::path::PathBuf;
use std::time::Duration;

pub const LOG_FILE_VAR: &str = "TIME_MACHINE_LOG";
pub const TICK_MS_VAR: &str = "TIME_MACHINE_TICK_MS";
pub const PACE_VAR: &str = "TIME_MACHINE_PACE";

/// Delays between an action and its follow-up effects
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timings {
    /// Time spent in transit before arriving in the new era
    pub travel: Duration,
    /// How long a pickup confirmation or rejection stays on screen
    pub notice: Duration,
    /// Pause between solving a level and revealing what it unlocked
    pub reveal: Duration,
    /// How long a "Level N Unlocked" banner stays on screen
    pub banner: Duration,
}

impl Default for Timings {
    fn default() -> Self {
        Self {
            travel: Duration::from_millis(500),
            notice: Duration::from_millis(2000),
            reveal: Duration::from_millis(2000),
            banner: Duration::from_millis(3000),
        }
    }
}

impl Timings {
    /// Every delay multiplied by `pace`; `pace` must be finite and positive
    pub fn scaled(&self, pace: f64) -> Result<Self, GameError> {
        if !pace.is_finite() || pace <= 0.0 {
            return Err(GameError::InvalidConfig {
                key: PACE_VAR.to_string(),
                reason: format!("expected a positive number, got {pace}"),
            });
        }
        Ok(Self {
            travel: self.travel.mul_f64(pace),
            notice: self.notice.mul_f64(pace),
            reveal: self.reveal.mul_f64(pace),
            banner: self.banner.mul_f64(pace),
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub timings: Timings,
    /// How long the UI waits for input before redrawing
    pub tick_rate: Duration,
    pub log_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            timings: Timings::default(),
            tick_rate: Duration::from_millis(100),
            log_file: None,
        }
    }
}

impl Config {
    /// Defaults overlaid with the process environment
    pub fn from_env() -> Result<Self, GameError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Defaults overlaid with whatever `lookup` returns for each variable
    pub fn from_lookup<F>(lookup: F) -> Result<Self, GameError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(path) = lookup(LOG_FILE_VAR).filter(|v| !v.trim().is_empty()) {
            config.log_file = Some(PathBuf::from(path.trim()));
        }

        if let Some(raw) = lookup(TICK_MS_VAR) {
            let ms: u64 = raw.trim().parse().map_err(|_| GameError::InvalidConfig {
                key: TICK_MS_VAR.to_string(),
                reason: format!("expected milliseconds, got {raw:?}"),
            })?;
            if ms == 0 {
                return Err(GameError::InvalidConfig {
                    key: TICK_MS_VAR.to_string(),
                    reason: "tick rate must be at least 1ms".to_string(),
                });
            }
            config.tick_rate = Duration::from_millis(ms);
        }

        if let Some(raw) = lookup(PACE_VAR) {
            let pace: f64 = raw.trim().parse().map_err(|_| GameError::InvalidConfig {
                key: PACE_VAR.to_string(),
                reason: format!("expected a number, got {raw:?}"),
            })?;
            config.timings = config.timings.scaled(pace)?;
        }

        Ok(config)
    }
}
