//! Editor configuration, with defaults and an environment loader.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use serde::{Deserialize, Serialize};

use crate::consts::DEFAULT_HISTORY_DELAY_MS;

pub const MAX_HISTORY_STACK_ENV: &str = "SKY_MAX_HISTORY_STACK";
pub const HISTORY_DELAY_ENV: &str = "SKY_HISTORY_DELAY_MS";

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value for {var}: {value:?}")]
    Invalid { var: &'static str, value: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditorConfig {
    /// Capacity of the undo stack; `None` keeps every snapshot.
    #[serde(default)]
    pub max_history_stack: Option<usize>,
    /// Debounce window for history captures, in milliseconds.
    #[serde(default = "default_delay")]
    pub history_delay_ms: u64,
}

fn default_delay() -> u64 {
    DEFAULT_HISTORY_DELAY_MS
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self { max_history_stack: None, history_delay_ms: DEFAULT_HISTORY_DELAY_MS }
    }
}

impl EditorConfig {
    /// Build config from environment variables.
    ///
    /// Optional:
    /// - `SKY_MAX_HISTORY_STACK`: undo capacity; `0` or absent means unbounded
    /// - `SKY_HISTORY_DELAY_MS`: default 500
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var_os(key).map(|v| v.to_string_lossy().into_owned()))
    }

    /// Build config from an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let max_history_stack = match lookup(MAX_HISTORY_STACK_ENV) {
            Some(raw) => parse_capacity(&raw)?,
            None => None,
        };
        let history_delay_ms = match lookup(HISTORY_DELAY_ENV) {
            Some(raw) => parse_u64(HISTORY_DELAY_ENV, &raw)?,
            None => DEFAULT_HISTORY_DELAY_MS,
        };
        Ok(Self { max_history_stack, history_delay_ms })
    }

    #[must_use]
    pub fn with_max_history_stack(mut self, capacity: Option<usize>) -> Self {
        self.max_history_stack = capacity.filter(|c| *c > 0);
        self
    }

    #[must_use]
    pub fn with_history_delay_ms(mut self, delay_ms: u64) -> Self {
        self.history_delay_ms = delay_ms;
        self
    }
}

fn parse_u64(var: &'static str, raw: &str) -> Result<u64, ConfigError> {
    raw.trim()
        .parse::<u64>()
        .map_err(|_| ConfigError::Invalid { var, value: raw.to_owned() })
}

fn parse_capacity(raw: &str) -> Result<Option<usize>, ConfigError> {
    let value = parse_u64(MAX_HISTORY_STACK_ENV, raw)?;
    if value == 0 {
        return Ok(None);
    }
    usize::try_from(value)
        .map(Some)
        .map_err(|_| ConfigError::Invalid { var: MAX_HISTORY_STACK_ENV, value: raw.to_owned() })
}
