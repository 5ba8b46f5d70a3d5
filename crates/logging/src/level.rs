// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Record priorities and per-sender level configuration.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Priority of a record, lowest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Trace,
    Debug,
    Info,
    Notice,
    Warning,
    Error,
    Critical,
    Alert,
    Emergency,
}

impl Level {
    pub fn as_str(self) -> &'static str {
        match self {
            Level::Trace => "trace",
            Level::Debug => "debug",
            Level::Info => "info",
            Level::Notice => "notice",
            Level::Warning => "warning",
            Level::Error => "error",
            Level::Critical => "critical",
            Level::Alert => "alert",
            Level::Emergency => "emergency",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Level settings of a sender.
///
/// `default` is the level given to messages logged without one; records
/// below `threshold` are discarded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelInfo {
    pub default: Level,
    pub threshold: Level,
}

impl LevelInfo {
    pub const fn new(default: Level, threshold: Level) -> Self {
        Self { default, threshold }
    }

    pub fn enabled(&self, level: Level) -> bool {
        level >= self.threshold
    }
}

impl Default for LevelInfo {
    fn default() -> Self {
        Self::new(Level::Info, Level::Debug)
    }
}

#[cfg(test)]
#[path = "level_tests.rs"]
mod tests;
