// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The sender abstraction: an append-only sink for log records.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::fmt;

use crate::error::SenderError;
use crate::level::{Level, LevelInfo};

/// One log record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub level: Level,
    pub message: String,
    pub timestamp: DateTime<Utc>,
}

impl Record {
    pub fn new(level: Level, message: impl Into<String>) -> Self {
        Self::at(level, message, Utc::now())
    }

    pub fn at(level: Level, message: impl Into<String>, timestamp: DateTime<Utc>) -> Self {
        Self { level, message: message.into(), timestamp }
    }

    /// Seconds since the epoch with millisecond precision.
    pub fn epoch_secs(&self) -> f64 {
        self.timestamp.timestamp_millis() as f64 / 1000.0
    }
}

/// Format: `2026-01-30T08:14:09Z [info] message`
impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} [{}] {}",
            self.timestamp.format("%Y-%m-%dT%H:%M:%SZ"),
            self.level,
            self.message
        )
    }
}

/// Destination type of a sender.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SenderKind {
    Console,
    File,
    RemoteAlert,
    Logkeeper,
    Multi,
}

/// Append-only sink for log records.
///
/// `send` never fails: a sender that cannot deliver a record reports it via
/// tracing and moves on, so task output never stops because one sink broke.
/// Delivery failures surface from `flush`, which returns once every record
/// sent before it has been handed to the destination.
#[async_trait]
pub trait Sender: Send + Sync {
    fn name(&self) -> &str;

    fn kind(&self) -> SenderKind;

    fn levels(&self) -> LevelInfo;

    /// Relay one record. Records below the sender's threshold are dropped.
    fn send(&self, record: &Record);

    async fn flush(&self) -> Result<(), SenderError> {
        Ok(())
    }

    /// Send `message` at the sender's default level.
    fn log(&self, message: &str) {
        self.send(&Record::new(self.levels().default, message));
    }
}

#[cfg(test)]
#[path = "sender_tests.rs"]
mod tests;
