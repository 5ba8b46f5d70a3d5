// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fan-out sender.

use async_trait::async_trait;

use crate::error::SenderError;
use crate::level::{Level, LevelInfo};
use crate::sender::{Record, Sender, SenderKind};

/// Forwards every record to an ordered, fixed set of child senders.
///
/// Children apply their own thresholds, so the fan-out itself accepts every
/// level.
pub struct MultiSender {
    name: String,
    levels: LevelInfo,
    senders: Vec<Box<dyn Sender>>,
}

impl MultiSender {
    pub fn new(name: impl Into<String>, senders: Vec<Box<dyn Sender>>) -> Self {
        Self { name: name.into(), levels: LevelInfo::new(Level::Info, Level::Trace), senders }
    }

    pub fn children(&self) -> &[Box<dyn Sender>] {
        &self.senders
    }

    /// Kinds of the child senders, in forwarding order.
    pub fn kinds(&self) -> Vec<SenderKind> {
        self.senders.iter().map(|s| s.kind()).collect()
    }

    pub fn len(&self) -> usize {
        self.senders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.senders.is_empty()
    }

    /// Send `message` at `level` to every child.
    pub fn write(&self, level: Level, message: &str) {
        self.send(&Record::new(level, message));
    }
}

#[async_trait]
impl Sender for MultiSender {
    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> SenderKind {
        SenderKind::Multi
    }

    fn levels(&self) -> LevelInfo {
        self.levels
    }

    fn send(&self, record: &Record) {
        for sender in &self.senders {
            sender.send(record);
        }
    }

    /// Flush every child; the first failure is returned after all were tried.
    async fn flush(&self) -> Result<(), SenderError> {
        let mut first_err = None;
        for sender in &self.senders {
            if let Err(e) = sender.flush().await {
                tracing::warn!(sender = sender.name(), error = %e, "failed to flush sender");
                first_err.get_or_insert(e);
            }
        }
        match first_err {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

impl std::fmt::Debug for MultiSender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MultiSender")
            .field("name", &self.name)
            .field("kinds", &self.kinds())
            .finish()
    }
}

#[cfg(test)]
#[path = "multi_tests.rs"]
mod tests;
