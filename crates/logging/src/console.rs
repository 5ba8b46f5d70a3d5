// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Native console sender.

use async_trait::async_trait;
use parking_lot::Mutex;
use std::io::Write;

use crate::error::SenderError;
use crate::level::LevelInfo;
use crate::sender::{Record, Sender, SenderKind};

/// Writes formatted records to standard output (or any writer).
pub struct ConsoleSender {
    name: String,
    levels: LevelInfo,
    out: Mutex<Box<dyn Write + Send>>,
}

impl ConsoleSender {
    pub fn new(name: impl Into<String>, levels: LevelInfo) -> Self {
        Self::with_writer(name, levels, Box::new(std::io::stdout()))
    }

    pub fn with_writer(
        name: impl Into<String>,
        levels: LevelInfo,
        out: Box<dyn Write + Send>,
    ) -> Self {
        Self { name: name.into(), levels, out: Mutex::new(out) }
    }
}

#[async_trait]
impl Sender for ConsoleSender {
    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> SenderKind {
        SenderKind::Console
    }

    fn levels(&self) -> LevelInfo {
        self.levels
    }

    fn send(&self, record: &Record) {
        if !self.levels.enabled(record.level) {
            return;
        }
        let mut out = self.out.lock();
        if let Err(e) = writeln!(out, "[{}] {}", self.name, record) {
            tracing::warn!(sender = %self.name, error = %e, "failed to write console log");
        }
    }

    async fn flush(&self) -> Result<(), SenderError> {
        self.out.lock().flush()?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "console_tests.rs"]
mod tests;
