// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Append-only file sender with size-based rotation.

use async_trait::async_trait;
use parking_lot::Mutex;
use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::error::SenderError;
use crate::level::LevelInfo;
use crate::sender::{Record, Sender, SenderKind};

const DEFAULT_MAX_BYTES: u64 = 100 * 1024 * 1024;
const DEFAULT_MAX_BACKUPS: usize = 5;

/// Appends formatted records to a file, rotating it once it grows past a
/// size cap.
///
/// Rotation renames `<path>` to `<path>.1` (shifting older backups up to
/// `<path>.<max_backups>`, dropping the oldest) and reopens `<path>`.
pub struct RotatingFileSender {
    name: String,
    levels: LevelInfo,
    path: PathBuf,
    max_bytes: u64,
    max_backups: usize,
    state: Mutex<FileState>,
}

struct FileState {
    file: File,
    written: u64,
}

impl RotatingFileSender {
    /// Open (or create) `path` for appending.
    ///
    /// The parent directory must already exist; an unwritable path is a
    /// construction error.
    pub fn new(
        name: impl Into<String>,
        path: impl Into<PathBuf>,
        levels: LevelInfo,
    ) -> Result<Self, SenderError> {
        let name = name.into();
        let path = path.into();
        let file = open_append(&path)
            .map_err(|source| SenderError::Create { name: name.clone(), source })?;
        let written = file.metadata().map(|m| m.len()).unwrap_or(0);
        Ok(Self {
            name,
            levels,
            path,
            max_bytes: DEFAULT_MAX_BYTES,
            max_backups: DEFAULT_MAX_BACKUPS,
            state: Mutex::new(FileState { file, written }),
        })
    }

    pub fn with_max_bytes(mut self, max_bytes: u64) -> Self {
        self.max_bytes = max_bytes;
        self
    }

    pub fn with_max_backups(mut self, max_backups: usize) -> Self {
        self.max_backups = max_backups;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn backup_path(&self, n: usize) -> PathBuf {
        let mut name = self.path.as_os_str().to_owned();
        name.push(format!(".{}", n));
        PathBuf::from(name)
    }

    fn rotate(&self, state: &mut FileState) -> std::io::Result<()> {
        state.file.flush()?;
        if self.max_backups == 0 {
            state.file = OpenOptions::new().write(true).truncate(true).open(&self.path)?;
            state.written = 0;
            return Ok(());
        }
        for n in (1..self.max_backups).rev() {
            let from = self.backup_path(n);
            if from.exists() {
                fs::rename(&from, self.backup_path(n + 1))?;
            }
        }
        fs::rename(&self.path, self.backup_path(1))?;
        state.file = open_append(&self.path)?;
        state.written = 0;
        Ok(())
    }

    fn write_line(&self, line: &str) -> std::io::Result<()> {
        let mut state = self.state.lock();
        let len = line.len() as u64 + 1;
        if state.written > 0 && state.written + len > self.max_bytes {
            self.rotate(&mut state)?;
        }
        writeln!(state.file, "{}", line)?;
        state.written += len;
        Ok(())
    }
}

fn open_append(path: &Path) -> std::io::Result<File> {
    OpenOptions::new().create(true).append(true).open(path)
}

#[async_trait]
impl Sender for RotatingFileSender {
    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> SenderKind {
        SenderKind::File
    }

    fn levels(&self) -> LevelInfo {
        self.levels
    }

    fn send(&self, record: &Record) {
        if !self.levels.enabled(record.level) {
            return;
        }
        if let Err(e) = self.write_line(&record.to_string()) {
            tracing::warn!(
                sender = %self.name,
                path = %self.path.display(),
                error = %e,
                "failed to write log file"
            );
        }
    }

    async fn flush(&self) -> Result<(), SenderError> {
        self.state.lock().file.flush()?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "file_tests.rs"]
mod tests;
