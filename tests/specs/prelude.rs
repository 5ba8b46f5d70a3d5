// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared fixtures for the workspace specs.

use std::path::{Path, PathBuf};

pub use eg_agent::{
    Agent, AgentEnv, AgentOptions, LogEntryTemplate, LogSenderKind, LoggerConfigTemplate,
    StorageOptions,
};
pub use eg_core::test_support::task_context;
pub use eg_core::{Channel, TaskContext};
pub use eg_logging::Level;
pub use tempfile::TempDir;
pub use tokio_util::sync::CancellationToken;

/// A task working directory plus a local storage root.
pub struct Workspace {
    wd: TempDir,
    store: TempDir,
}

impl Workspace {
    pub fn new() -> Self {
        Self { wd: TempDir::new().unwrap(), store: TempDir::new().unwrap() }
    }

    pub fn wd(&self) -> &Path {
        self.wd.path()
    }

    pub fn options(&self) -> AgentOptions {
        AgentOptions::new(self.wd(), StorageOptions::Local { root: self.store.path().into() })
    }

    pub fn log_file(&self, channel: Channel) -> PathBuf {
        self.wd().join("evergreen-logs").join(channel.file_name())
    }

    /// Contents of a stored object, if it exists.
    pub fn stored(&self, key: &str) -> Option<String> {
        std::fs::read_to_string(self.store.path().join(key)).ok()
    }

    /// Every stored key, sorted.
    pub fn stored_keys(&self) -> Vec<String> {
        let mut keys = Vec::new();
        collect_keys(self.store.path(), self.store.path(), &mut keys);
        keys.sort();
        keys
    }
}

fn collect_keys(root: &Path, dir: &Path, keys: &mut Vec<String>) {
    let Ok(entries) = std::fs::read_dir(dir) else { return };
    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            collect_keys(root, &path, keys);
        } else if let Ok(rel) = path.strip_prefix(root) {
            keys.push(rel.to_string_lossy().replace('\\', "/"));
        }
    }
}
