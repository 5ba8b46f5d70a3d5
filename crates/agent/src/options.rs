// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Agent options relevant to task logging.

use eg_storage::{Bucket, HttpBucket, LocalBucket, StorageError};
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Errors from loading agent options
#[derive(Debug, Error)]
pub enum OptionsError {
    #[error("invalid agent options: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Where finished log files are archived.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum StorageOptions {
    /// A local or mounted directory.
    Local { root: PathBuf },
    /// An HTTP object store accepting `PUT <base_url>/<key>`.
    Http {
        base_url: String,
        #[serde(default)]
        token: Option<String>,
    },
}

impl StorageOptions {
    pub fn bucket(&self) -> Result<Box<dyn Bucket>, StorageError> {
        Ok(match self {
            StorageOptions::Local { root } => Box::new(LocalBucket::new(root.clone())),
            StorageOptions::Http { base_url, token } => {
                Box::new(HttpBucket::new(base_url, token.clone())?)
            }
        })
    }
}

/// Agent options
///
/// ```toml
/// working_directory = "/data/mci"
/// logkeeper_url = "https://logkeeper.example.com"
/// log_prefix = "/var/log/evergreen/agent"
/// upload_timeout_ms = 600000
///
/// [storage]
/// type = "local"
/// root = "/mnt/task-logs"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AgentOptions {
    /// Directory tasks run in; task logs live in its `evergreen-logs`.
    pub working_directory: PathBuf,
    /// Base URL of the logkeeper service for remote log references.
    #[serde(default)]
    pub logkeeper_url: String,
    /// Destination selector for the agent's own log (see `sender_factory`).
    #[serde(default)]
    pub log_prefix: String,
    #[serde(default)]
    pub upload_timeout_ms: Option<u64>,
    pub storage: StorageOptions,
}

impl AgentOptions {
    pub fn new(working_directory: impl Into<PathBuf>, storage: StorageOptions) -> Self {
        Self {
            working_directory: working_directory.into(),
            logkeeper_url: String::new(),
            log_prefix: String::new(),
            upload_timeout_ms: None,
            storage,
        }
    }

    pub fn from_toml(content: &str) -> Result<Self, OptionsError> {
        Ok(toml::from_str(content)?)
    }

    /// Deadline for uploading a task's logs, if any.
    pub fn upload_timeout(&self) -> Option<Duration> {
        self.upload_timeout_ms.map(Duration::from_millis)
    }
}

#[cfg(test)]
#[path = "options_tests.rs"]
mod tests;
