// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Archiving a task's local log files to durable storage.

use eg_core::{Channel, TaskContext};
use eg_storage::{Bucket, StorageError};
use futures_util::future::join_all;
use std::fmt;
use std::path::Path;
use thiserror::Error;
use tokio_util::sync::CancellationToken;

use crate::log_paths::channel_log_path;

/// Why one log file did not reach storage.
#[derive(Debug, Error)]
pub enum FileUploadError {
    #[error("failed to stat {file}: {source}")]
    Stat {
        file: &'static str,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to upload {file} to {key}: {source}")]
    Transfer {
        file: &'static str,
        key: String,
        #[source]
        source: StorageError,
    },

    #[error("upload of {file} cancelled")]
    Cancelled { file: &'static str },
}

impl FileUploadError {
    pub fn file(&self) -> &'static str {
        match self {
            FileUploadError::Stat { file, .. }
            | FileUploadError::Transfer { file, .. }
            | FileUploadError::Cancelled { file } => file,
        }
    }
}

/// Errors from uploading a task's logs
#[derive(Debug, Error)]
pub enum UploadError {
    #[error("failed to upload task logs: {}", FailureList(.failures))]
    Failed { failures: Vec<FileUploadError> },

    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl UploadError {
    /// Files that failed, in channel order.
    pub fn failed_files(&self) -> Vec<&'static str> {
        match self {
            UploadError::Failed { failures } => failures.iter().map(|f| f.file()).collect(),
            UploadError::Storage(_) => Vec::new(),
        }
    }
}

struct FailureList<'a>(&'a [FileUploadError]);

impl fmt::Display for FailureList<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, failure) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{}", failure)?;
        }
        Ok(())
    }
}

/// Collects per-file outcomes; resolves to `Ok` only if none failed.
#[derive(Debug, Default)]
pub struct UploadFailures {
    failures: Vec<FileUploadError>,
}

impl UploadFailures {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, outcome: Result<(), FileUploadError>) {
        if let Err(e) = outcome {
            self.failures.push(e);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn len(&self) -> usize {
        self.failures.len()
    }

    pub fn resolve(self) -> Result<(), UploadError> {
        if self.failures.is_empty() {
            Ok(())
        } else {
            Err(UploadError::Failed { failures: self.failures })
        }
    }
}

/// Upload the agent, system and task log files of the current task.
///
/// Each file goes to `logs/<task_id>/<execution>/<file>`. Files that do not
/// exist are skipped. The three uploads run concurrently and the call
/// returns once all have finished; cancelling `cancel` aborts the uploads
/// still in flight.
pub async fn upload_log_files(
    working_dir: &Path,
    tc: &TaskContext,
    bucket: &dyn Bucket,
    cancel: &CancellationToken,
) -> Result<(), UploadError> {
    let Some(task) = tc.task.as_ref() else {
        tracing::debug!("no task assigned, skipping log upload");
        return Ok(());
    };

    let uploads = Channel::ALL.map(|channel| {
        let file = channel.file_name();
        let path = channel_log_path(working_dir, channel);
        let key = task.storage_key(file);
        async move { upload_one(bucket, cancel, file, &path, key).await }
    });

    let mut failures = UploadFailures::new();
    for outcome in join_all(uploads).await {
        failures.add(outcome);
    }
    if !failures.is_empty() {
        tracing::warn!(
            task_id = %task.id,
            execution = task.execution,
            failed = failures.len(),
            "task log upload incomplete"
        );
    }
    failures.resolve()
}

async fn upload_one(
    bucket: &dyn Bucket,
    cancel: &CancellationToken,
    file: &'static str,
    path: &Path,
    key: String,
) -> Result<(), FileUploadError> {
    match tokio::fs::metadata(path).await {
        Ok(_) => {}
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!(file, "log file not present, nothing to upload");
            return Ok(());
        }
        Err(source) => return Err(FileUploadError::Stat { file, source }),
    }

    tokio::select! {
        biased;
        _ = cancel.cancelled() => Err(FileUploadError::Cancelled { file }),
        result = bucket.upload(&key, path) => {
            result.map_err(|source| FileUploadError::Transfer { file, key: key.clone(), source })?;
            tracing::debug!(file, key = %key, "uploaded task log");
            Ok(())
        }
    }
}

#[cfg(test)]
#[path = "upload_tests.rs"]
mod tests;
