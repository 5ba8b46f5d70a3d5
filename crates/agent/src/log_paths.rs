// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Local paths of a task's channel log files.

use eg_core::{Channel, TASK_LOG_DIRECTORY};
use std::path::{Path, PathBuf};

/// `<working_dir>/evergreen-logs`
pub fn log_dir(working_dir: &Path) -> PathBuf {
    working_dir.join(TASK_LOG_DIRECTORY)
}

/// `<working_dir>/evergreen-logs/<channel>.log`
pub fn channel_log_path(working_dir: &Path, channel: Channel) -> PathBuf {
    log_dir(working_dir).join(channel.file_name())
}

#[cfg(test)]
#[path = "log_paths_tests.rs"]
mod tests;
