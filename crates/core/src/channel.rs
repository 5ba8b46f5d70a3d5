// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Log channels collected for every task.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Directory, relative to the agent's working directory, holding the local
/// log files of the task currently running there.
pub const TASK_LOG_DIRECTORY: &str = "evergreen-logs";

/// An independently collected log stream of a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Channel {
    /// Agent-internal output about the task.
    Agent,
    /// Host/system output captured while the task runs.
    System,
    /// Output of the task's commands.
    Task,
}

impl Channel {
    /// All channels in their canonical order.
    pub const ALL: [Channel; 3] = [Channel::Agent, Channel::System, Channel::Task];

    pub fn as_str(self) -> &'static str {
        match self {
            Channel::Agent => "agent",
            Channel::System => "system",
            Channel::Task => "task",
        }
    }

    /// Fixed local file name for this channel inside [`TASK_LOG_DIRECTORY`].
    pub fn file_name(self) -> &'static str {
        match self {
            Channel::Agent => "agent.log",
            Channel::System => "system.log",
            Channel::Task => "task.log",
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
#[path = "channel_tests.rs"]
mod tests;
