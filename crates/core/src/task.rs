// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Per-task state shared between the logger producer and the upload pipeline.

use serde::{Deserialize, Serialize};

use crate::channel::Channel;
use crate::expansions::Expansions;

/// Identity of one execution of a task.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TaskIdentity {
    pub id: String,
    /// Attempt counter; 0 for the first run of a task.
    pub execution: u32,
}

impl TaskIdentity {
    pub fn new(id: impl Into<String>, execution: u32) -> Self {
        Self { id: id.into(), execution }
    }

    /// Durable storage key for one of this execution's log files.
    ///
    /// Format: `logs/<task_id>/<execution>/<file_name>`
    pub fn storage_key(&self, file_name: &str) -> String {
        format!("logs/{}/{}/{}", self.id, self.execution, file_name)
    }
}

/// Pointer to a remote copy of a channel's log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogReference {
    /// Name of the command that configured the logger.
    pub command: String,
    pub url: String,
}

/// Remote log references recorded for a task, one list per channel.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskLogs {
    #[serde(default)]
    pub agent: Vec<LogReference>,
    #[serde(default)]
    pub system: Vec<LogReference>,
    #[serde(default)]
    pub task: Vec<LogReference>,
}

impl TaskLogs {
    pub fn channel(&self, channel: Channel) -> &[LogReference] {
        match channel {
            Channel::Agent => &self.agent,
            Channel::System => &self.system,
            Channel::Task => &self.task,
        }
    }

    pub fn push(&mut self, channel: Channel, reference: LogReference) {
        match channel {
            Channel::Agent => self.agent.push(reference),
            Channel::System => self.system.push(reference),
            Channel::Task => self.task.push(reference),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.agent.is_empty() && self.system.is_empty() && self.task.is_empty()
    }
}

/// State of the task currently assigned to the agent.
///
/// `task` is `None` until the agent has been handed a task; operations that
/// need an identity treat that as "nothing to do".
#[derive(Debug, Clone, Default)]
pub struct TaskContext {
    pub task: Option<TaskIdentity>,
    pub expansions: Expansions,
    pub logs: TaskLogs,
}

impl TaskContext {
    pub fn new(task: TaskIdentity, expansions: Expansions) -> Self {
        Self { task: Some(task), expansions, logs: TaskLogs::default() }
    }

    /// Context for an agent that has not been assigned a task.
    pub fn unassigned() -> Self {
        Self::default()
    }
}

#[cfg(test)]
#[path = "task_tests.rs"]
mod tests;
