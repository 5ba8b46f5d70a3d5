// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Per-task logger configuration.
//!
//! A project declares, per channel, which senders receive the channel's
//! output. Secret-bearing fields are templates over the task's expansions
//! and are resolved once per task before any sender is built.

use eg_core::{Channel, ExpansionError, Expansions, TaskIdentity};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::log_paths::{channel_log_path, log_dir};
use crate::options::AgentOptions;

/// Sender type of one configured log entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogSenderKind {
    File,
    Splunk,
    Logkeeper,
}

/// One unexpanded log entry as declared by the project.
///
/// ```toml
/// [[task]]
/// type = "splunk"
/// splunk_server = "${splunk_url}"
/// splunk_token = "${splunk_token}"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntryTemplate {
    #[serde(rename = "type")]
    pub sender: LogSenderKind,
    #[serde(rename = "splunk_server", default)]
    pub server: String,
    #[serde(rename = "splunk_token", default)]
    pub token: String,
}

impl LogEntryTemplate {
    pub fn new(sender: LogSenderKind) -> Self {
        Self { sender, server: String::new(), token: String::new() }
    }

    pub fn with_credentials(mut self, server: impl Into<String>, token: impl Into<String>) -> Self {
        self.server = server.into();
        self.token = token.into();
        self
    }
}

/// Unexpanded logger configuration, one entry list per channel.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggerConfigTemplate {
    #[serde(default)]
    pub agent: Vec<LogEntryTemplate>,
    #[serde(default)]
    pub system: Vec<LogEntryTemplate>,
    #[serde(default)]
    pub task: Vec<LogEntryTemplate>,
}

impl LoggerConfigTemplate {
    pub fn channel(&self, channel: Channel) -> &[LogEntryTemplate] {
        match channel {
            Channel::Agent => &self.agent,
            Channel::System => &self.system,
            Channel::Task => &self.task,
        }
    }
}

/// Where a task's logkeeper build lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogkeeperCoords {
    pub url: String,
    /// Task id.
    pub builder: String,
    /// Task execution.
    pub build_num: u32,
}

/// A fully resolved log entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogOptions {
    pub sender: LogSenderKind,
    pub server: String,
    pub token: String,
    pub file_path: PathBuf,
    pub logkeeper: LogkeeperCoords,
}

/// Logger configuration resolved for one task execution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedLoggerConfig {
    agent: Vec<LogOptions>,
    system: Vec<LogOptions>,
    task: Vec<LogOptions>,
    log_dir: PathBuf,
}

impl ResolvedLoggerConfig {
    pub fn channel(&self, channel: Channel) -> &[LogOptions] {
        match channel {
            Channel::Agent => &self.agent,
            Channel::System => &self.system,
            Channel::Task => &self.task,
        }
    }

    /// Local file of `channel`, used when the channel has no entries.
    pub fn channel_path(&self, channel: Channel) -> PathBuf {
        self.log_dir.join(channel.file_name())
    }

    pub fn log_dir(&self) -> &Path {
        &self.log_dir
    }
}

/// Resolve `template` for one task execution.
///
/// Server and token are expanded against `expansions` only. If either field
/// fails to expand, the failure is logged and both are left empty; other
/// entries and channels are unaffected.
pub fn resolve_logger_config(
    template: &LoggerConfigTemplate,
    task: &TaskIdentity,
    expansions: &Expansions,
    opts: &AgentOptions,
) -> ResolvedLoggerConfig {
    let coords = LogkeeperCoords {
        url: opts.logkeeper_url.clone(),
        builder: task.id.clone(),
        build_num: task.execution,
    };
    let wd = &opts.working_directory;
    let resolve = |channel: Channel| -> Vec<LogOptions> {
        template
            .channel(channel)
            .iter()
            .map(|entry| {
                resolve_entry(entry, channel, expansions, channel_log_path(wd, channel), &coords)
            })
            .collect()
    };

    ResolvedLoggerConfig {
        agent: resolve(Channel::Agent),
        system: resolve(Channel::System),
        task: resolve(Channel::Task),
        log_dir: log_dir(wd),
    }
}

fn resolve_entry(
    entry: &LogEntryTemplate,
    channel: Channel,
    expansions: &Expansions,
    file_path: PathBuf,
    coords: &LogkeeperCoords,
) -> LogOptions {
    let (server, token) = match expand_credentials(entry, expansions) {
        Ok(pair) => pair,
        Err((field, e)) => {
            tracing::error!(%channel, field, error = %e, "failed to expand log credentials");
            (String::new(), String::new())
        }
    };
    LogOptions { sender: entry.sender, server, token, file_path, logkeeper: coords.clone() }
}

fn expand_credentials(
    entry: &LogEntryTemplate,
    expansions: &Expansions,
) -> Result<(String, String), (&'static str, ExpansionError)> {
    let server = expansions.expand_string(&entry.server).map_err(|e| ("server", e))?;
    let token = expansions.expand_string(&entry.token).map_err(|e| ("token", e))?;
    Ok((server, token))
}

#[cfg(test)]
#[path = "logger_config_tests.rs"]
mod tests;
