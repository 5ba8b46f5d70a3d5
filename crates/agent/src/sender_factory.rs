// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The agent's own diagnostic sender, independent of per-task logging.

use eg_core::SequenceSource;
use eg_logging::{Level, LevelInfo, MultiSender, SenderBackend, SenderError};
use std::path::PathBuf;

pub const AGENT_SENDER_NAME: &str = "evergreen.agent";

/// Destination selectors that force console output.
pub const LOCAL_LOGGING_OVERRIDE: &str = "LOCAL";
pub const STDOUT_LOGGING_OVERRIDE: &str = "STDOUT";
const LEGACY_CONSOLE_OVERRIDE: &str = "--";

const ALERT_LEVELS: LevelInfo = LevelInfo::new(Level::Alert, Level::Alert);
const LOCAL_LEVELS: LevelInfo = LevelInfo::new(Level::Info, Level::Debug);

/// Where the agent's local log goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Destination {
    /// No local sender.
    None,
    Console,
    /// Rotating file named `<prefix>-<pid>-<sequence>.log`.
    File { prefix: String },
}

impl Destination {
    pub fn parse(selector: &str) -> Self {
        match selector {
            "" => Destination::None,
            LOCAL_LOGGING_OVERRIDE | STDOUT_LOGGING_OVERRIDE | LEGACY_CONSOLE_OVERRIDE => {
                Destination::Console
            }
            prefix => Destination::File { prefix: prefix.to_string() },
        }
    }
}

/// `<prefix>-<pid>-<sequence>.log`
pub fn agent_log_file_name(prefix: &str, pid: u32, sequence: u64) -> String {
    format!("{}-{}-{}.log", prefix, pid, sequence)
}

/// Build the agent's fan-out sender.
///
/// Adds a remote alert sender (alert level only) unless this agent was
/// launched by another agent's command, then the local sender chosen by
/// `destination`. If any sender fails to build, the senders already built
/// are dropped and the error is returned.
pub fn build_agent_sender(
    env: &crate::env::AgentEnv,
    destination: &str,
    sequence: &dyn SequenceSource,
    backend: &dyn SenderBackend,
) -> Result<MultiSender, SenderError> {
    let mut senders = Vec::new();

    if env.launched_by_agent {
        tracing::info!("agent started via command, not configuring external logger");
    } else if let Some(conn) = &env.alert {
        tracing::info!("configuring remote alert sender");
        senders.push(backend.remote_alert(AGENT_SENDER_NAME, conn, ALERT_LEVELS)?);
    }

    match Destination::parse(destination) {
        Destination::None => {}
        Destination::Console => {
            senders.push(backend.console(AGENT_SENDER_NAME, LOCAL_LEVELS)?);
        }
        Destination::File { prefix } => {
            let path = PathBuf::from(agent_log_file_name(
                &prefix,
                std::process::id(),
                sequence.next_id(),
            ));
            senders.push(backend.file(AGENT_SENDER_NAME, &path, LOCAL_LEVELS)?);
        }
    }

    Ok(MultiSender::new(AGENT_SENDER_NAME, senders))
}

#[cfg(test)]
#[path = "sender_factory_tests.rs"]
mod tests;
