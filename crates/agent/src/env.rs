// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Centralized environment variable access for the agent crate.

use eg_logging::AlertConnection;

/// Set in the environment of processes the agent launches. An agent that
/// sees it was started by another agent's command.
pub const AGENT_PID_MARKER: &str = "EVR_AGENT_PID";

pub const ALERT_SERVER_VAR: &str = "SPLUNK_SERVER_URL";
pub const ALERT_TOKEN_VAR: &str = "SPLUNK_CLIENT_TOKEN";
pub const ALERT_CHANNEL_VAR: &str = "SPLUNK_CLIENT_CHANNEL";

/// Process environment relevant to the agent's own logging.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AgentEnv {
    /// True when [`AGENT_PID_MARKER`] is set to a non-empty value.
    pub launched_by_agent: bool,
    /// Remote alerting connection, present only when fully populated.
    pub alert: Option<AlertConnection>,
}

impl AgentEnv {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable lookup. Empty values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| lookup(key).filter(|v| !v.is_empty());
        let conn = AlertConnection {
            server_url: get(ALERT_SERVER_VAR).unwrap_or_default(),
            token: get(ALERT_TOKEN_VAR).unwrap_or_default(),
            channel: get(ALERT_CHANNEL_VAR),
        };
        Self {
            launched_by_agent: get(AGENT_PID_MARKER).is_some(),
            alert: conn.is_populated().then_some(conn),
        }
    }
}

#[cfg(test)]
#[path = "env_tests.rs"]
mod tests;
