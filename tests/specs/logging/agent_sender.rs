// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Agent sender specs

use crate::prelude::*;
use eg_logging::SenderKind;

#[test]
fn file_destination_writes_numbered_files() {
    let ws = Workspace::new();
    let prefix = ws.wd().join("agent");
    let mut opts = ws.options();
    opts.log_prefix = prefix.display().to_string();
    let agent = Agent::new(opts, AgentEnv::default());

    let first = agent.agent_sender().unwrap();
    let second = agent.agent_sender().unwrap();
    first.write(Level::Info, "first sender");
    second.write(Level::Debug, "second sender");

    let pid = std::process::id();
    let read = |n: u64| {
        std::fs::read_to_string(format!("{}-{}-{}.log", prefix.display(), pid, n)).unwrap()
    };
    assert!(read(0).contains("first sender"));
    assert!(read(1).contains("second sender"));
}

#[test]
fn child_agent_skips_alerting() {
    let ws = Workspace::new();
    let env = AgentEnv::from_lookup(|key| match key {
        "EVR_AGENT_PID" => Some("1234".into()),
        "SPLUNK_SERVER_URL" => Some("https://hec.example.com".into()),
        "SPLUNK_CLIENT_TOKEN" => Some("token".into()),
        _ => None,
    });
    let mut opts = ws.options();
    opts.log_prefix = "LOCAL".into();
    let agent = Agent::new(opts, env);

    let sender = agent.agent_sender().unwrap();

    assert_eq!(sender.kinds(), vec![SenderKind::Console]);
}
