// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Task logging lifecycle specs
//!
//! Produce a task logger, write through each channel, then archive the
//! channel files.

use crate::prelude::*;

fn file_template() -> LoggerConfigTemplate {
    LoggerConfigTemplate {
        agent: vec![LogEntryTemplate::new(LogSenderKind::File)],
        system: vec![LogEntryTemplate::new(LogSenderKind::File)],
        task: vec![LogEntryTemplate::new(LogSenderKind::File)],
    }
}

#[tokio::test]
async fn channels_write_to_their_own_files_and_upload() {
    let ws = Workspace::new();
    let agent = Agent::new(ws.options(), AgentEnv::default());
    let mut tc = task_context("task_abc", 1, &[]);

    let logger = agent.make_logger_producer(&mut tc, &file_template(), "shell.exec").await.unwrap();
    logger.log(Channel::Agent, Level::Info, "starting command");
    logger.log(Channel::System, Level::Info, "load average 0.4");
    logger.log(Channel::Task, Level::Info, "hello world");
    logger.log(Channel::Task, Level::Trace, "below threshold");
    logger.flush().await.unwrap();

    let task_log = std::fs::read_to_string(ws.log_file(Channel::Task)).unwrap();
    assert!(task_log.contains("hello world"));
    assert!(!task_log.contains("starting command"));
    assert!(!task_log.contains("below threshold"));

    agent.upload_logs(&tc, &CancellationToken::new()).await.unwrap();

    assert_eq!(
        ws.stored_keys(),
        vec![
            "logs/task_abc/1/agent.log",
            "logs/task_abc/1/system.log",
            "logs/task_abc/1/task.log",
        ]
    );
    let stored = ws.stored("logs/task_abc/1/system.log").unwrap();
    assert!(stored.contains("load average 0.4"));
}

#[tokio::test]
async fn empty_template_still_logs_locally() {
    let ws = Workspace::new();
    let agent = Agent::new(ws.options(), AgentEnv::default());
    let mut tc = task_context("task_abc", 0, &[]);

    let logger = agent
        .make_logger_producer(&mut tc, &LoggerConfigTemplate::default(), "shell.exec")
        .await
        .unwrap();
    logger.log(Channel::Task, Level::Warning, "no config");

    assert!(std::fs::read_to_string(ws.log_file(Channel::Task)).unwrap().contains("no config"));
    assert!(tc.logs.is_empty());
}

#[tokio::test]
async fn bad_credentials_fall_back_to_local_file() {
    let ws = Workspace::new();
    let agent = Agent::new(ws.options(), AgentEnv::default());
    let template = LoggerConfigTemplate {
        task: vec![LogEntryTemplate::new(LogSenderKind::Splunk)
            .with_credentials("${splunk_server", "${splunk_token}")],
        ..Default::default()
    };
    let mut tc = task_context("task_abc", 0, &[("splunk_token", "secret")]);

    let logger = agent.make_logger_producer(&mut tc, &template, "shell.exec").await.unwrap();
    logger.log(Channel::Task, Level::Info, "still recorded");

    let task_log = std::fs::read_to_string(ws.log_file(Channel::Task)).unwrap();
    assert!(task_log.contains("still recorded"));
}
