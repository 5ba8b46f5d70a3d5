// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Log upload specs

use crate::prelude::*;

#[tokio::test]
async fn no_task_uploads_nothing() {
    let ws = Workspace::new();
    let agent = Agent::new(ws.options(), AgentEnv::default());

    agent.upload_logs(&TaskContext::unassigned(), &CancellationToken::new()).await.unwrap();

    assert!(ws.stored_keys().is_empty());
}

#[tokio::test]
async fn only_existing_files_are_uploaded() {
    let ws = Workspace::new();
    std::fs::create_dir_all(ws.wd().join("evergreen-logs")).unwrap();
    std::fs::write(ws.log_file(Channel::Task), "output\n").unwrap();
    let agent = Agent::new(ws.options(), AgentEnv::default());
    let tc = task_context("task_xyz", 3, &[]);

    agent.upload_logs(&tc, &CancellationToken::new()).await.unwrap();

    assert_eq!(ws.stored_keys(), vec!["logs/task_xyz/3/task.log"]);
    assert_eq!(ws.stored("logs/task_xyz/3/task.log").as_deref(), Some("output\n"));
}

#[tokio::test]
async fn unwritable_storage_names_each_failed_file() {
    let ws = Workspace::new();
    std::fs::create_dir_all(ws.wd().join("evergreen-logs")).unwrap();
    std::fs::write(ws.log_file(Channel::Agent), "a\n").unwrap();
    std::fs::write(ws.log_file(Channel::Task), "t\n").unwrap();
    let blocker = ws.wd().join("blocker");
    std::fs::write(&blocker, "not a directory").unwrap();
    let mut opts = ws.options();
    opts.storage = StorageOptions::Local { root: blocker };
    let agent = Agent::new(opts, AgentEnv::default());
    let tc = task_context("task_xyz", 0, &[]);

    let err = agent.upload_logs(&tc, &CancellationToken::new()).await.unwrap_err();

    assert_eq!(err.failed_files(), vec!["agent.log", "task.log"]);
}
