// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[yare::parameterized(
    first_run = { "task_1", 0, "agent.log",  "logs/task_1/0/agent.log" },
    retry     = { "task_1", 3, "task.log",   "logs/task_1/3/task.log" },
    long_id   = { "mci_ubuntu_compile_patch_abc123", 1, "system.log", "logs/mci_ubuntu_compile_patch_abc123/1/system.log" },
)]
fn storage_key_layout(id: &str, execution: u32, file: &str, expected: &str) {
    assert_eq!(TaskIdentity::new(id, execution).storage_key(file), expected);
}

#[test]
fn push_keeps_channels_separate() {
    let mut logs = TaskLogs::default();
    assert!(logs.is_empty());

    logs.push(Channel::Task, LogReference { command: "shell.exec".into(), url: "u1".into() });
    logs.push(Channel::Task, LogReference { command: "git.get_project".into(), url: "u2".into() });
    logs.push(Channel::Agent, LogReference { command: "shell.exec".into(), url: "u3".into() });

    assert_eq!(logs.channel(Channel::Task).len(), 2);
    assert_eq!(logs.channel(Channel::Task)[1].url, "u2");
    assert_eq!(logs.channel(Channel::Agent).len(), 1);
    assert!(logs.channel(Channel::System).is_empty());
    assert!(!logs.is_empty());
}

#[test]
fn unassigned_context_has_no_task() {
    let tc = TaskContext::unassigned();
    assert!(tc.task.is_none());
    assert!(tc.logs.is_empty());
}
