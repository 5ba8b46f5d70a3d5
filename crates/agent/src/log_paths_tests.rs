// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[yare::parameterized(
    agent  = { Channel::Agent,  "evergreen-logs/agent.log" },
    system = { Channel::System, "evergreen-logs/system.log" },
    task   = { Channel::Task,   "evergreen-logs/task.log" },
)]
fn channel_path_builds_expected(channel: Channel, expected_suffix: &str) {
    assert_eq!(
        channel_log_path(Path::new("/data/work"), channel),
        PathBuf::from(format!("/data/work/{}", expected_suffix))
    );
}

#[test]
fn log_dir_is_fixed_under_working_dir() {
    assert_eq!(log_dir(Path::new("/data/work")), PathBuf::from("/data/work/evergreen-logs"));
}
