// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! eg-agent: Per-task log multiplexing and durable log upload for the agent.
//!
//! Per task, the agent resolves the task's logger configuration, produces a
//! three-channel [`TaskLogger`] before commands run, and uploads the local
//! channel files to storage once they finish.

pub mod agent;
pub mod env;
pub mod log_paths;
pub mod logger_config;
pub mod options;
pub mod producer;
pub mod sender_factory;
pub mod upload;

pub use agent::Agent;
pub use env::AgentEnv;
pub use logger_config::{
    resolve_logger_config, LogEntryTemplate, LogOptions, LogSenderKind, LoggerConfigTemplate,
    LogkeeperCoords, ResolvedLoggerConfig,
};
pub use options::{AgentOptions, OptionsError, StorageOptions};
#[cfg(any(test, feature = "test-support"))]
pub use producer::FakeLoggerBackend;
pub use producer::{
    make_logger_producer, LocalLoggerBackend, LoggerBackend, LoggerError, LoggerMetadata,
    ProducedLogger, TaskLogger,
};
pub use sender_factory::{build_agent_sender, Destination, AGENT_SENDER_NAME};
pub use upload::{upload_log_files, FileUploadError, UploadError, UploadFailures};
