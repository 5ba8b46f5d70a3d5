// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! eg-logging: Senders that relay log records to the console, local files
//! and remote services, and the fan-out sender that combines them.

pub mod alert;
pub mod backend;
pub mod console;
pub mod error;
pub mod file;
pub mod level;
pub mod logkeeper;
pub mod multi;
mod remote;
pub mod sender;
#[cfg(test)]
mod test_server;

pub use alert::{AlertConnection, RemoteAlertSender};
pub use backend::{LocalSenderBackend, SenderBackend};
#[cfg(any(test, feature = "test-support"))]
pub use backend::{FakeSenderBackend, RecordingSender, SenderCall};
pub use console::ConsoleSender;
pub use error::SenderError;
pub use file::RotatingFileSender;
pub use level::{Level, LevelInfo};
pub use logkeeper::{LogkeeperClient, LogkeeperMetadata, LogkeeperSender};
pub use multi::MultiSender;
pub use sender::{Record, Sender, SenderKind};
