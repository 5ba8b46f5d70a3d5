// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! eg-core: Task identity, channels and expansion primitives shared by the
//! agent's logging crates.

pub mod channel;
pub mod expansions;
pub mod sequence;
pub mod task;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use channel::{Channel, TASK_LOG_DIRECTORY};
pub use expansions::{ExpansionError, Expansions};
pub use sequence::{AtomicSequence, SequenceSource};
pub use task::{LogReference, TaskContext, TaskIdentity, TaskLogs};
