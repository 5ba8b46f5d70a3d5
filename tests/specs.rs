// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![allow(clippy::panic)]
#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

//! Workspace-level behavioral specs for task log handling.

#[path = "specs/prelude.rs"]
mod prelude;

#[path = "specs/logging"]
mod logging {
    mod agent_sender;
    mod lifecycle;
    mod upload;
}
