// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared test helpers for use across crates.
//!
//! Gated behind `#[cfg(any(test, feature = "test-support"))]`.

use crate::{Expansions, TaskContext, TaskIdentity};

/// Build a task context with the given identity and expansion bindings.
pub fn task_context(id: &str, execution: u32, bindings: &[(&str, &str)]) -> TaskContext {
    let expansions: Expansions = bindings.iter().map(|(k, v)| (*k, *v)).collect();
    TaskContext::new(TaskIdentity::new(id, execution), expansions)
}
