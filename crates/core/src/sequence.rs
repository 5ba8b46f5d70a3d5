// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Process-wide sequence numbers for naming local files.

use std::sync::atomic::{AtomicU64, Ordering};

/// Source of process-unique, increasing sequence numbers.
pub trait SequenceSource: Send + Sync {
    /// Return the next number. The first call returns 0.
    fn next_id(&self) -> u64;
}

/// Lock-free counter. Wraps to 0 after `u64::MAX` without reporting it.
#[derive(Debug, Default)]
pub struct AtomicSequence {
    next: AtomicU64,
}

impl AtomicSequence {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start counting from `first` instead of 0.
    pub fn starting_at(first: u64) -> Self {
        Self { next: AtomicU64::new(first) }
    }
}

impl SequenceSource for AtomicSequence {
    fn next_id(&self) -> u64 {
        self.next.fetch_add(1, Ordering::Relaxed)
    }
}

#[cfg(test)]
#[path = "sequence_tests.rs"]
mod tests;
