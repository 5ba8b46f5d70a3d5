// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! eg-storage: Key-addressed durable storage for finished log files.

pub mod bucket;

pub use bucket::{Bucket, HttpBucket, LocalBucket, StorageError};
#[cfg(any(test, feature = "test-support"))]
pub use bucket::{FakeBucket, UploadCall};
