// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use thiserror::Error;

/// Errors from constructing or flushing a sender
#[derive(Debug, Error)]
pub enum SenderError {
    #[error("failed to create {name} sender: {source}")]
    Create {
        name: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid remote url '{0}'")]
    InvalidUrl(String),

    #[error("remote senders must be created inside a tokio runtime")]
    NoRuntime,

    #[error("logkeeper request failed: {0}")]
    Logkeeper(String),

    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{sender} failed to deliver {records} records")]
    Undelivered { sender: String, records: usize },

    #[error("{0} writer stopped")]
    WriterStopped(String),

    #[error("sender rejected: {0}")]
    Rejected(String),
}
