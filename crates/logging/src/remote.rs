// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Background delivery for senders backed by a remote service.
//!
//! `send` on a remote sender must not block on the network, so records go
//! through a bounded channel to one writer task per sender, which posts them
//! in batches. A flush request travels through the same channel and is
//! acknowledged once everything queued ahead of it has been posted.

use std::future::Future;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::mpsc::{self, error::TrySendError};
use tokio::sync::oneshot;

use crate::error::SenderError;
use crate::sender::Record;

const BUFFER_RECORDS: usize = 1024;
const MAX_BATCH: usize = 100;

/// Remote endpoint accepting batches of records.
pub(crate) trait RemoteSink: Send + Sync + 'static {
    fn post(&self, batch: &[Record]) -> impl Future<Output = Result<(), SenderError>> + Send;
}

enum Message {
    Record(Record),
    /// Answered with the number of records that failed to post since the
    /// previous flush.
    Flush(oneshot::Sender<usize>),
}

/// Handle to a spawned writer task. Dropping it lets the task drain and exit.
pub(crate) struct BackgroundWriter {
    name: String,
    tx: mpsc::Sender<Message>,
    /// Records dropped at enqueue time since the previous flush.
    dropped: AtomicUsize,
}

impl BackgroundWriter {
    /// Spawn the writer on the current tokio runtime.
    pub(crate) fn spawn<S: RemoteSink>(name: &str, sink: S) -> Result<Self, SenderError> {
        let handle = tokio::runtime::Handle::try_current().map_err(|_| SenderError::NoRuntime)?;
        let (tx, rx) = mpsc::channel(BUFFER_RECORDS);
        handle.spawn(deliver(name.to_string(), sink, rx));
        Ok(Self { name: name.to_string(), tx, dropped: AtomicUsize::new(0) })
    }

    /// Queue a record without waiting. Records are dropped when the buffer
    /// is full; the next flush reports them.
    pub(crate) fn enqueue(&self, record: &Record) {
        match self.tx.try_send(Message::Record(record.clone())) {
            Ok(()) => {}
            Err(TrySendError::Full(_)) => {
                self.dropped.fetch_add(1, Ordering::Relaxed);
                tracing::warn!(sender = %self.name, "remote log buffer full, dropping record");
            }
            Err(TrySendError::Closed(_)) => {
                self.dropped.fetch_add(1, Ordering::Relaxed);
                tracing::warn!(sender = %self.name, "remote log writer stopped, dropping record");
            }
        }
    }

    /// Wait until every record queued before this call has been posted.
    ///
    /// Fails if any record since the previous flush was dropped or rejected
    /// by the remote service, or if the writer task is gone.
    pub(crate) async fn flush(&self) -> Result<(), SenderError> {
        let (ack, done) = oneshot::channel();
        let failed = match self.tx.send(Message::Flush(ack)).await {
            Ok(()) => done.await.ok(),
            Err(_) => None,
        };
        let dropped = self.dropped.swap(0, Ordering::Relaxed);
        let Some(failed) = failed else {
            return Err(SenderError::WriterStopped(self.name.clone()));
        };
        match failed + dropped {
            0 => Ok(()),
            records => Err(SenderError::Undelivered { sender: self.name.clone(), records }),
        }
    }
}

async fn deliver<S: RemoteSink>(name: String, sink: S, mut rx: mpsc::Receiver<Message>) {
    let mut batch = Vec::with_capacity(MAX_BATCH);
    let mut failed = 0;
    while let Some(message) = rx.recv().await {
        let mut flush = match message {
            Message::Record(record) => {
                batch.push(record);
                None
            }
            Message::Flush(ack) => Some(ack),
        };
        while flush.is_none() && batch.len() < MAX_BATCH {
            match rx.try_recv() {
                Ok(Message::Record(record)) => batch.push(record),
                Ok(Message::Flush(ack)) => flush = Some(ack),
                Err(_) => break,
            }
        }
        if !batch.is_empty() {
            if let Err(e) = sink.post(&batch).await {
                tracing::warn!(
                    sender = %name,
                    records = batch.len(),
                    error = %e,
                    "failed to deliver remote log batch"
                );
                failed += batch.len();
            }
            batch.clear();
        }
        if let Some(ack) = flush {
            let _ = ack.send(std::mem::take(&mut failed));
        }
    }
    tracing::debug!(sender = %name, "remote log writer finished");
}

#[cfg(test)]
#[path = "remote_tests.rs"]
mod tests;
