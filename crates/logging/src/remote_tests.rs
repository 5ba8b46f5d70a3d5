// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::level::Level;
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;

#[derive(Clone, Default)]
struct CollectingSink {
    batches: Arc<Mutex<Vec<Vec<String>>>>,
    fail: bool,
}

impl RemoteSink for CollectingSink {
    async fn post(&self, batch: &[Record]) -> Result<(), SenderError> {
        self.batches.lock().push(batch.iter().map(|r| r.message.clone()).collect());
        if self.fail {
            return Err(SenderError::Rejected("service unavailable".into()));
        }
        Ok(())
    }
}

impl CollectingSink {
    fn delivered(&self) -> Vec<String> {
        self.batches.lock().iter().flatten().cloned().collect()
    }

    async fn wait_for(&self, count: usize) {
        for _ in 0..200 {
            if self.delivered().len() >= count {
                return;
            }
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
    }
}

#[tokio::test]
async fn delivers_records_in_order() {
    let sink = CollectingSink::default();
    let writer = BackgroundWriter::spawn("remote", sink.clone()).unwrap();

    for msg in ["a", "b", "c"] {
        writer.enqueue(&Record::new(Level::Info, msg));
    }
    sink.wait_for(3).await;

    assert_eq!(sink.delivered(), vec!["a", "b", "c"]);
}

#[tokio::test]
async fn failed_batches_do_not_stop_the_writer() {
    let sink = CollectingSink { fail: true, ..Default::default() };
    let writer = BackgroundWriter::spawn("remote", sink.clone()).unwrap();

    writer.enqueue(&Record::new(Level::Alert, "first"));
    sink.wait_for(1).await;
    writer.enqueue(&Record::new(Level::Alert, "second"));
    sink.wait_for(2).await;

    assert_eq!(sink.delivered(), vec!["first", "second"]);
}

#[test]
fn spawn_outside_runtime_fails() {
    let err = BackgroundWriter::spawn("remote", CollectingSink::default()).err().unwrap();
    assert!(matches!(err, SenderError::NoRuntime));
}

#[tokio::test]
async fn flush_returns_after_queued_records_are_posted() {
    let sink = CollectingSink::default();
    let writer = BackgroundWriter::spawn("remote", sink.clone()).unwrap();

    for msg in ["a", "b", "c"] {
        writer.enqueue(&Record::new(Level::Info, msg));
    }
    writer.flush().await.unwrap();

    assert_eq!(sink.delivered(), vec!["a", "b", "c"]);
}

#[tokio::test]
async fn flush_with_nothing_queued_succeeds() {
    let writer = BackgroundWriter::spawn("remote", CollectingSink::default()).unwrap();
    writer.flush().await.unwrap();
}

#[tokio::test]
async fn flush_reports_rejected_records_once() {
    let sink = CollectingSink { fail: true, ..Default::default() };
    let writer = BackgroundWriter::spawn("remote", sink.clone()).unwrap();

    writer.enqueue(&Record::new(Level::Alert, "first"));
    writer.enqueue(&Record::new(Level::Alert, "second"));
    let err = writer.flush().await.unwrap_err();

    assert!(matches!(err, SenderError::Undelivered { records: 2, .. }), "{}", err);
    writer.flush().await.unwrap();
}

#[tokio::test]
async fn flush_reports_records_dropped_by_a_full_buffer() {
    let sink = CollectingSink::default();
    let writer = BackgroundWriter::spawn("remote", sink.clone()).unwrap();

    // The current-thread runtime does not run the writer until we yield
    for n in 0..BUFFER_RECORDS + 5 {
        writer.enqueue(&Record::new(Level::Info, format!("record {}", n)));
    }
    let err = writer.flush().await.unwrap_err();

    assert!(matches!(err, SenderError::Undelivered { records: 5, .. }), "{}", err);
    assert_eq!(sink.delivered().len(), BUFFER_RECORDS);
}
