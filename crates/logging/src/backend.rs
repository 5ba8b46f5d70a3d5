// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Sender construction.

use std::path::Path;

use crate::alert::{AlertConnection, RemoteAlertSender};
use crate::console::ConsoleSender;
use crate::error::SenderError;
use crate::file::RotatingFileSender;
use crate::level::LevelInfo;
use crate::sender::Sender;

/// Constructs the individual senders that get combined into fan-outs.
pub trait SenderBackend: Send + Sync {
    fn console(&self, name: &str, levels: LevelInfo) -> Result<Box<dyn Sender>, SenderError>;

    fn file(&self, name: &str, path: &Path, levels: LevelInfo)
        -> Result<Box<dyn Sender>, SenderError>;

    fn remote_alert(
        &self,
        name: &str,
        conn: &AlertConnection,
        levels: LevelInfo,
    ) -> Result<Box<dyn Sender>, SenderError>;
}

/// Backend building real console, file and alerting senders.
#[derive(Clone, Copy, Debug, Default)]
pub struct LocalSenderBackend;

impl SenderBackend for LocalSenderBackend {
    fn console(&self, name: &str, levels: LevelInfo) -> Result<Box<dyn Sender>, SenderError> {
        Ok(Box::new(ConsoleSender::new(name, levels)))
    }

    fn file(
        &self,
        name: &str,
        path: &Path,
        levels: LevelInfo,
    ) -> Result<Box<dyn Sender>, SenderError> {
        Ok(Box::new(RotatingFileSender::new(name, path, levels)?))
    }

    fn remote_alert(
        &self,
        name: &str,
        conn: &AlertConnection,
        levels: LevelInfo,
    ) -> Result<Box<dyn Sender>, SenderError> {
        Ok(Box::new(RemoteAlertSender::new(name, conn, levels)?))
    }
}

#[cfg(any(test, feature = "test-support"))]
#[cfg_attr(coverage_nightly, coverage(off))]
mod fake {
    use super::{AlertConnection, SenderBackend};
    use async_trait::async_trait;
    use crate::error::SenderError;
    use crate::level::LevelInfo;
    use crate::sender::{Record, Sender, SenderKind};
    use parking_lot::Mutex;
    use std::collections::HashSet;
    use std::path::Path;
    use std::sync::Arc;

    #[derive(Default)]
    struct RecordingState {
        records: Vec<Record>,
        flushes: usize,
        fail_flush: bool,
    }

    /// Sender that keeps every accepted record in memory.
    #[derive(Clone)]
    pub struct RecordingSender {
        name: String,
        kind: SenderKind,
        levels: LevelInfo,
        inner: Arc<Mutex<RecordingState>>,
    }

    impl RecordingSender {
        pub fn new(name: impl Into<String>, kind: SenderKind, levels: LevelInfo) -> Self {
            Self {
                name: name.into(),
                kind,
                levels,
                inner: Arc::new(Mutex::new(RecordingState::default())),
            }
        }

        pub fn records(&self) -> Vec<Record> {
            self.inner.lock().records.clone()
        }

        pub fn flush_count(&self) -> usize {
            self.inner.lock().flushes
        }

        /// Make subsequent `flush` calls fail.
        pub fn fail_flush(&self) {
            self.inner.lock().fail_flush = true;
        }
    }

    #[async_trait]
    impl Sender for RecordingSender {
        fn name(&self) -> &str {
            &self.name
        }

        fn kind(&self) -> SenderKind {
            self.kind
        }

        fn levels(&self) -> LevelInfo {
            self.levels
        }

        fn send(&self, record: &Record) {
            if self.levels.enabled(record.level) {
                self.inner.lock().records.push(record.clone());
            }
        }

        async fn flush(&self) -> Result<(), SenderError> {
            let mut inner = self.inner.lock();
            inner.flushes += 1;
            if inner.fail_flush {
                return Err(SenderError::Rejected(format!("{} flush failed", self.name)));
            }
            Ok(())
        }
    }

    /// Recorded sender construction
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct SenderCall {
        pub kind: SenderKind,
        pub name: String,
        /// File path or server URL, when the sender has one.
        pub target: Option<String>,
        pub levels: LevelInfo,
    }

    struct FakeBackendState {
        calls: Vec<SenderCall>,
        failing: HashSet<SenderKind>,
        built: Vec<RecordingSender>,
    }

    /// Fake sender backend for testing.
    ///
    /// Every constructor call is recorded, including calls configured to fail.
    #[derive(Clone)]
    pub struct FakeSenderBackend {
        inner: Arc<Mutex<FakeBackendState>>,
    }

    impl Default for FakeSenderBackend {
        fn default() -> Self {
            Self {
                inner: Arc::new(Mutex::new(FakeBackendState {
                    calls: Vec::new(),
                    failing: HashSet::new(),
                    built: Vec::new(),
                })),
            }
        }
    }

    impl FakeSenderBackend {
        pub fn new() -> Self {
            Self::default()
        }

        /// Make construction of `kind` senders fail.
        pub fn fail_on(&self, kind: SenderKind) {
            self.inner.lock().failing.insert(kind);
        }

        pub fn calls(&self) -> Vec<SenderCall> {
            self.inner.lock().calls.clone()
        }

        /// Senders handed out so far, in construction order.
        pub fn built(&self) -> Vec<RecordingSender> {
            self.inner.lock().built.clone()
        }

        fn build(
            &self,
            kind: SenderKind,
            name: &str,
            target: Option<String>,
            levels: LevelInfo,
        ) -> Result<Box<dyn Sender>, SenderError> {
            let mut inner = self.inner.lock();
            inner.calls.push(SenderCall { kind, name: name.to_string(), target, levels });
            if inner.failing.contains(&kind) {
                return Err(SenderError::Rejected(format!("{:?} sender unavailable", kind)));
            }
            let sender = RecordingSender::new(name, kind, levels);
            inner.built.push(sender.clone());
            Ok(Box::new(sender))
        }
    }

    impl SenderBackend for FakeSenderBackend {
        fn console(&self, name: &str, levels: LevelInfo) -> Result<Box<dyn Sender>, SenderError> {
            self.build(SenderKind::Console, name, None, levels)
        }

        fn file(
            &self,
            name: &str,
            path: &Path,
            levels: LevelInfo,
        ) -> Result<Box<dyn Sender>, SenderError> {
            self.build(SenderKind::File, name, Some(path.display().to_string()), levels)
        }

        fn remote_alert(
            &self,
            name: &str,
            conn: &AlertConnection,
            levels: LevelInfo,
        ) -> Result<Box<dyn Sender>, SenderError> {
            self.build(SenderKind::RemoteAlert, name, Some(conn.server_url.clone()), levels)
        }
    }
}

#[cfg(any(test, feature = "test-support"))]
pub use fake::{FakeSenderBackend, RecordingSender, SenderCall};

#[cfg(test)]
#[path = "backend_tests.rs"]
mod tests;
