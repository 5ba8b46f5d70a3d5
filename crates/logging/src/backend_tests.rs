// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::level::Level;
use crate::sender::{Record, SenderKind};
use tempfile::TempDir;

#[tokio::test]
async fn local_backend_builds_file_sender() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("agent.log");
    let sender = LocalSenderBackend.file("agent", &path, LevelInfo::default()).unwrap();

    sender.send(&Record::new(Level::Info, "hello"));
    sender.flush().await.unwrap();

    assert_eq!(sender.kind(), SenderKind::File);
    assert!(std::fs::read_to_string(&path).unwrap().contains("hello"));
}

#[test]
fn local_backend_builds_console_sender() {
    let sender = LocalSenderBackend.console("evergreen.agent", LevelInfo::default()).unwrap();
    assert_eq!(sender.kind(), SenderKind::Console);
    assert_eq!(sender.name(), "evergreen.agent");
}

#[test]
fn local_backend_file_error_propagates() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("missing").join("agent.log");
    assert!(LocalSenderBackend.file("agent", &path, LevelInfo::default()).is_err());
}

#[test]
fn fake_backend_records_calls_and_failures() {
    let backend = FakeSenderBackend::new();
    backend.fail_on(SenderKind::RemoteAlert);

    let conn = AlertConnection {
        server_url: "https://hec".into(),
        token: "tok".into(),
        channel: None,
    };
    assert!(backend.remote_alert("a", &conn, LevelInfo::default()).is_err());
    assert!(backend.console("b", LevelInfo::default()).is_ok());

    let calls = backend.calls();
    assert_eq!(calls.len(), 2);
    assert_eq!(calls[0].kind, SenderKind::RemoteAlert);
    assert_eq!(calls[0].target.as_deref(), Some("https://hec"));
    assert_eq!(calls[1].kind, SenderKind::Console);
    assert_eq!(backend.built().len(), 1);
}
