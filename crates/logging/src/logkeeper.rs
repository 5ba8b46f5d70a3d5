// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Logkeeper client and sender.
//!
//! Logkeeper groups logs into builds (one per task execution) and tests (one
//! per log stream). A build is created with the task id as builder and the
//! execution as build number; each channel gets its own test. Lines are
//! posted as `[[epoch_secs, line], ...]` to `/build/<build>/test/<test>`.

use async_trait::async_trait;
use reqwest::Url;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::error::SenderError;
use crate::level::LevelInfo;
use crate::remote::{BackgroundWriter, RemoteSink};
use crate::sender::{Record, Sender, SenderKind};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Build and test ids of a logkeeper log stream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogkeeperMetadata {
    pub build: String,
    pub test: String,
}

impl LogkeeperMetadata {
    /// Browser URL of the stream: `<base>/build/<build>/test/<test>`.
    pub fn url(&self, base_url: &str) -> String {
        format!("{}/build/{}/test/{}", base_url.trim_end_matches('/'), self.build, self.test)
    }
}

#[derive(Serialize)]
struct CreateBuild<'a> {
    builder: &'a str,
    buildnum: u32,
}

#[derive(Serialize)]
struct CreateTest<'a> {
    test_filename: &'a str,
    command: &'a str,
    phase: &'a str,
}

#[derive(Deserialize)]
struct CreatedId {
    id: String,
}

/// HTTP client for one logkeeper service.
#[derive(Debug, Clone)]
pub struct LogkeeperClient {
    client: reqwest::Client,
    base: String,
}

impl LogkeeperClient {
    pub fn new(base_url: &str) -> Result<Self, SenderError> {
        let parsed =
            Url::parse(base_url).map_err(|_| SenderError::InvalidUrl(base_url.to_string()))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(SenderError::InvalidUrl(base_url.to_string()));
        }
        let client = reqwest::Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self { client, base: base_url.trim_end_matches('/').to_string() })
    }

    pub fn base_url(&self) -> &str {
        &self.base
    }

    /// Create (or look up) the build for a task execution.
    pub async fn create_build(&self, builder: &str, build_num: u32) -> Result<String, SenderError> {
        let url = format!("{}/build", self.base);
        self.post_for_id(&url, &CreateBuild { builder, buildnum: build_num }).await
    }

    /// Create a test (log stream) inside `build`.
    pub async fn create_test(
        &self,
        build: &str,
        test_name: &str,
        command: &str,
    ) -> Result<String, SenderError> {
        let url = format!("{}/build/{}/test", self.base, build);
        let body = CreateTest { test_filename: test_name, command, phase: "unknown" };
        self.post_for_id(&url, &body).await
    }

    async fn post_for_id<T: Serialize>(&self, url: &str, body: &T) -> Result<String, SenderError> {
        let resp = self.client.post(url).json(body).send().await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(SenderError::Logkeeper(format!("{} returned {}", url, status)));
        }
        let created: CreatedId = resp.json().await?;
        Ok(created.id)
    }

    /// Build a sender that appends to the stream identified by `metadata`.
    ///
    /// Must be called inside a tokio runtime.
    pub fn sender(
        &self,
        name: impl Into<String>,
        metadata: LogkeeperMetadata,
        levels: LevelInfo,
    ) -> Result<LogkeeperSender, SenderError> {
        let name = name.into();
        let sink = LogkeeperSink {
            client: self.client.clone(),
            url: format!("{}/build/{}/test/{}", self.base, metadata.build, metadata.test),
        };
        let writer = BackgroundWriter::spawn(&name, sink)?;
        Ok(LogkeeperSender { name, levels, metadata, writer })
    }
}

/// Sender appending records to one logkeeper test.
pub struct LogkeeperSender {
    name: String,
    levels: LevelInfo,
    metadata: LogkeeperMetadata,
    writer: BackgroundWriter,
}

impl LogkeeperSender {
    pub fn metadata(&self) -> &LogkeeperMetadata {
        &self.metadata
    }
}

#[async_trait]
impl Sender for LogkeeperSender {
    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> SenderKind {
        SenderKind::Logkeeper
    }

    fn levels(&self) -> LevelInfo {
        self.levels
    }

    fn send(&self, record: &Record) {
        if self.levels.enabled(record.level) {
            self.writer.enqueue(record);
        }
    }

    async fn flush(&self) -> Result<(), SenderError> {
        self.writer.flush().await
    }
}

struct LogkeeperSink {
    client: reqwest::Client,
    url: String,
}

pub(crate) fn lines_payload(batch: &[Record]) -> Vec<(f64, String)> {
    batch
        .iter()
        .map(|r| (r.epoch_secs(), format!("[{}] {}", r.level, r.message)))
        .collect()
}

impl RemoteSink for LogkeeperSink {
    async fn post(&self, batch: &[Record]) -> Result<(), SenderError> {
        self.client.post(&self.url).json(&lines_payload(batch)).send().await?.error_for_status()?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "logkeeper_tests.rs"]
mod tests;
