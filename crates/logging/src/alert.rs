// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Remote alerting sender posting to a Splunk HTTP event collector.

use async_trait::async_trait;
use reqwest::Url;
use serde::Serialize;
use std::time::Duration;

use crate::error::SenderError;
use crate::level::LevelInfo;
use crate::remote::{BackgroundWriter, RemoteSink};
use crate::sender::{Record, Sender, SenderKind};

const COLLECTOR_PATH: &str = "services/collector";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Connection details for the remote alerting service.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AlertConnection {
    pub server_url: String,
    pub token: String,
    /// Optional request channel (`X-Splunk-Request-Channel`).
    pub channel: Option<String>,
}

impl AlertConnection {
    /// True when both a server and a token are configured.
    pub fn is_populated(&self) -> bool {
        !self.server_url.is_empty() && !self.token.is_empty()
    }
}

/// Sender relaying records to the alerting service from a background task.
pub struct RemoteAlertSender {
    name: String,
    levels: LevelInfo,
    endpoint: Url,
    writer: BackgroundWriter,
}

impl RemoteAlertSender {
    /// Must be called inside a tokio runtime.
    pub fn new(
        name: impl Into<String>,
        conn: &AlertConnection,
        levels: LevelInfo,
    ) -> Result<Self, SenderError> {
        let name = name.into();
        let endpoint = collector_url(&conn.server_url)?;
        let client = reqwest::Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        let sink = HecSink {
            client,
            endpoint: endpoint.clone(),
            token: conn.token.clone(),
            channel: conn.channel.clone(),
            source: name.clone(),
        };
        let writer = BackgroundWriter::spawn(&name, sink)?;
        Ok(Self { name, levels, endpoint, writer })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

/// Resolve `<server>/services/collector`. The server must be http(s).
pub(crate) fn collector_url(server: &str) -> Result<Url, SenderError> {
    let mut base = Url::parse(server).map_err(|_| SenderError::InvalidUrl(server.to_string()))?;
    if !matches!(base.scheme(), "http" | "https") {
        return Err(SenderError::InvalidUrl(server.to_string()));
    }
    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }
    base.join(COLLECTOR_PATH).map_err(|_| SenderError::InvalidUrl(server.to_string()))
}

#[async_trait]
impl Sender for RemoteAlertSender {
    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> SenderKind {
        SenderKind::RemoteAlert
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

struct HecSink {
    client: reqwest::Client,
    endpoint: Url,
    token: String,
    channel: Option<String>,
    source: String,
}

#[derive(Serialize)]
struct HecEvent<'a> {
    time: f64,
    source: &'a str,
    event: HecBody<'a>,
}

#[derive(Serialize)]
struct HecBody<'a> {
    level: &'a str,
    message: &'a str,
}

/// HEC accepts several events per request as concatenated JSON objects.
pub(crate) fn hec_payload(source: &str, batch: &[Record]) -> Result<String, serde_json::Error> {
    let mut body = String::new();
    for record in batch {
        let event = HecEvent {
            time: record.epoch_secs(),
            source,
            event: HecBody { level: record.level.as_str(), message: &record.message },
        };
        body.push_str(&serde_json::to_string(&event)?);
        body.push('\n');
    }
    Ok(body)
}

impl RemoteSink for HecSink {
    async fn post(&self, batch: &[Record]) -> Result<(), SenderError> {
        let body = hec_payload(&self.source, batch)
            .map_err(|e| SenderError::Rejected(format!("unserializable event: {}", e)))?;
        let mut request = self
            .client
            .post(self.endpoint.clone())
            .header("Authorization", format!("Splunk {}", self.token))
            .body(body);
        if let Some(channel) = &self.channel {
            request = request.header("X-Splunk-Request-Channel", channel);
        }
        request.send().await?.error_for_status()?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "alert_tests.rs"]
mod tests;
