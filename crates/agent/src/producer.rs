// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Per-task logger construction.
//!
//! Before a task's commands run, the agent resolves the task's logger
//! configuration, builds one fan-out sender per channel and records where
//! remote copies of each channel can be browsed.

use async_trait::async_trait;
use eg_core::{Channel, LogReference, TaskContext, TaskIdentity, TaskLogs};
use eg_logging::{
    AlertConnection, Level, LevelInfo, LogkeeperClient, LogkeeperMetadata, MultiSender, Sender,
    SenderBackend, SenderError,
};
use std::sync::Arc;
use thiserror::Error;

use crate::log_paths::log_dir;
use crate::logger_config::{
    resolve_logger_config, LogOptions, LogSenderKind, LoggerConfigTemplate, ResolvedLoggerConfig,
};
use crate::options::AgentOptions;

/// Errors from producing a task logger
#[derive(Debug, Error)]
pub enum LoggerError {
    #[error("no task assigned")]
    NoTask,

    #[error(transparent)]
    Sender(#[from] SenderError),
}

/// One fan-out sender per channel.
pub struct TaskLogger {
    agent: MultiSender,
    system: MultiSender,
    task: MultiSender,
}

impl TaskLogger {
    pub fn new(agent: MultiSender, system: MultiSender, task: MultiSender) -> Self {
        Self { agent, system, task }
    }

    pub fn channel(&self, channel: Channel) -> &MultiSender {
        match channel {
            Channel::Agent => &self.agent,
            Channel::System => &self.system,
            Channel::Task => &self.task,
        }
    }

    pub fn log(&self, channel: Channel, level: Level, message: &str) {
        self.channel(channel).write(level, message);
    }

    /// Flush all channels, waiting for remote senders to deliver what they
    /// have queued. Every channel is flushed even if one fails.
    pub async fn flush(&self) -> Result<(), SenderError> {
        let mut first_err = None;
        for channel in Channel::ALL {
            if let Err(e) = self.channel(channel).flush().await {
                first_err.get_or_insert(e);
            }
        }
        match first_err {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

impl std::fmt::Debug for TaskLogger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TaskLogger")
            .field("agent", &self.agent)
            .field("system", &self.system)
            .field("task", &self.task)
            .finish()
    }
}

/// Remote log streams opened for each channel.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoggerMetadata {
    pub agent: Vec<LogkeeperMetadata>,
    pub system: Vec<LogkeeperMetadata>,
    pub task: Vec<LogkeeperMetadata>,
}

impl LoggerMetadata {
    pub fn channel(&self, channel: Channel) -> &[LogkeeperMetadata] {
        match channel {
            Channel::Agent => &self.agent,
            Channel::System => &self.system,
            Channel::Task => &self.task,
        }
    }

    pub fn push(&mut self, channel: Channel, metadata: LogkeeperMetadata) {
        match channel {
            Channel::Agent => self.agent.push(metadata),
            Channel::System => self.system.push(metadata),
            Channel::Task => self.task.push(metadata),
        }
    }
}

#[derive(Debug)]
pub struct ProducedLogger {
    pub logger: TaskLogger,
    pub metadata: LoggerMetadata,
}

/// Builds the multi-channel logger for a resolved configuration.
#[async_trait]
pub trait LoggerBackend: Send + Sync {
    async fn produce(
        &self,
        task: &TaskIdentity,
        config: &ResolvedLoggerConfig,
        command: &str,
    ) -> Result<ProducedLogger, LoggerError>;
}

fn channel_sender_name(channel: Channel) -> String {
    format!("evergreen.{}", channel)
}

/// Backend building file, remote alert and logkeeper senders.
#[derive(Clone)]
pub struct LocalLoggerBackend {
    senders: Arc<dyn SenderBackend>,
}

impl LocalLoggerBackend {
    pub fn new(senders: Arc<dyn SenderBackend>) -> Self {
        Self { senders }
    }

    fn file_sender(
        &self,
        channel: Channel,
        path: &std::path::Path,
    ) -> Result<Box<dyn Sender>, SenderError> {
        self.senders.file(&channel_sender_name(channel), path, LevelInfo::default())
    }

    async fn entry_sender(
        &self,
        channel: Channel,
        entry: &LogOptions,
        command: &str,
        logkeeper: &mut Option<(LogkeeperClient, String)>,
        metadata: &mut LoggerMetadata,
    ) -> Result<Box<dyn Sender>, SenderError> {
        let name = channel_sender_name(channel);
        match entry.sender {
            LogSenderKind::File => self.file_sender(channel, &entry.file_path),
            LogSenderKind::Splunk if entry.server.is_empty() => {
                tracing::warn!(%channel, "splunk entry has no server, logging to file");
                self.file_sender(channel, &entry.file_path)
            }
            LogSenderKind::Splunk => {
                let conn = AlertConnection {
                    server_url: entry.server.clone(),
                    token: entry.token.clone(),
                    channel: None,
                };
                self.senders.remote_alert(&name, &conn, LevelInfo::default())
            }
            LogSenderKind::Logkeeper => {
                // One build per task execution, shared by every channel
                if logkeeper.is_none() {
                    let client = LogkeeperClient::new(&entry.logkeeper.url)?;
                    let build = client
                        .create_build(&entry.logkeeper.builder, entry.logkeeper.build_num)
                        .await?;
                    *logkeeper = Some((client, build));
                }
                let Some((client, build)) = logkeeper.as_ref() else {
                    return Err(SenderError::Logkeeper("build not created".into()));
                };
                let test = client.create_test(build, channel.as_str(), command).await?;
                let meta = LogkeeperMetadata { build: build.clone(), test };
                let sender = client.sender(name, meta.clone(), LevelInfo::default())?;
                metadata.push(channel, meta);
                Ok(Box::new(sender))
            }
        }
    }

    /// Fan-out for one channel; a channel without entries logs to its file.
    async fn channel_sender(
        &self,
        channel: Channel,
        config: &ResolvedLoggerConfig,
        command: &str,
        logkeeper: &mut Option<(LogkeeperClient, String)>,
        metadata: &mut LoggerMetadata,
    ) -> Result<MultiSender, SenderError> {
        let entries = config.channel(channel);
        let mut senders = Vec::with_capacity(entries.len().max(1));
        if entries.is_empty() {
            senders.push(self.file_sender(channel, &config.channel_path(channel))?);
        }
        for entry in entries {
            senders.push(self.entry_sender(channel, entry, command, logkeeper, metadata).await?);
        }
        Ok(MultiSender::new(channel_sender_name(channel), senders))
    }
}

impl Default for LocalLoggerBackend {
    fn default() -> Self {
        Self::new(Arc::new(eg_logging::LocalSenderBackend))
    }
}

#[async_trait]
impl LoggerBackend for LocalLoggerBackend {
    async fn produce(
        &self,
        task: &TaskIdentity,
        config: &ResolvedLoggerConfig,
        command: &str,
    ) -> Result<ProducedLogger, LoggerError> {
        let mut metadata = LoggerMetadata::default();
        let mut logkeeper = None;
        let agent = self
            .channel_sender(Channel::Agent, config, command, &mut logkeeper, &mut metadata)
            .await?;
        let system = self
            .channel_sender(Channel::System, config, command, &mut logkeeper, &mut metadata)
            .await?;
        let task_sender = self
            .channel_sender(Channel::Task, config, command, &mut logkeeper, &mut metadata)
            .await?;

        tracing::debug!(task_id = %task.id, execution = task.execution, "task logger produced");
        Ok(ProducedLogger { logger: TaskLogger::new(agent, system, task_sender), metadata })
    }
}

/// Produce the logger for the current task and replace the remote log
/// references in `tc` with the new logger's. On failure `tc` is untouched.
///
/// The local log directory is created first; failure to create it is logged
/// and production continues, since senders that do not write there still
/// work.
pub async fn make_logger_producer(
    opts: &AgentOptions,
    backend: &dyn LoggerBackend,
    tc: &mut TaskContext,
    template: &LoggerConfigTemplate,
    command_name: &str,
) -> Result<TaskLogger, LoggerError> {
    let Some(task) = tc.task.clone() else {
        return Err(LoggerError::NoTask);
    };

    let dir = log_dir(&opts.working_directory);
    if let Err(e) = tokio::fs::create_dir_all(&dir).await {
        tracing::error!(path = %dir.display(), error = %e, "failed to create task log directory");
    }

    let config = resolve_logger_config(template, &task, &tc.expansions, opts);
    let produced = backend.produce(&task, &config, command_name).await?;

    // References describe the most recently produced logger only
    tc.logs = TaskLogs::default();
    for channel in Channel::ALL {
        for meta in produced.metadata.channel(channel) {
            tc.logs.push(
                channel,
                LogReference {
                    command: command_name.to_string(),
                    url: meta.url(&opts.logkeeper_url),
                },
            );
        }
    }
    Ok(produced.logger)
}

#[cfg(any(test, feature = "test-support"))]
#[cfg_attr(coverage_nightly, coverage(off))]
mod fake {
    use super::{
        channel_sender_name, LoggerBackend, LoggerError, LoggerMetadata, ProducedLogger,
        TaskLogger,
    };
    use crate::logger_config::{LogSenderKind, ResolvedLoggerConfig};
    use async_trait::async_trait;
    use eg_core::{Channel, TaskIdentity};
    use eg_logging::{
        LevelInfo, LogkeeperMetadata, MultiSender, RecordingSender, Sender, SenderError,
        SenderKind,
    };
    use parking_lot::Mutex;
    use std::sync::Arc;

    #[derive(Default)]
    struct FakeLoggerState {
        configs: Vec<ResolvedLoggerConfig>,
        commands: Vec<String>,
        senders: Vec<(Channel, RecordingSender)>,
        fail: bool,
    }

    /// Fake logger backend for testing.
    ///
    /// Every entry becomes a [`RecordingSender`]; logkeeper entries get
    /// metadata `{ build: "<task>-<execution>", test: "<channel>-<n>" }`.
    #[derive(Clone, Default)]
    pub struct FakeLoggerBackend {
        inner: Arc<Mutex<FakeLoggerState>>,
    }

    impl FakeLoggerBackend {
        pub fn new() -> Self {
            Self::default()
        }

        /// Make subsequent `produce` calls fail.
        pub fn fail(&self) {
            self.inner.lock().fail = true;
        }

        /// Configurations passed to `produce`, in call order.
        pub fn configs(&self) -> Vec<ResolvedLoggerConfig> {
            self.inner.lock().configs.clone()
        }

        pub fn commands(&self) -> Vec<String> {
            self.inner.lock().commands.clone()
        }

        /// Senders built for `channel`, in construction order.
        pub fn senders(&self, channel: Channel) -> Vec<RecordingSender> {
            self.inner
                .lock()
                .senders
                .iter()
                .filter(|(c, _)| *c == channel)
                .map(|(_, s)| s.clone())
                .collect()
        }
    }

    fn sender_kind(kind: LogSenderKind) -> SenderKind {
        match kind {
            LogSenderKind::File => SenderKind::File,
            LogSenderKind::Splunk => SenderKind::RemoteAlert,
            LogSenderKind::Logkeeper => SenderKind::Logkeeper,
        }
    }

    #[async_trait]
    impl LoggerBackend for FakeLoggerBackend {
        async fn produce(
            &self,
            task: &TaskIdentity,
            config: &ResolvedLoggerConfig,
            command: &str,
        ) -> Result<ProducedLogger, LoggerError> {
            let mut inner = self.inner.lock();
            inner.configs.push(config.clone());
            inner.commands.push(command.to_string());
            if inner.fail {
                return Err(SenderError::Rejected("logger backend unavailable".into()).into());
            }

            let mut metadata = LoggerMetadata::default();
            let mut build = |channel: Channel| -> MultiSender {
                let name = channel_sender_name(channel);
                let entries = config.channel(channel);
                let mut senders: Vec<Box<dyn Sender>> = Vec::new();
                if entries.is_empty() {
                    let sender =
                        RecordingSender::new(&name, SenderKind::File, LevelInfo::default());
                    inner.senders.push((channel, sender.clone()));
                    senders.push(Box::new(sender));
                }
                for (n, entry) in entries.iter().enumerate() {
                    let kind = sender_kind(entry.sender);
                    let sender = RecordingSender::new(&name, kind, LevelInfo::default());
                    if entry.sender == LogSenderKind::Logkeeper {
                        metadata.push(
                            channel,
                            LogkeeperMetadata {
                                build: format!("{}-{}", task.id, task.execution),
                                test: format!("{}-{}", channel, n),
                            },
                        );
                    }
                    inner.senders.push((channel, sender.clone()));
                    senders.push(Box::new(sender));
                }
                MultiSender::new(name, senders)
            };

            let logger = TaskLogger::new(
                build(Channel::Agent),
                build(Channel::System),
                build(Channel::Task),
            );
            Ok(ProducedLogger { logger, metadata })
        }
    }
}

#[cfg(any(test, feature = "test-support"))]
pub use fake::FakeLoggerBackend;

#[cfg(test)]
#[path = "producer_tests.rs"]
mod tests;
