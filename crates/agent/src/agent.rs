// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Process-scoped agent context.

use eg_core::{AtomicSequence, SequenceSource, TaskContext};
use eg_logging::{LocalSenderBackend, MultiSender, SenderBackend, SenderError};
use eg_storage::Bucket;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

use crate::env::AgentEnv;
use crate::logger_config::LoggerConfigTemplate;
use crate::options::AgentOptions;
use crate::producer::{
    make_logger_producer, LocalLoggerBackend, LoggerBackend, LoggerError, TaskLogger,
};
use crate::sender_factory::build_agent_sender;
use crate::upload::{upload_log_files, UploadError};

/// Everything the agent's logging needs for the lifetime of the process.
///
/// Owns the sequence source used to name agent log files, so every sender
/// built through one `Agent` gets a distinct file.
pub struct Agent {
    opts: AgentOptions,
    env: AgentEnv,
    sequence: Arc<dyn SequenceSource>,
    senders: Arc<dyn SenderBackend>,
    loggers: Arc<dyn LoggerBackend>,
}

impl Agent {
    pub fn new(opts: AgentOptions, env: AgentEnv) -> Self {
        let senders: Arc<dyn SenderBackend> = Arc::new(LocalSenderBackend);
        let loggers = Arc::new(LocalLoggerBackend::new(Arc::clone(&senders)));
        Self::with_backends(opts, env, Arc::new(AtomicSequence::new()), senders, loggers)
    }

    pub fn with_backends(
        opts: AgentOptions,
        env: AgentEnv,
        sequence: Arc<dyn SequenceSource>,
        senders: Arc<dyn SenderBackend>,
        loggers: Arc<dyn LoggerBackend>,
    ) -> Self {
        Self { opts, env, sequence, senders, loggers }
    }

    pub fn options(&self) -> &AgentOptions {
        &self.opts
    }

    pub fn env(&self) -> &AgentEnv {
        &self.env
    }

    /// Build the agent's own sender for the configured log destination.
    pub fn agent_sender(&self) -> Result<MultiSender, SenderError> {
        build_agent_sender(
            &self.env,
            &self.opts.log_prefix,
            self.sequence.as_ref(),
            self.senders.as_ref(),
        )
    }

    pub async fn make_logger_producer(
        &self,
        tc: &mut TaskContext,
        template: &LoggerConfigTemplate,
        command_name: &str,
    ) -> Result<TaskLogger, LoggerError> {
        make_logger_producer(&self.opts, self.loggers.as_ref(), tc, template, command_name).await
    }

    /// Upload the task's log files to the configured storage.
    pub async fn upload_logs(
        &self,
        tc: &TaskContext,
        cancel: &CancellationToken,
    ) -> Result<(), UploadError> {
        let bucket = self.opts.storage.bucket()?;
        self.upload_logs_to(tc, bucket.as_ref(), cancel).await
    }

    /// Upload the task's log files to `bucket`.
    ///
    /// With an upload timeout configured, uploads still running at the
    /// deadline are cancelled and reported like any other cancellation.
    pub async fn upload_logs_to(
        &self,
        tc: &TaskContext,
        bucket: &dyn Bucket,
        cancel: &CancellationToken,
    ) -> Result<(), UploadError> {
        let wd = &self.opts.working_directory;
        let Some(timeout) = self.opts.upload_timeout() else {
            return upload_log_files(wd, tc, bucket, cancel).await;
        };

        let deadline = cancel.child_token();
        let timer = tokio::spawn({
            let deadline = deadline.clone();
            async move {
                tokio::time::sleep(timeout).await;
                tracing::warn!(?timeout, "task log upload timed out");
                deadline.cancel();
            }
        });
        let result = upload_log_files(wd, tc, bucket, &deadline).await;
        timer.abort();
        result
    }
}

impl std::fmt::Debug for Agent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Agent").field("opts", &self.opts).field("env", &self.env).finish()
    }
}

#[cfg(test)]
#[path = "agent_tests.rs"]
mod tests;
