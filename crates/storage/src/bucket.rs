// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Bucket adapters.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio_util::io::ReaderStream;

/// Errors from storage operations
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("invalid storage key '{0}'")]
    InvalidKey(String),

    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write {key}: {source}")]
    Write {
        key: String,
        #[source]
        source: std::io::Error,
    },

    #[error("upload of {key} rejected with status {status}")]
    Rejected { key: String, status: u16 },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

/// Key-addressed object store.
#[async_trait]
pub trait Bucket: Send + Sync {
    /// Copy the file at `local_path` to `key`, replacing any existing object.
    async fn upload(&self, key: &str, local_path: &Path) -> Result<(), StorageError>;
}

/// Keys are relative, `/`-separated and may not escape the bucket root.
fn validate_key(key: &str) -> Result<(), StorageError> {
    let bad = key.is_empty()
        || key.starts_with('/')
        || key.split('/').any(|part| part.is_empty() || part == "." || part == "..");
    if bad {
        return Err(StorageError::InvalidKey(key.to_string()));
    }
    Ok(())
}

/// Bucket backed by a local (or mounted) directory.
#[derive(Debug, Clone)]
pub struct LocalBucket {
    root: PathBuf,
}

impl LocalBucket {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn object_path(&self, key: &str) -> PathBuf {
        key.split('/').fold(self.root.clone(), |path, part| path.join(part))
    }
}

#[async_trait]
impl Bucket for LocalBucket {
    async fn upload(&self, key: &str, local_path: &Path) -> Result<(), StorageError> {
        validate_key(key)?;
        let dest = self.object_path(key);
        if let Some(parent) = dest.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|source| StorageError::Write { key: key.to_string(), source })?;
        }
        // A missing source must report as a read error, not a write error
        tokio::fs::metadata(local_path)
            .await
            .map_err(|source| StorageError::Read { path: local_path.to_path_buf(), source })?;
        let bytes = tokio::fs::copy(local_path, &dest)
            .await
            .map_err(|source| StorageError::Write { key: key.to_string(), source })?;
        tracing::debug!(key, bytes, dest = %dest.display(), "stored object");
        Ok(())
    }
}

/// Bucket reached over HTTP: each upload is a `PUT <base_url>/<key>`.
#[derive(Debug, Clone)]
pub struct HttpBucket {
    client: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl HttpBucket {
    pub fn new(base_url: &str, token: Option<String>) -> Result<Self, StorageError> {
        let client = reqwest::Client::builder().build()?;
        Ok(Self { client, base_url: base_url.trim_end_matches('/').to_string(), token })
    }

    pub fn object_url(&self, key: &str) -> String {
        format!("{}/{}", self.base_url, key)
    }
}

#[async_trait]
impl Bucket for HttpBucket {
    async fn upload(&self, key: &str, local_path: &Path) -> Result<(), StorageError> {
        validate_key(key)?;
        let read_err =
            |source: std::io::Error| StorageError::Read { path: local_path.to_path_buf(), source };
        let file = tokio::fs::File::open(local_path).await.map_err(read_err)?;
        let len = file.metadata().await.map_err(read_err)?.len();
        let mut request = self
            .client
            .put(self.object_url(key))
            .header("Content-Type", "text/plain")
            .header("Content-Length", len)
            .body(reqwest::Body::wrap_stream(ReaderStream::new(file)));
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }
        let resp = request.send().await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(StorageError::Rejected { key: key.to_string(), status: status.as_u16() });
        }
        Ok(())
    }
}

#[cfg(any(test, feature = "test-support"))]
#[cfg_attr(coverage_nightly, coverage(off))]
mod fake {
    use super::{Bucket, StorageError};
    use async_trait::async_trait;
    use parking_lot::Mutex;
    use std::collections::HashSet;
    use std::path::{Path, PathBuf};
    use std::sync::Arc;

    /// Recorded upload
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct UploadCall {
        pub key: String,
        pub local_path: PathBuf,
    }

    #[derive(Default)]
    struct FakeBucketState {
        calls: Vec<UploadCall>,
        failing: HashSet<String>,
        hanging: HashSet<String>,
    }

    /// Fake bucket for testing
    #[derive(Clone, Default)]
    pub struct FakeBucket {
        inner: Arc<Mutex<FakeBucketState>>,
    }

    impl FakeBucket {
        pub fn new() -> Self {
            Self::default()
        }

        /// Fail uploads whose key ends with `suffix`.
        pub fn fail_key(&self, suffix: &str) {
            self.inner.lock().failing.insert(suffix.to_string());
        }

        /// Never complete uploads whose key ends with `suffix`.
        pub fn hang_key(&self, suffix: &str) {
            self.inner.lock().hanging.insert(suffix.to_string());
        }

        /// Get all recorded uploads
        pub fn calls(&self) -> Vec<UploadCall> {
            self.inner.lock().calls.clone()
        }
    }

    #[async_trait]
    impl Bucket for FakeBucket {
        async fn upload(&self, key: &str, local_path: &Path) -> Result<(), StorageError> {
            let (fail, hang) = {
                let mut inner = self.inner.lock();
                inner.calls.push(UploadCall {
                    key: key.to_string(),
                    local_path: local_path.to_path_buf(),
                });
                (
                    inner.failing.iter().any(|s| key.ends_with(s.as_str())),
                    inner.hanging.iter().any(|s| key.ends_with(s.as_str())),
                )
            };
            if hang {
                std::future::pending::<()>().await;
            }
            if fail {
                return Err(StorageError::Rejected { key: key.to_string(), status: 503 });
            }
            Ok(())
        }
    }
}

#[cfg(any(test, feature = "test-support"))]
pub use fake::{FakeBucket, UploadCall};

#[cfg(test)]
#[path = "bucket_tests.rs"]
mod tests;
