//! Logging setup and the task failure log
//!
//! Structured logging goes through `tracing`. Failed model tasks are additionally
//! appended to a plain-text diagnostic file so a run can be inspected afterwards.

use crate::utils::error::Result;
use std::path::{Path, PathBuf};
use tokio::io::AsyncWriteExt;
use tracing_subscriber::EnvFilter;

/// Name of the diagnostic file written next to the outputs
pub const TASK_LOG_FILE: &str = "ai_tasks.log";

const TASK_LOG_SEPARATOR: &str = "--------------------------------------------------";

/// Install the global tracing subscriber
///
/// The filter is read from `RUST_LOG` and falls back to `info`.
pub fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    if json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_thread_ids(false)
            .init();
    }
}

/// Append-only log of failed model tasks
#[derive(Debug, Clone)]
pub struct TaskLog {
    path: PathBuf,
}

impl TaskLog {
    /// Create a task log writing to `dir/ai_tasks.log`
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        Self {
            path: dir.as_ref().join(TASK_LOG_FILE),
        }
    }

    /// Path of the underlying file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one entry, stamped with the current UTC time
    pub async fn append(&self, details: &str) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        let entry = format!(
            "[{}]\n{}\n{}\n",
            chrono::Utc::now().to_rfc3339(),
            details,
            TASK_LOG_SEPARATOR
        );

        let mut file = tokio::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await?;
        file.write_all(entry.as_bytes()).await?;
        file.flush().await?;
        Ok(())
    }

    /// Append an entry and only log if writing it fails
    pub async fn record(&self, details: &str) {
        if let Err(e) = self.append(details).await {
            tracing::warn!(path = %self.path.display(), error = %e, "Failed to write task log");
        }
    }
}
