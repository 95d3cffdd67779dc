//! Sinks for user feedback on answers.
//!
//! Feedback is write-only from the API's point of view. The default sink just
//! logs each record; `[feedback] path` switches to an append-only JSON-lines
//! file.

use crate::types::{AppError, FeedbackRecord, Result};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs::OpenOptions;
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;

#[async_trait]
pub trait FeedbackStore: Send + Sync {
    async fn append(&self, feedback: FeedbackRecord) -> Result<()>;
}

/// Logs feedback at info level and keeps nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct LoggingFeedbackStore;

#[async_trait]
impl FeedbackStore for LoggingFeedbackStore {
    async fn append(&self, feedback: FeedbackRecord) -> Result<()> {
        tracing::info!(
            message_id = %feedback.message_id,
            user_id = %feedback.user_id,
            feedback_type = ?feedback.feedback_type,
            comments = feedback.comments.as_deref().unwrap_or(""),
            "Feedback received"
        );
        Ok(())
    }
}

/// Appends one JSON object per line to a file.
pub struct JsonlFeedbackStore {
    path: PathBuf,
    // Serializes writers so lines never interleave
    write_lock: Mutex<()>,
}

impl JsonlFeedbackStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl FeedbackStore for JsonlFeedbackStore {
    async fn append(&self, feedback: FeedbackRecord) -> Result<()> {
        let mut line = serde_json::to_string(&feedback)
            .map_err(|e| AppError::Internal(format!("Failed to encode feedback: {}", e)))?;
        line.push('\n');

        let _guard = self.write_lock.lock().await;
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await?;
        file.write_all(line.as_bytes()).await?;
        file.flush().await?;

        tracing::debug!(message_id = %feedback.message_id, "Feedback stored");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::FeedbackType;
    use chrono::Utc;

    fn record(id: &str) -> FeedbackRecord {
        FeedbackRecord {
            message_id: id.to_string(),
            user_id: "u1".to_string(),
            feedback_type: FeedbackType::Positive,
            comments: Some("great".to_string()),
            received_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_logging_store_accepts() {
        assert!(LoggingFeedbackStore.append(record("m1")).await.is_ok());
    }

    #[tokio::test]
    async fn test_jsonl_store_appends_lines() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonlFeedbackStore::new(dir.path().join("nested/feedback.jsonl"));

        store.append(record("m1")).await.unwrap();
        store.append(record("m2")).await.unwrap();

        let content = tokio::fs::read_to_string(store.path()).await.unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 2);

        let second: FeedbackRecord = serde_json::from_str(lines[1]).unwrap();
        assert_eq!(second.message_id, "m2");
        assert_eq!(second.feedback_type, FeedbackType::Positive);
    }
}
