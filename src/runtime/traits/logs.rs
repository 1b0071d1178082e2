// ABOUTME: Log streaming capability for daemon clients.
// ABOUTME: Opens a lazy stream of stdout/stderr frames.

use super::error::ClientError;
use super::shared_types::{LogChunkStream, LogOptions};
use crate::types::ContainerId;
use async_trait::async_trait;

#[async_trait]
pub trait LogOps: Send + Sync {
    /// Open a log stream. With `follow` set the stream stays open while the
    /// container keeps running.
    async fn logs(&self, id: &ContainerId, opts: &LogOptions)
    -> Result<LogChunkStream, ClientError>;
}
