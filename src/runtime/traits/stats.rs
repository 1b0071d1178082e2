// ABOUTME: Resource statistics capability for daemon clients.
// ABOUTME: Streams point-in-time usage snapshots for a container.

use super::error::ClientError;
use super::shared_types::SnapshotStream;
use crate::types::ContainerId;
use async_trait::async_trait;

#[async_trait]
pub trait StatsOps: Send + Sync {
    /// Open a snapshot stream. With `follow` unset the daemon sends a single
    /// snapshot and closes the stream.
    async fn stats(&self, id: &ContainerId, follow: bool) -> Result<SnapshotStream, ClientError>;
}
