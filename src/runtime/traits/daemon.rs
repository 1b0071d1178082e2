// ABOUTME: Daemon metadata capability for daemon clients.
// ABOUTME: Connectivity check and version query.

use super::error::ClientError;
use super::shared_types::RuntimeMetadata;
use async_trait::async_trait;

#[async_trait]
pub trait DaemonOps: Send + Sync {
    async fn info(&self) -> Result<RuntimeMetadata, ClientError>;

    async fn ping(&self) -> Result<(), ClientError>;
}
