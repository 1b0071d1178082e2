// ABOUTME: Volume operations capability for daemon clients.
// ABOUTME: Create, list, and remove named volumes.

use super::error::ClientError;
use super::shared_types::VolumeSummary;
use crate::types::VolumeName;
use async_trait::async_trait;

#[async_trait]
pub trait VolumeOps: Send + Sync {
    async fn create_volume(&self, name: &VolumeName) -> Result<VolumeSummary, ClientError>;

    async fn list_volumes(&self) -> Result<Vec<VolumeSummary>, ClientError>;

    async fn remove_volume(&self, name: &VolumeName, force: bool) -> Result<(), ClientError>;
}
