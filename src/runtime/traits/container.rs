// ABOUTME: Container operations capability for daemon clients.
// ABOUTME: Create, drive lifecycle transitions, and list containers.

use super::error::ClientError;
use super::shared_types::{ContainerFilter, ContainerSummary, ControlAction, CreateRequest};
use crate::types::ContainerId;
use async_trait::async_trait;

/// Container lifecycle RPCs.
#[async_trait]
pub trait ContainerOps: Send + Sync {
    /// Create a container and return the daemon-assigned id.
    async fn create_container(&self, request: &CreateRequest) -> Result<ContainerId, ClientError>;

    /// Issue one lifecycle action. The daemon decides whether the transition is valid.
    async fn control(&self, id: &ContainerId, action: ControlAction) -> Result<(), ClientError>;

    /// List containers matching the filter, in daemon order.
    async fn list_containers(
        &self,
        filter: &ContainerFilter,
    ) -> Result<Vec<ContainerSummary>, ClientError>;
}
