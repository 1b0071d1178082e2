// ABOUTME: Container creation and lifecycle transitions.
// ABOUTME: Each transition is exactly one RPC; the daemon enforces validity.

use std::collections::BTreeMap;

use super::error::{map_client_error, map_create_error};
use super::{ContainerHandle, ContainerOrchestrator, ContainerSpec, Result, SERVICE_TYPE_LABEL};
use crate::runtime::{ControlAction, CreateRequest, HostSettings, RestartPolicy, RuntimeClient};

/// Translate a validated spec into the daemon's creation request.
pub(crate) fn create_request(spec: &ContainerSpec) -> CreateRequest {
    let mut labels = BTreeMap::new();
    if !spec.service_type().is_empty() {
        labels.insert(
            SERVICE_TYPE_LABEL.to_string(),
            spec.service_type().to_string(),
        );
    }

    CreateRequest {
        name: spec.name().to_string(),
        image: spec.image().reference(),
        env: spec.environment().to_vec(),
        labels,
        host: HostSettings {
            port_bindings: spec.port_mappings().to_vec(),
            restart_policy: if spec.auto_restart() {
                RestartPolicy::Always
            } else {
                RestartPolicy::No
            },
        },
    }
}

impl<C: RuntimeClient> ContainerOrchestrator<C> {
    /// Create a container from a validated spec.
    ///
    /// Allocates daemon-side resources even if the container is never started.
    /// A missing image surfaces as `DaemonRejected`.
    pub async fn create_container(&self, spec: &ContainerSpec) -> Result<ContainerHandle> {
        let request = create_request(spec);
        tracing::debug!(
            "creating container {:?} from {}",
            request.name,
            request.image
        );

        let id = self
            .client
            .create_container(&request)
            .await
            .map_err(map_create_error)?;

        tracing::info!("created container {} ({})", id.short(), request.image);
        Ok(ContainerHandle::from(id))
    }

    pub async fn start_container(&self, handle: &ContainerHandle) -> Result<()> {
        self.control(handle, ControlAction::Start).await
    }

    /// Stop using the configured timeout and signal; the daemon default applies when unset.
    pub async fn stop_container(&self, handle: &ContainerHandle) -> Result<()> {
        let action = ControlAction::Stop {
            timeout: self.stop.timeout,
            signal: self.stop.signal.clone(),
        };
        self.control(handle, action).await
    }

    pub async fn restart_container(&self, handle: &ContainerHandle) -> Result<()> {
        let action = ControlAction::Restart {
            timeout: self.stop.timeout,
        };
        self.control(handle, action).await
    }

    pub async fn pause_container(&self, handle: &ContainerHandle) -> Result<()> {
        self.control(handle, ControlAction::Pause).await
    }

    pub async fn unpause_container(&self, handle: &ContainerHandle) -> Result<()> {
        self.control(handle, ControlAction::Unpause).await
    }

    /// Remove a stopped container. A running container is rejected by the daemon.
    ///
    /// The handle is consumed; a retained copy of its id fails with `NotFound`.
    ///
    /// ```compile_fail,E0382
    /// use berth::orchestrator::{ContainerHandle, ContainerOrchestrator};
    /// use berth::runtime::BollardClient;
    ///
    /// async fn remove_then_start(orch: ContainerOrchestrator<BollardClient>, handle: ContainerHandle) {
    ///     let _ = orch.remove_container(handle).await;
    ///     let _ = orch.start_container(&handle).await;
    /// }
    /// ```
    pub async fn remove_container(&self, handle: ContainerHandle) -> Result<()> {
        self.control(&handle, ControlAction::Remove { force: false })
            .await
    }

    /// Remove a container whatever its state, killing it first if it runs.
    pub async fn remove_container_forced(&self, handle: ContainerHandle) -> Result<()> {
        self.control(&handle, ControlAction::Remove { force: true })
            .await
    }

    async fn control(&self, handle: &ContainerHandle, action: ControlAction) -> Result<()> {
        let operation = action.name();
        tracing::debug!("{} container {}", operation, handle.id().short());

        self.client
            .control(handle.id(), action)
            .await
            .map_err(|e| map_client_error(operation, handle.id().as_str(), e))?;

        tracing::info!("{} container {}: ok", operation, handle.id().short());
        Ok(())
    }
}
