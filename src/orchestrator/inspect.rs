// ABOUTME: Status queries, listing, and log/stats streaming.
// ABOUTME: State always comes from the daemon; nothing is cached.

use futures::StreamExt;

use super::error::map_client_error;
use super::streams::map_stream;
use super::{
    ContainerHandle, ContainerOrchestrator, ContainerState, LogStream, OrchestratorError, Result,
    StatsStream,
};
use crate::runtime::{ContainerFilter, LogOptions, RuntimeClient, Statistics};

impl<C: RuntimeClient> ContainerOrchestrator<C> {
    /// Current state, or `None` when the daemon has no such container.
    ///
    /// A shortened id works as long as it names exactly one container; an
    /// ambiguous prefix is rejected.
    pub async fn inspect_state(&self, handle: &ContainerHandle) -> Result<Option<ContainerState>> {
        // An empty id filter would match every container.
        if handle.id().is_empty() {
            return Ok(None);
        }

        let matches = self
            .client
            .list_containers(&ContainerFilter::by_id(handle.id()))
            .await
            .map_err(|e| map_client_error("inspect", handle.id().as_str(), e))?;

        // The daemon's id filter is a loose match; only ids starting with ours count.
        let id = handle.id().as_str();
        let mut candidates: Vec<_> = matches
            .into_iter()
            .filter(|c| c.id.as_str().starts_with(id))
            .collect();

        if let Some(pos) = candidates.iter().position(|c| c.id.as_str() == id) {
            let exact = candidates.swap_remove(pos);
            return Ok(Some(ContainerState::from_daemon(&exact.state)));
        }
        match candidates.len() {
            0 => Ok(None),
            1 => Ok(Some(ContainerState::from_daemon(&candidates[0].state))),
            n => Err(OrchestratorError::DaemonRejected {
                operation: "inspect",
                status: 400,
                message: format!("id prefix {id} matches {n} containers"),
            }),
        }
    }

    /// Current state, with an unknown container reported as `Unknown`.
    ///
    /// Convenient for polling after removal, at the cost of hiding a mistyped id.
    /// Use `inspect_state` to tell the two apart.
    pub async fn container_status(&self, handle: &ContainerHandle) -> Result<ContainerState> {
        let state = self.inspect_state(handle).await?;
        if state.is_none() {
            tracing::warn!("container {} not found, reporting unknown", handle.id().short());
        }
        Ok(state.unwrap_or(ContainerState::Unknown))
    }

    /// Container handles in daemon order. Order is for display only.
    pub async fn list_containers(&self, include_stopped: bool) -> Result<Vec<ContainerHandle>> {
        let filter = ContainerFilter {
            all: include_stopped,
            ..Default::default()
        };

        let containers = self
            .client
            .list_containers(&filter)
            .await
            .map_err(|e| map_client_error("list", "containers", e))?;

        Ok(containers
            .into_iter()
            .map(|c| ContainerHandle::from(c.id))
            .collect())
    }

    /// Follow combined stdout/stderr.
    ///
    /// The stream ends when the container exits; while it runs the stream waits
    /// for new output, so bound it with a timeout if needed. Drop it to close.
    pub async fn container_logs(&self, handle: &ContainerHandle) -> Result<LogStream> {
        self.container_logs_with(handle, &LogOptions::follow_all())
            .await
    }

    pub async fn container_logs_with(
        &self,
        handle: &ContainerHandle,
        opts: &LogOptions,
    ) -> Result<LogStream> {
        tracing::debug!("opening log stream for {}", handle.id().short());
        let stream = self
            .client
            .logs(handle.id(), opts)
            .await
            .map_err(|e| map_client_error("logs", handle.id().as_str(), e))?;
        Ok(map_stream(stream, "logs", handle.id().to_string()))
    }

    /// A lazy sequence of usage snapshots, one per daemon sample.
    ///
    /// Each call opens a fresh stream; dropping it ends sampling.
    pub async fn stats_stream(&self, handle: &ContainerHandle) -> Result<StatsStream> {
        tracing::debug!("opening stats stream for {}", handle.id().short());
        let stream = self
            .client
            .stats(handle.id(), true)
            .await
            .map_err(|e| map_client_error("stats", handle.id().as_str(), e))?;
        Ok(map_stream(stream, "stats", handle.id().to_string()))
    }

    /// The first snapshot only.
    pub async fn container_stats(&self, handle: &ContainerHandle) -> Result<Statistics> {
        let stream = self
            .client
            .stats(handle.id(), false)
            .await
            .map_err(|e| map_client_error("stats", handle.id().as_str(), e))?;
        let mut stream = map_stream(stream, "stats", handle.id().to_string());

        match stream.next().await {
            Some(snapshot) => snapshot,
            None => Err(OrchestratorError::NotFound(handle.id().to_string())),
        }
    }
}
