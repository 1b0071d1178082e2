// ABOUTME: Container lifecycle orchestration against an injected daemon client.
// ABOUTME: Translates validated specs into RPCs and mediates inspection and streaming.

mod error;
mod handle;
mod inspect;
mod lifecycle;
mod spec;
mod state;
mod storage;
mod streams;

pub use error::{ErrorKind, OrchestratorError};
pub use handle::ContainerHandle;
pub use spec::{ContainerSpec, ContainerSpecBuilder, SpecError};
pub use state::ContainerState;
pub use streams::{LogStream, StatsStream};

use crate::config::StopConfig;
use crate::runtime::{RuntimeClient, RuntimeMetadata};

/// Label carrying the informational service type of a container.
pub const SERVICE_TYPE_LABEL: &str = "berth.service-type";

pub type Result<T> = std::result::Result<T, OrchestratorError>;

/// Drives containers on one daemon.
///
/// Holds no state besides the client, so concurrent calls need no locking.
/// The daemon serializes conflicting transitions on the same container; callers
/// that need ordering between two calls on one handle must sequence them.
pub struct ContainerOrchestrator<C> {
    client: C,
    stop: StopConfig,
}

impl<C: RuntimeClient> ContainerOrchestrator<C> {
    pub fn new(client: C) -> Self {
        Self {
            client,
            stop: StopConfig::default(),
        }
    }

    /// Use this timeout and signal for `stop_container`.
    pub fn with_stop_config(mut self, stop: StopConfig) -> Self {
        self.stop = stop;
        self
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    /// Check that the daemon answers.
    pub async fn ping(&self) -> Result<()> {
        self.client
            .ping()
            .await
            .map_err(|e| error::map_client_error("ping", "daemon", e))
    }

    pub async fn info(&self) -> Result<RuntimeMetadata> {
        self.client
            .info()
            .await
            .map_err(|e| error::map_client_error("info", "daemon", e))
    }
}
