// ABOUTME: Daemon flavour and connection settings.
// ABOUTME: RuntimeType, the resolved DaemonEndpoint, and the RuntimeConfig override.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// The daemon flavour. Both speak the Docker Engine API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RuntimeType {
    Docker,
    Podman,
}

impl fmt::Display for RuntimeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuntimeType::Docker => write!(f, "docker"),
            RuntimeType::Podman => write!(f, "podman"),
        }
    }
}

/// A daemon socket that was found or configured.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DaemonEndpoint {
    pub runtime_type: RuntimeType,
    pub socket_path: String,
}

/// Explicit connection settings. Unset fields fall back to detection.
#[derive(Debug, Clone, Deserialize)]
pub struct RuntimeConfig {
    #[serde(default)]
    pub runtime: Option<RuntimeType>,

    #[serde(default)]
    pub socket: Option<String>,

    /// Per-request timeout handed to the transport.
    #[serde(default = "default_timeout", with = "humantime_serde")]
    pub timeout: Duration,
}

fn default_timeout() -> Duration {
    Duration::from_secs(120)
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            runtime: None,
            socket: None,
            timeout: default_timeout(),
        }
    }
}
