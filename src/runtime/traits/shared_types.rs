// ABOUTME: Request and response types shared across client capability traits.
// ABOUTME: CreateRequest, ControlAction, summaries, snapshots, and stream aliases.

use super::error::ClientError;
use crate::types::{ContainerId, ImageId, PortMapping, VolumeName};
use bytes::Bytes;
use chrono::{DateTime, Utc};
use futures::Stream;
use std::collections::BTreeMap;
use std::pin::Pin;
use std::time::Duration;

/// Lazy, daemon-backed sequence. Dropping it closes the underlying stream.
pub type ClientStream<T> = Pin<Box<dyn Stream<Item = Result<T, ClientError>> + Send>>;

pub type LogChunkStream = ClientStream<LogChunk>;
pub type SnapshotStream = ClientStream<Statistics>;
pub type PullStream = ClientStream<PullProgress>;

/// A fully translated container creation request.
#[derive(Debug, Clone, Default)]
pub struct CreateRequest {
    /// Container name. Empty lets the daemon pick one.
    pub name: String,
    /// Image reference as the daemon should resolve it.
    pub image: String,
    /// `KEY=VALUE` entries, passed through verbatim.
    pub env: Vec<String>,
    pub labels: BTreeMap<String, String>,
    pub host: HostSettings,
}

/// Host-side configuration attached to a new container.
#[derive(Debug, Clone, Default)]
pub struct HostSettings {
    pub port_bindings: Vec<PortMapping>,
    pub restart_policy: RestartPolicy,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RestartPolicy {
    #[default]
    No,
    Always,
}

/// A single lifecycle RPC against an existing container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ControlAction {
    Start,
    Stop {
        timeout: Option<Duration>,
        signal: Option<String>,
    },
    Restart {
        timeout: Option<Duration>,
    },
    Pause,
    Unpause,
    Remove {
        force: bool,
    },
}

impl ControlAction {
    pub fn name(&self) -> &'static str {
        match self {
            ControlAction::Start => "start",
            ControlAction::Stop { .. } => "stop",
            ControlAction::Restart { .. } => "restart",
            ControlAction::Pause => "pause",
            ControlAction::Unpause => "unpause",
            ControlAction::Remove { .. } => "remove",
        }
    }
}

/// Filters for listing containers.
#[derive(Debug, Clone, Default)]
pub struct ContainerFilter {
    /// Restrict to ids matching this one. The daemon matches loosely, so callers
    /// must still compare the returned ids.
    pub id: Option<ContainerId>,
    /// Include containers that are not running.
    pub all: bool,
}

impl ContainerFilter {
    pub fn by_id(id: &ContainerId) -> Self {
        Self {
            id: Some(id.clone()),
            all: true,
        }
    }
}

/// A container as reported by the daemon's list endpoint.
#[derive(Debug, Clone)]
pub struct ContainerSummary {
    pub id: ContainerId,
    pub name: String,
    pub image: String,
    /// Raw daemon state, e.g. `running` or `exited`.
    pub state: String,
    /// Human-readable status, e.g. `Up 3 minutes`.
    pub status: String,
    pub labels: BTreeMap<String, String>,
}

/// Options for opening a log stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogOptions {
    pub stdout: bool,
    pub stderr: bool,
    /// Keep the stream open and yield new output as it is produced.
    pub follow: bool,
    pub timestamps: bool,
    /// Number of lines from the end; `None` means all.
    pub tail: Option<u64>,
}

impl LogOptions {
    /// Combined stdout/stderr, following new output.
    pub fn follow_all() -> Self {
        Self {
            stdout: true,
            stderr: true,
            follow: true,
            timestamps: false,
            tail: None,
        }
    }

    /// The last `n` lines of both streams, then end.
    pub fn tail(n: u64) -> Self {
        Self {
            stdout: true,
            stderr: true,
            follow: false,
            timestamps: false,
            tail: Some(n),
        }
    }
}

impl Default for LogOptions {
    fn default() -> Self {
        Self::follow_all()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogSource {
    Stdout,
    Stderr,
    /// Output of a container started with a TTY, where the streams are merged.
    Console,
}

/// One frame of log output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogChunk {
    pub source: LogSource,
    pub data: Bytes,
}

/// A point-in-time resource usage reading.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Statistics {
    /// CPU usage across all cores (100.0 = one full core).
    pub cpu_percent: f64,
    pub memory_usage: u64,
    pub memory_limit: u64,
    pub memory_percent: f64,
    pub network_rx_bytes: u64,
    pub network_tx_bytes: u64,
    pub block_read_bytes: u64,
    pub block_write_bytes: u64,
    pub pids: u64,
}

/// A progress event emitted while an image is pulled.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PullProgress {
    /// Layer id, when the event concerns a single layer.
    pub layer: Option<String>,
    pub status: String,
    pub current: Option<i64>,
    pub total: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageSummary {
    pub id: ImageId,
    pub repo_tags: Vec<String>,
    pub created: Option<DateTime<Utc>>,
    /// Size in bytes.
    pub size: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VolumeSummary {
    pub name: VolumeName,
    pub driver: String,
    pub mountpoint: String,
}

/// Version and platform details reported by the daemon.
#[derive(Debug, Clone)]
pub struct RuntimeMetadata {
    /// "Docker" or "Podman".
    pub name: String,
    pub version: String,
    pub api_version: String,
    pub os: String,
    pub arch: String,
}
