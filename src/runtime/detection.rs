// ABOUTME: Local daemon discovery for Docker and Podman.
// ABOUTME: Honors DOCKER_HOST, then checks well-known Podman and Docker sockets.

use super::types::{DaemonEndpoint, RuntimeConfig, RuntimeType};
use std::path::Path;

/// Error during daemon discovery.
#[derive(Debug, thiserror::Error)]
pub enum DetectionError {
    #[error("no container daemon found (checked DOCKER_HOST, Podman and Docker sockets)")]
    NoRuntimeFound,

    #[error("unsupported DOCKER_HOST {0:?}: only unix:// sockets are supported")]
    UnsupportedHost(String),
}

const ROOTFUL_PODMAN: &str = "/run/podman/podman.sock";
const DOCKER_SOCKET: &str = "/var/run/docker.sock";

/// Find a daemon socket on this machine.
///
/// Detection order:
/// 1. `DOCKER_HOST`, when set to a `unix://` URL
/// 2. Rootless Podman socket (`/run/user/$UID/podman/podman.sock`)
/// 3. Rootful Podman socket (`/run/podman/podman.sock`)
/// 4. Docker socket (`/var/run/docker.sock`)
pub fn detect_local() -> Result<DaemonEndpoint, DetectionError> {
    if let Some(endpoint) = from_docker_host()? {
        return Ok(endpoint);
    }

    let mut candidates = Vec::with_capacity(3);
    if let Some(uid) = current_uid() {
        candidates.push((
            RuntimeType::Podman,
            format!("/run/user/{uid}/podman/podman.sock"),
        ));
    }
    candidates.push((RuntimeType::Podman, ROOTFUL_PODMAN.to_string()));
    candidates.push((RuntimeType::Docker, DOCKER_SOCKET.to_string()));

    candidates
        .into_iter()
        .find(|(_, path)| Path::new(path).exists())
        .map(|(runtime_type, socket_path)| DaemonEndpoint {
            runtime_type,
            socket_path,
        })
        .ok_or(DetectionError::NoRuntimeFound)
}

/// Resolve an endpoint, letting explicit config take precedence.
///
/// A configured socket without a runtime type is guessed from its path.
pub fn resolve_endpoint(config: &RuntimeConfig) -> Result<DaemonEndpoint, DetectionError> {
    match (&config.socket, config.runtime) {
        (Some(socket), runtime) => Ok(DaemonEndpoint {
            runtime_type: runtime.unwrap_or_else(|| guess_runtime(socket)),
            socket_path: socket.clone(),
        }),
        (None, Some(runtime_type)) => Ok(DaemonEndpoint {
            runtime_type,
            socket_path: default_socket_path(runtime_type),
        }),
        (None, None) => detect_local(),
    }
}

fn from_docker_host() -> Result<Option<DaemonEndpoint>, DetectionError> {
    let Ok(host) = std::env::var("DOCKER_HOST") else {
        return Ok(None);
    };
    if host.is_empty() {
        return Ok(None);
    }
    let path = host
        .strip_prefix("unix://")
        .ok_or_else(|| DetectionError::UnsupportedHost(host.clone()))?;
    Ok(Some(DaemonEndpoint {
        runtime_type: guess_runtime(path),
        socket_path: path.to_string(),
    }))
}

fn guess_runtime(socket: &str) -> RuntimeType {
    if socket.contains("podman") {
        RuntimeType::Podman
    } else {
        RuntimeType::Docker
    }
}

fn default_socket_path(runtime: RuntimeType) -> String {
    match runtime {
        RuntimeType::Docker => DOCKER_SOCKET.to_string(),
        RuntimeType::Podman => ROOTFUL_PODMAN.to_string(),
    }
}

fn current_uid() -> Option<String> {
    std::env::var("UID").ok().or_else(|| {
        std::fs::read_to_string("/proc/self/status")
            .ok()
            .and_then(|s| {
                s.lines()
                    .find(|l| l.starts_with("Uid:"))
                    .and_then(|l| l.split_whitespace().nth(1))
                    .map(str::to_string)
            })
    })
}
