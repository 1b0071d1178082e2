// ABOUTME: Container lifecycle state as observed from the daemon.
// ABOUTME: Derived per query and never cached.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContainerState {
    Created,
    Running,
    Paused,
    Exited,
    Removed,
    /// The daemon had no matching container, or reported a state we do not model.
    Unknown,
}

impl ContainerState {
    /// Map the daemon's state string.
    ///
    /// `restarting` counts as running and `dead` as exited; `removing` is
    /// already on its way to `Removed`.
    pub fn from_daemon(state: &str) -> Self {
        match state.trim().to_ascii_lowercase().as_str() {
            "created" => ContainerState::Created,
            "running" | "restarting" => ContainerState::Running,
            "paused" => ContainerState::Paused,
            "exited" | "dead" => ContainerState::Exited,
            "removing" => ContainerState::Removed,
            _ => ContainerState::Unknown,
        }
    }

    pub fn is_running(&self) -> bool {
        *self == ContainerState::Running
    }
}

impl fmt::Display for ContainerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ContainerState::Created => "created",
            ContainerState::Running => "running",
            ContainerState::Paused => "paused",
            ContainerState::Exited => "exited",
            ContainerState::Removed => "removed",
            ContainerState::Unknown => "unknown",
        };
        f.write_str(s)
    }
}
