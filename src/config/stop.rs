// ABOUTME: Graceful stop settings for containers.
// ABOUTME: Unset fields leave the choice to the daemon.

use serde::Deserialize;
use std::time::Duration;

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct StopConfig {
    /// Grace period before the daemon kills the container.
    #[serde(default, with = "humantime_serde")]
    pub timeout: Option<Duration>,

    /// Signal sent first, e.g. `SIGTERM`.
    #[serde(default)]
    pub signal: Option<String>,
}
