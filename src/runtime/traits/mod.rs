// ABOUTME: Composable capability traits for container daemon clients.
// ABOUTME: RuntimeClient is the union, implemented for anything with every capability.

mod container;
mod daemon;
mod error;
mod image;
mod logs;
mod shared_types;
mod stats;
mod volume;

pub use container::ContainerOps;
pub use daemon::DaemonOps;
pub use error::ClientError;
pub use image::ImageOps;
pub use logs::LogOps;
pub use shared_types::*;
pub use stats::StatsOps;
pub use volume::VolumeOps;

/// Everything the orchestrator needs from a daemon.
pub trait RuntimeClient: ContainerOps + ImageOps + VolumeOps + LogOps + StatsOps + DaemonOps {}

impl<T> RuntimeClient for T where T: ContainerOps + ImageOps + VolumeOps + LogOps + StatsOps + DaemonOps
{}
