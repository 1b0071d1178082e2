// ABOUTME: Daemon client contract, discovery, and the bollard implementation.
// ABOUTME: Re-exports capability traits and the types they exchange.

mod bollard;
mod detection;
mod error;
pub mod traits;
mod types;

pub use self::bollard::{BollardClient, connect};
pub use detection::{DetectionError, detect_local, resolve_endpoint};
pub use error::{ConnectError, ConnectErrorKind};
pub use traits::*;
pub use types::{DaemonEndpoint, RuntimeConfig, RuntimeType};
