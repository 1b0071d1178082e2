// ABOUTME: Connect-time error types with SNAFU pattern.
// ABOUTME: Unifies discovery and connection failures for programmatic handling.

use snafu::Snafu;

use super::detection::DetectionError;

/// Failure to obtain a client for a daemon.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum ConnectError {
    #[snafu(display("daemon discovery failed: {source}"))]
    Detection { source: DetectionError },

    #[snafu(display("cannot connect to {socket}: {message}"))]
    Connection { socket: String, message: String },
}

/// Error kind for programmatic handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectErrorKind {
    /// No daemon socket found on this machine.
    NoRuntimeFound,
    /// `DOCKER_HOST` points at something other than a unix socket.
    UnsupportedHost,
    /// The socket exists but the client could not be set up.
    ConnectionFailed,
}

impl ConnectError {
    pub fn kind(&self) -> ConnectErrorKind {
        match self {
            ConnectError::Detection { source } => match source {
                DetectionError::NoRuntimeFound => ConnectErrorKind::NoRuntimeFound,
                DetectionError::UnsupportedHost(_) => ConnectErrorKind::UnsupportedHost,
            },
            ConnectError::Connection { .. } => ConnectErrorKind::ConnectionFailed,
        }
    }

    /// The socket path, for connection failures.
    pub fn socket(&self) -> Option<&str> {
        match self {
            ConnectError::Connection { socket, .. } => Some(socket),
            ConnectError::Detection { .. } => None,
        }
    }
}

impl From<DetectionError> for ConnectError {
    fn from(source: DetectionError) -> Self {
        ConnectError::Detection { source }
    }
}
