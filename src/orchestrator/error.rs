// ABOUTME: Error taxonomy surfaced by the orchestrator.
// ABOUTME: Maps daemon status codes per operation into caller-facing kinds.

use super::spec::SpecError;
use crate::runtime::ClientError;

/// Errors from orchestrator operations.
///
/// A failed call never leaves the orchestrator unusable; nothing is retried.
#[derive(Debug, thiserror::Error)]
pub enum OrchestratorError {
    /// Local validation failed; no RPC was issued.
    #[error("invalid container spec: {0}")]
    InvalidSpec(#[from] SpecError),

    /// The daemon does not know the container, image, or volume.
    #[error("not found: {0}")]
    NotFound(String),

    /// The daemon refused the request, e.g. an invalid state transition.
    #[error("daemon rejected {operation} ({status}): {message}")]
    DaemonRejected {
        operation: &'static str,
        status: u16,
        message: String,
    },

    /// Removal blocked because another resource still references the target.
    #[error("in use: {0}")]
    InUse(String),

    #[error("failed to pull {image}: {message}")]
    PullFailed { image: String, message: String },

    #[error("transport error: {0}")]
    Transport(String),
}

/// Error kind for programmatic handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidSpec,
    NotFound,
    DaemonRejected,
    InUse,
    PullFailed,
    Transport,
}

impl OrchestratorError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            OrchestratorError::InvalidSpec(_) => ErrorKind::InvalidSpec,
            OrchestratorError::NotFound(_) => ErrorKind::NotFound,
            OrchestratorError::DaemonRejected { .. } => ErrorKind::DaemonRejected,
            OrchestratorError::InUse(_) => ErrorKind::InUse,
            OrchestratorError::PullFailed { .. } => ErrorKind::PullFailed,
            OrchestratorError::Transport(_) => ErrorKind::Transport,
        }
    }
}

fn rejected(operation: &'static str, status: u16, message: String) -> OrchestratorError {
    OrchestratorError::DaemonRejected {
        operation,
        status,
        message,
    }
}

/// Default mapping: 404 is `NotFound`, any other daemon status is a rejection.
pub(crate) fn map_client_error(
    operation: &'static str,
    target: &str,
    e: ClientError,
) -> OrchestratorError {
    match e {
        ClientError::Transport(message) => OrchestratorError::Transport(message),
        ClientError::Daemon { status: 404, .. } => OrchestratorError::NotFound(target.to_string()),
        ClientError::Daemon { status, message } => rejected(operation, status, message),
    }
}

/// On create, 404 means the image is missing, which is a rejection of the request.
pub(crate) fn map_create_error(e: ClientError) -> OrchestratorError {
    match e {
        ClientError::Transport(message) => OrchestratorError::Transport(message),
        ClientError::Daemon { status, message } => rejected("create", status, message),
    }
}

/// Image and volume removal: 409 means a container still references the target.
pub(crate) fn map_removal_error(
    operation: &'static str,
    target: &str,
    e: ClientError,
) -> OrchestratorError {
    match e {
        ClientError::Daemon { status: 409, message } => {
            OrchestratorError::InUse(format!("{target}: {message}"))
        }
        other => map_client_error(operation, target, other),
    }
}

/// Any daemon-reported failure during a pull is a pull failure.
pub(crate) fn map_pull_error(image: &str, e: ClientError) -> OrchestratorError {
    match e {
        ClientError::Transport(message) => OrchestratorError::Transport(message),
        ClientError::Daemon { message, .. } => OrchestratorError::PullFailed {
            image: image.to_string(),
            message,
        },
    }
}
