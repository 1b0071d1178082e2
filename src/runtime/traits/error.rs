// ABOUTME: Error type shared by every daemon client capability.
// ABOUTME: Separates connectivity failures from structured daemon responses.

/// Failure reported by a `RuntimeClient`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ClientError {
    /// Connection refused, broken pipe, timeout, or an undecodable response.
    #[error("transport error: {0}")]
    Transport(String),

    /// The daemon answered with an error status.
    #[error("daemon error ({status}): {message}")]
    Daemon { status: u16, message: String },
}

impl ClientError {
    pub fn daemon(status: u16, message: impl Into<String>) -> Self {
        ClientError::Daemon {
            status,
            message: message.into(),
        }
    }

    pub fn transport(message: impl Into<String>) -> Self {
        ClientError::Transport(message.into())
    }

    /// HTTP-style status code, for daemon errors.
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Daemon { status, .. } => Some(*status),
            ClientError::Transport(_) => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }

    pub fn message(&self) -> &str {
        match self {
            ClientError::Daemon { message, .. } | ClientError::Transport(message) => message,
        }
    }
}
