// ABOUTME: Host-to-container TCP port mapping and its "host:container" text form.
// ABOUTME: Both ports must be in 1..=65535; there is no defaulting.

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PortMappingError {
    #[error("port mapping {0:?} must have the form \"<hostPort>:<containerPort>\"")]
    MissingSeparator(String),

    #[error("invalid port number: {0:?}")]
    InvalidPort(String),

    #[error("port 0 is not allowed")]
    ZeroPort,
}

/// Binds `container_port/tcp` inside the container to `host_port` on the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PortMapping {
    host_port: u16,
    container_port: u16,
}

impl PortMapping {
    pub fn new(host_port: u16, container_port: u16) -> Result<Self, PortMappingError> {
        if host_port == 0 || container_port == 0 {
            return Err(PortMappingError::ZeroPort);
        }
        Ok(Self {
            host_port,
            container_port,
        })
    }

    pub fn host_port(&self) -> u16 {
        self.host_port
    }

    pub fn container_port(&self) -> u16 {
        self.container_port
    }

    /// Key used by the daemon's port-binding map, e.g. `80/tcp`.
    pub fn container_key(&self) -> String {
        format!("{}/tcp", self.container_port)
    }
}

fn parse_port(text: &str) -> Result<u16, PortMappingError> {
    // u16::from_str accepts a leading '+', the wire format does not.
    if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
        return Err(PortMappingError::InvalidPort(text.to_string()));
    }
    text.parse()
        .map_err(|_| PortMappingError::InvalidPort(text.to_string()))
}

impl FromStr for PortMapping {
    type Err = PortMappingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let (host, container) = s
            .split_once(':')
            .ok_or_else(|| PortMappingError::MissingSeparator(s.to_string()))?;
        Self::new(parse_port(host)?, parse_port(container)?)
    }
}

impl fmt::Display for PortMapping {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.host_port, self.container_port)
    }
}
