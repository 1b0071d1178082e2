// ABOUTME: Immutable, validated description of a container to create.
// ABOUTME: Built through ContainerSpecBuilder; validation runs once in build().

use crate::types::{ImageName, ImageNameError, PortMapping, PortMappingError};
use std::collections::HashSet;
use thiserror::Error;

/// Local validation failures. None of these ever reach the daemon.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SpecError {
    #[error("image name is required")]
    EmptyImage,

    #[error("invalid image name: {0}")]
    InvalidImage(ImageNameError),

    #[error("invalid port mapping: {0}")]
    InvalidPort(#[from] PortMappingError),

    #[error("host port {0} is mapped more than once")]
    DuplicateHostPort(u16),
}

impl From<ImageNameError> for SpecError {
    fn from(err: ImageNameError) -> Self {
        match err {
            ImageNameError::Empty => SpecError::EmptyImage,
            other => SpecError::InvalidImage(other),
        }
    }
}

/// A validated container description.
///
/// There is no way to obtain one with an empty image, a malformed port
/// entry, or two mappings sharing a host port.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContainerSpec {
    name: String,
    image: ImageName,
    service_type: String,
    environment: Vec<String>,
    port_mappings: Vec<PortMapping>,
    auto_restart: bool,
}

impl ContainerSpec {
    pub fn builder(image: impl Into<String>) -> ContainerSpecBuilder {
        ContainerSpecBuilder {
            image: image.into(),
            ..Default::default()
        }
    }

    /// Container name; empty when the daemon should pick one.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn image(&self) -> &ImageName {
        &self.image
    }

    /// Informational tag such as `nginx`.
    pub fn service_type(&self) -> &str {
        &self.service_type
    }

    /// `KEY=VALUE` entries in the order they were added.
    pub fn environment(&self) -> &[String] {
        &self.environment
    }

    pub fn port_mappings(&self) -> &[PortMapping] {
        &self.port_mappings
    }

    pub fn auto_restart(&self) -> bool {
        self.auto_restart
    }
}

#[derive(Debug, Clone)]
enum PortEntry {
    Pair(u16, u16),
    Text(String),
}

/// Collects container settings; nothing is checked until `build()`.
#[derive(Debug, Clone, Default)]
pub struct ContainerSpecBuilder {
    name: String,
    image: String,
    service_type: String,
    environment: Vec<String>,
    ports: Vec<PortEntry>,
    auto_restart: bool,
}

impl ContainerSpecBuilder {
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn service_type(mut self, service_type: impl Into<String>) -> Self {
        self.service_type = service_type.into();
        self
    }

    /// Append a `KEY=VALUE` entry. The text is passed to the daemon unchanged.
    pub fn env(mut self, entry: impl Into<String>) -> Self {
        self.environment.push(entry.into());
        self
    }

    pub fn envs<I, S>(mut self, entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.environment.extend(entries.into_iter().map(Into::into));
        self
    }

    pub fn port(mut self, host_port: u16, container_port: u16) -> Self {
        self.ports.push(PortEntry::Pair(host_port, container_port));
        self
    }

    /// Append a mapping in `"<hostPort>:<containerPort>"` form.
    pub fn port_str(mut self, mapping: impl Into<String>) -> Self {
        self.ports.push(PortEntry::Text(mapping.into()));
        self
    }

    pub fn auto_restart(mut self, enabled: bool) -> Self {
        self.auto_restart = enabled;
        self
    }

    pub fn build(self) -> Result<ContainerSpec, SpecError> {
        let image = ImageName::parse(&self.image)?;

        let mut seen = HashSet::new();
        let mut port_mappings = Vec::with_capacity(self.ports.len());
        for entry in self.ports {
            let mapping = match entry {
                PortEntry::Pair(host, container) => PortMapping::new(host, container)?,
                PortEntry::Text(text) => text.parse::<PortMapping>()?,
            };
            if !seen.insert(mapping.host_port()) {
                return Err(SpecError::DuplicateHostPort(mapping.host_port()));
            }
            port_mappings.push(mapping);
        }

        Ok(ContainerSpec {
            name: self.name,
            image,
            service_type: self.service_type,
            environment: self.environment,
            port_mappings,
            auto_restart: self.auto_restart,
        })
    }
}

impl TryFrom<ContainerSpecBuilder> for ContainerSpec {
    type Error = SpecError;

    fn try_from(builder: ContainerSpecBuilder) -> Result<Self, Self::Error> {
        builder.build()
    }
}
