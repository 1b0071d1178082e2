// ABOUTME: Configuration types and parsing for berth.yml.
// ABOUTME: Container definition, daemon connection settings, and stop behaviour.

mod deserialize;
mod env_value;
mod stop;

pub use env_value::{EnvSection, EnvValue};
pub use stop::StopConfig;

use crate::error::{Error, Result};
use crate::orchestrator::ContainerSpec;
use crate::runtime::RuntimeConfig;
use crate::types::{ImageName, PortMapping};
use deserialize::{deserialize_image_name, deserialize_ports};
use serde::Deserialize;
use std::path::Path;

pub const CONFIG_FILENAME: &str = "berth.yml";
pub const CONFIG_FILENAME_ALT: &str = "berth.yaml";
pub const CONFIG_FILENAME_DIR: &str = ".berth/config.yml";

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub name: String,

    #[serde(deserialize_with = "deserialize_image_name")]
    pub image: ImageName,

    #[serde(default)]
    pub service_type: String,

    #[serde(default)]
    pub env: EnvSection,

    #[serde(default, deserialize_with = "deserialize_ports")]
    pub ports: Vec<PortMapping>,

    #[serde(default)]
    pub auto_restart: bool,

    #[serde(default)]
    pub daemon: RuntimeConfig,

    #[serde(default)]
    pub stop: StopConfig,
}

impl Config {
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: Config = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.daemon.socket.as_deref().is_some_and(str::is_empty) {
            return Err(Error::InvalidConfig("daemon.socket must not be empty".into()));
        }
        if self.stop.signal.as_deref().is_some_and(str::is_empty) {
            return Err(Error::InvalidConfig("stop.signal must not be empty".into()));
        }
        Ok(())
    }

    pub fn load(path: &Path) -> Result<Self> {
        tracing::debug!("loading config from {}", path.display());
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Load the first config file found in `dir`.
    pub fn discover(dir: &Path) -> Result<Self> {
        let candidates = [
            dir.join(CONFIG_FILENAME),
            dir.join(CONFIG_FILENAME_ALT),
            dir.join(CONFIG_FILENAME_DIR),
        ];

        for path in &candidates {
            if path.exists() {
                return Self::load(path);
            }
        }

        Err(Error::ConfigNotFound(dir.to_path_buf()))
    }

    /// Resolve the environment and build a validated spec.
    pub fn container_spec(&self) -> Result<ContainerSpec> {
        let mut builder = ContainerSpec::builder(self.image.to_string())
            .name(self.name.clone())
            .service_type(self.service_type.clone())
            .envs(self.env.resolve()?)
            .auto_restart(self.auto_restart);

        for mapping in &self.ports {
            builder = builder.port(mapping.host_port(), mapping.container_port());
        }

        Ok(builder.build()?)
    }
}
