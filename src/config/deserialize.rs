// ABOUTME: Custom serde deserializers for config types.
// ABOUTME: Parses image names and port mappings while the YAML is read.

use serde::Deserialize;

use crate::types::{ImageName, PortMapping};

pub fn deserialize_image_name<'de, D>(deserializer: D) -> Result<ImageName, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    ImageName::parse(&s).map_err(serde::de::Error::custom)
}

pub fn deserialize_ports<'de, D>(deserializer: D) -> Result<Vec<PortMapping>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let values: Vec<PortEntry> = Vec::deserialize(deserializer)?;
    values
        .into_iter()
        .map(PortEntry::into_mapping)
        .collect::<Result<Vec<_>, _>>()
        .map_err(serde::de::Error::custom)
}

/// `"8080:80"` or `{ host: 8080, container: 80 }`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum PortEntry {
    Simple(String),
    Detailed { host: u16, container: u16 },
}

impl PortEntry {
    fn into_mapping(self) -> Result<PortMapping, String> {
        match self {
            PortEntry::Simple(s) => s.parse().map_err(|e| format!("{s:?}: {e}")),
            PortEntry::Detailed { host, container } => {
                PortMapping::new(host, container).map_err(|e| e.to_string())
            }
        }
    }
}
