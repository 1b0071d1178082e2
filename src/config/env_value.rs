// ABOUTME: Environment entries for a container definition.
// ABOUTME: Literal values, host environment lookups, and KEY=VALUE rendering.

use crate::error::{Error, Result};
use serde::Deserialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum EnvValue {
    Literal(String),
    FromEnv {
        #[serde(rename = "env")]
        var: String,
        #[serde(default)]
        default: Option<String>,
    },
}

impl EnvValue {
    pub fn resolve(&self) -> Result<String> {
        match self {
            EnvValue::Literal(s) => Ok(s.clone()),
            EnvValue::FromEnv { var, default } => match std::env::var(var) {
                Ok(val) => Ok(val),
                Err(_) => default
                    .clone()
                    .ok_or_else(|| Error::MissingEnvVar(var.clone())),
            },
        }
    }
}

/// The `env` section: verbatim `KEY=VALUE` lines, or a map of values.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum EnvSection {
    List(Vec<String>),
    Map(BTreeMap<String, EnvValue>),
}

impl Default for EnvSection {
    fn default() -> Self {
        EnvSection::List(Vec::new())
    }
}

impl EnvSection {
    /// Render to `KEY=VALUE` entries. Map entries come out in key order.
    pub fn resolve(&self) -> Result<Vec<String>> {
        match self {
            EnvSection::List(entries) => Ok(entries.clone()),
            EnvSection::Map(map) => map
                .iter()
                .map(|(k, v)| v.resolve().map(|resolved| format!("{k}={resolved}")))
                .collect(),
        }
    }
}
