use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::descriptor::ConnectionDescriptor;
use crate::error::MetadataError;
use crate::identifier::MetadataIdentifier;
use crate::retry::RetryPolicy;

// ------------------------------------------------------------
// Root configuration
// ------------------------------------------------------------
//
// This is the top-level configuration structure loaded from
// `config.json`.
//
// It defines:
// - Metadata report backend settings
// - Identifiers to look up
// - Optional debug configuration
//
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Backend holding the reported metadata
    pub metadata_report: MetadataReportConfig,

    /// Identifiers to resolve on startup
    #[serde(default)]
    pub lookups: Vec<MetadataIdentifier>,

    /// Optional debug configuration
    pub debug: Option<DebugConfig>,
}

// ------------------------------------------------------------
// Metadata report configuration
// ------------------------------------------------------------
//
// Notes:
// - `address` is a full URL, e.g. zookeeper://127.0.0.1:2181?group=dubbo
// - `parameters` are merged over the URL query and win on conflict
// - `retry` only applies to connection setup
//
#[derive(Debug, Deserialize, Clone)]
pub struct MetadataReportConfig {
    pub address: String,

    #[serde(default)]
    pub parameters: BTreeMap<String, String>,

    #[serde(default)]
    pub retry: RetryPolicy,
}

impl MetadataReportConfig {
    pub fn descriptor(&self) -> Result<ConnectionDescriptor, MetadataError> {
        let descriptor = ConnectionDescriptor::parse(&self.address)?;
        Ok(self
            .parameters
            .iter()
            .fold(descriptor, |d, (k, v)| d.with_parameter(k.clone(), v.clone())))
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct DebugConfig {
    /// Enables debug-level logging when RUST_LOG is not set
    pub log: Option<bool>,
}

impl Config {
    pub fn debug_log(&self) -> bool {
        self.debug
            .as_ref()
            .is_some_and(|d| d.log.unwrap_or(false))
    }
}

// ------------------------------------------------------------
// Configuration loader
// ------------------------------------------------------------
//
// Reads a JSON configuration file from disk and deserializes
// it into the strongly typed `Config` structure.
//
pub fn load_config(path: impl AsRef<Path>) -> anyhow::Result<Config> {
    let data = fs::read_to_string(path)?;
    let cfg = serde_json::from_str(&data)?;
    Ok(cfg)
}
