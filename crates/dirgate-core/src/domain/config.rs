//! Directory source configuration.

use std::collections::{HashMap, HashSet};
use std::path::Path;

use serde::{Deserialize, Serialize};

/// One configured directory source: connection parameters plus the
/// source-native -> canonical attribute mappings for users and groups.
///
/// Configuration is an immutable snapshot shared across requests. Attribute
/// filtering never mutates it in place; the authorization resolver produces a
/// freshly-allocated, request-scoped copy via [`SourceConfig::retaining`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceConfig {
    /// Identifier used in configuration and log lines.
    pub id: String,

    /// Connection parameters handed to the source collaborator
    /// (host, base DNs, bind credentials, ...). Opaque to the gateway.
    #[serde(default)]
    pub params: HashMap<String, String>,

    /// User attribute mapping: (source-native name, canonical name) pairs,
    /// in configuration order.
    #[serde(default)]
    pub user_attributes: Vec<(String, String)>,

    /// Group attribute mapping, same shape as `user_attributes`.
    #[serde(default)]
    pub group_attributes: Vec<(String, String)>,
}

impl SourceConfig {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            params: HashMap::new(),
            user_attributes: Vec::new(),
            group_attributes: Vec::new(),
        }
    }

    pub fn with_user_attribute(
        mut self,
        native: impl Into<String>,
        canonical: impl Into<String>,
    ) -> Self {
        self.user_attributes.push((native.into(), canonical.into()));
        self
    }

    pub fn with_group_attribute(
        mut self,
        native: impl Into<String>,
        canonical: impl Into<String>,
    ) -> Self {
        self.group_attributes
            .push((native.into(), canonical.into()));
        self
    }

    /// A fresh copy keeping only mappings whose canonical name is permitted.
    pub fn retaining(&self, permitted: &HashSet<String>) -> Self {
        let keep = |mappings: &[(String, String)]| {
            mappings
                .iter()
                .filter(|(_, canonical)| permitted.contains(canonical))
                .cloned()
                .collect()
        };
        Self {
            id: self.id.clone(),
            params: self.params.clone(),
            user_attributes: keep(&self.user_attributes),
            group_attributes: keep(&self.group_attributes),
        }
    }

    /// Canonical attribute names this source can emit, users and groups.
    pub fn canonical_names(&self) -> impl Iterator<Item = &str> {
        self.user_attributes
            .iter()
            .chain(self.group_attributes.iter())
            .map(|(_, canonical)| canonical.as_str())
    }
}

/// Parse a JSON array of source configurations.
pub fn source_configs_from_json(json: &str) -> anyhow::Result<Vec<SourceConfig>> {
    Ok(serde_json::from_str(json)?)
}

impl SourceConfig {
    /// Load source configurations from a JSON file.
    pub fn load_all(path: &Path) -> anyhow::Result<Vec<SourceConfig>> {
        let json = std::fs::read_to_string(path)?;
        source_configs_from_json(&json)
    }
}
