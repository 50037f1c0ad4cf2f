//! Directory entity - a user or group record produced by a source query.

use serde::{Deserialize, Serialize};

/// Discriminator between the two entity variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    User,
    Group,
}

/// A user or group returned from a directory source.
///
/// Attributes are multi-valued and keep their insertion order; duplicate
/// values are permitted and never deduplicated. Entities are immutable once
/// produced by a source query - the aggregator only concatenates them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectoryEntity {
    /// Opaque identifier, unique within the source that produced it.
    pub id: String,

    /// User or group.
    pub kind: EntityKind,

    /// Canonical attribute name -> ordered values.
    pub attributes: Vec<(String, Vec<String>)>,
}

impl DirectoryEntity {
    /// Create a user entity with no attributes.
    pub fn user(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind: EntityKind::User,
            attributes: Vec::new(),
        }
    }

    /// Create a group entity with no attributes.
    pub fn group(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind: EntityKind::Group,
            attributes: Vec::new(),
        }
    }

    /// Append values for an attribute, preserving insertion order.
    pub fn with_attribute(
        mut self,
        name: impl Into<String>,
        values: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        let name = name.into();
        let values: Vec<String> = values.into_iter().map(Into::into).collect();
        if let Some((_, existing)) = self.attributes.iter_mut().find(|(n, _)| *n == name) {
            existing.extend(values);
        } else {
            self.attributes.push((name, values));
        }
        self
    }

    pub fn is_group(&self) -> bool {
        self.kind == EntityKind::Group
    }

    /// Attribute names in insertion order.
    pub fn attribute_names(&self) -> impl Iterator<Item = &str> {
        self.attributes.iter().map(|(name, _)| name.as_str())
    }

    /// Values for one attribute, in their original order.
    pub fn values(&self, name: &str) -> Option<&[String]> {
        self.attributes
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, values)| values.as_slice())
    }
}
