//! Registered service descriptor - a downstream/proxying service known to
//! the service registry.

/// A registered service row from the registry.
///
/// Only descriptors with `allowed_to_proxy && enabled && !ignore_attributes`
/// participate in attribute filtering. The allowed attribute names are not
/// carried here - they are resolved lazily by querying the registry with the
/// ids of the descriptors whose pattern matched the proxying service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceDescriptor {
    /// Internal registry identifier.
    pub id: i64,

    /// Ant-style pattern for the service's callback URL.
    pub pattern: String,

    pub allowed_to_proxy: bool,
    pub enabled: bool,
    pub ignore_attributes: bool,
}

impl ServiceDescriptor {
    /// Whether this descriptor takes part in attribute filtering at all.
    pub fn enforces_attributes(&self) -> bool {
        self.allowed_to_proxy && self.enabled && !self.ignore_attributes
    }
}
