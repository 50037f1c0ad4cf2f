//! Proxy-scoped attribute authorization.
//!
//! When a request arrives through a proxying service, only the attributes
//! that service is allowed to receive may appear in the response. The
//! resolver computes the permitted set once per request and produces
//! request-scoped filtered copies of the source configurations - shared
//! configuration is never mutated.

use std::collections::HashSet;
use std::sync::Arc;

use dirgate_core::{antpath, Authentication, DirectoryError, ServiceRegistry, SourceConfig};
use tracing::{debug, warn};

/// The set of canonical attribute names a request may receive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttributeFilter {
    /// Direct (non-proxied) or trusted-internal request: no filtering.
    Unrestricted,
    /// Proxied request: only these names pass. An empty set withholds every
    /// attribute (the fail-closed default when no registered service matched).
    Restricted(HashSet<String>),
}

impl AttributeFilter {
    pub fn permits(&self, name: &str) -> bool {
        match self {
            Self::Unrestricted => true,
            Self::Restricted(permitted) => permitted.contains(name),
        }
    }

    pub fn is_unrestricted(&self) -> bool {
        matches!(self, Self::Unrestricted)
    }
}

/// Resolves the permitted attribute set for a request and filters source
/// configurations accordingly.
pub struct AuthorizationResolver {
    registry: Arc<dyn ServiceRegistry>,
}

impl AuthorizationResolver {
    pub fn new(registry: Arc<dyn ServiceRegistry>) -> Self {
        Self { registry }
    }

    /// Compute the attribute filter for an authenticated request.
    ///
    /// A registry failure is a `Configuration` error - an unreachable
    /// registry must never read as "no restriction".
    pub async fn resolve(&self, auth: &Authentication) -> Result<AttributeFilter, DirectoryError> {
        let Some(proxy) = auth.nearest_proxy() else {
            return Ok(AttributeFilter::Unrestricted);
        };

        let descriptors = self.registry.list_proxy_eligible().await.map_err(|e| {
            DirectoryError::Configuration(format!("service registry unavailable: {e}"))
        })?;

        let matching: Vec<i64> = descriptors
            .iter()
            .filter(|descriptor| antpath::matches(&descriptor.pattern, proxy))
            .map(|descriptor| descriptor.id)
            .collect();

        if matching.is_empty() {
            warn!("[Authz] proxy {proxy} matched no registered service; withholding all attributes");
            return Ok(AttributeFilter::Restricted(HashSet::new()));
        }

        let permitted = self
            .registry
            .allowed_attributes_for(&matching)
            .await
            .map_err(|e| {
                DirectoryError::Configuration(format!("attribute lookup failed: {e}"))
            })?;

        debug!(
            "[Authz] proxy {proxy} matched {} services, {} attributes permitted",
            matching.len(),
            permitted.len()
        );

        Ok(AttributeFilter::Restricted(permitted))
    }

    /// Request-scoped copies of the source configurations with disallowed
    /// attribute mappings removed. The same filter applies to every source.
    pub fn filter_sources(
        &self,
        configs: &[SourceConfig],
        filter: &AttributeFilter,
    ) -> Vec<SourceConfig> {
        match filter {
            AttributeFilter::Unrestricted => configs.to_vec(),
            AttributeFilter::Restricted(permitted) => configs
                .iter()
                .map(|config| config.retaining(permitted))
                .collect(),
        }
    }
}
