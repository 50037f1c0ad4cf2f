//! Request pipeline: authenticate, validate, authorize, memoize, aggregate,
//! serialize.
//!
//! The dispatcher owns the immutable source configuration snapshot and the
//! response cache. Every stage either succeeds or returns a `DirectoryError`;
//! classification to an HTTP status happens in the server layer.

use std::collections::BTreeMap;
use std::sync::Arc;

use dirgate_core::{
    Action, Authentication, DirectoryError, DirectorySource, ServiceRegistry, SourceConfig,
    TicketValidator, ADMIN_ACCESS_PARAM, TICKET_PARAM,
};
use tokio::time::Duration;
use tracing::{debug, info};

use crate::aggregate::{self, BoundSource};
use crate::authz::AuthorizationResolver;
use crate::cache::{cache_key, ResponseCache};
use crate::serialize;

/// Tunables for a dispatcher instance.
#[derive(Debug, Clone)]
pub struct DispatcherSettings {
    /// Cache-key namespace, typically the deployment path.
    pub namespace: String,
    /// How long memoized responses stay live.
    pub cache_ttl: Duration,
    /// Pre-shared token enabling trusted-internal access. `None` disables
    /// the bypass entirely.
    pub admin_access_token: Option<String>,
}

impl Default for DispatcherSettings {
    fn default() -> Self {
        Self {
            namespace: "/directory".to_string(),
            cache_ttl: Duration::from_secs(300),
            admin_access_token: None,
        }
    }
}

/// Drives one request through the full pipeline.
pub struct RequestDispatcher {
    validator: Arc<dyn TicketValidator>,
    resolver: AuthorizationResolver,
    configs: Vec<SourceConfig>,
    sources: Vec<Arc<dyn DirectorySource>>,
    cache: ResponseCache,
    namespace: String,
    admin_access_token: Option<String>,
}

impl RequestDispatcher {
    /// `sources` pairs each configuration snapshot with the source that will
    /// serve it; pairs are queried in the order given.
    pub fn new(
        settings: DispatcherSettings,
        validator: Arc<dyn TicketValidator>,
        registry: Arc<dyn ServiceRegistry>,
        sources: Vec<(SourceConfig, Arc<dyn DirectorySource>)>,
    ) -> Self {
        let (configs, sources): (Vec<_>, Vec<_>) = sources.into_iter().unzip();
        Self {
            validator,
            resolver: AuthorizationResolver::new(registry),
            configs,
            sources,
            cache: ResponseCache::new(settings.cache_ttl),
            namespace: settings.namespace,
            admin_access_token: settings.admin_access_token,
        }
    }

    /// Handle one request, returning the serialized response document.
    pub async fn handle(&self, params: &BTreeMap<String, String>) -> Result<String, DirectoryError> {
        let auth = self.authenticate(params).await?;
        let action = Action::from_params(params)?;
        let filter = self.resolver.resolve(&auth).await?;

        // The key carries the proxy identity, so a response filtered for one
        // proxy can never be served to a differently-scoped one.
        let key = cache_key(&self.namespace, params, auth.nearest_proxy());
        if let Some(cached) = self.cache.get(&key).await {
            debug!("[Dispatcher] cache hit for {}", action.name());
            return Ok(cached);
        }

        let filtered = self.resolver.filter_sources(&self.configs, &filter);
        let bound: Vec<BoundSource> = filtered
            .into_iter()
            .zip(self.sources.iter())
            .map(|(config, source)| BoundSource {
                config,
                source: Arc::clone(source),
            })
            .collect();

        let entities = aggregate::run(&action, &bound).await?;
        info!(
            "[Dispatcher] {} returned {} entities",
            action.name(),
            entities.len()
        );

        let xml = serialize::render(&entities);
        self.cache.put(key, xml.clone()).await;
        Ok(xml)
    }

    /// Establish who is asking.
    ///
    /// The pre-shared admin token, when configured and matched, grants
    /// trusted-internal access without contacting the ticket validator. A
    /// non-matching token falls through to ordinary ticket validation.
    async fn authenticate(
        &self,
        params: &BTreeMap<String, String>,
    ) -> Result<Authentication, DirectoryError> {
        if let Some(expected) = &self.admin_access_token {
            if params.get(ADMIN_ACCESS_PARAM).map(String::as_str) == Some(expected.as_str()) {
                info!("[Dispatcher] trusted-internal access granted");
                return Ok(Authentication::TrustedInternal);
            }
        }

        let ticket = params
            .get(TICKET_PARAM)
            .filter(|ticket| !ticket.is_empty())
            .ok_or_else(|| {
                DirectoryError::AuthenticationFailed("no proxy ticket supplied".to_string())
            })?;

        self.validator.validate(ticket).await.map(Authentication::Cas)
    }
}
