//! Response cache: proxy-aware key derivation plus a TTL memoization table.
//!
//! The cache is best-effort: a miss always recomputes the exact value a hit
//! would have served. Each write is a complete replacement of the stored
//! value, so concurrent writers to one key cannot corrupt it. Expiry is
//! TTL-only; there is no LRU and no capacity bound beyond the TTL.

use std::collections::{BTreeMap, HashMap};

use tokio::sync::RwLock;
use tokio::time::{Duration, Instant};
use tracing::debug;

/// Derive the cache key for a request.
///
/// Key layout: sanitized namespace, then every query parameter as
/// `&name=value`, then `:proxy` when the request was proxied. The proxy
/// identifier is part of the key because attribute filtering depends on it -
/// a response authorized for one proxy must never be served to a
/// differently-scoped proxy.
///
/// Parameters are concatenated in sorted order (the `BTreeMap` iteration
/// order), so logically identical requests share one key regardless of the
/// order parameters arrived in.
pub fn cache_key(
    namespace: &str,
    params: &BTreeMap<String, String>,
    proxy: Option<&str>,
) -> String {
    let mut key = sanitize_namespace(namespace);
    key.push(':');
    for (name, value) in params {
        key.push('&');
        key.push_str(name);
        key.push('=');
        key.push_str(value);
    }
    if let Some(proxy) = proxy {
        key.push(':');
        key.push_str(proxy);
    }
    key
}

/// Reduce a deployment path to a cache-key namespace: alphanumerics,
/// underscore and hyphen survive, everything else is dropped.
pub fn sanitize_namespace(path: &str) -> String {
    path.chars()
        .filter(|ch| ch.is_ascii_alphanumeric() || *ch == '_' || *ch == '-')
        .collect()
}

struct CacheSlot {
    value: String,
    expires_at: Instant,
}

/// TTL-bounded memoization table for serialized responses.
pub struct ResponseCache {
    ttl: Duration,
    entries: RwLock<HashMap<String, CacheSlot>>,
}

impl ResponseCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Fetch a live entry. Expired entries read as absent and are swept on
    /// the next write.
    pub async fn get(&self, key: &str) -> Option<String> {
        let entries = self.entries.read().await;
        match entries.get(key) {
            Some(slot) if slot.expires_at > Instant::now() => Some(slot.value.clone()),
            _ => None,
        }
    }

    /// Store a complete serialized response under a key.
    pub async fn put(&self, key: String, value: String) {
        let mut entries = self.entries.write().await;
        let now = Instant::now();
        entries.retain(|_, slot| slot.expires_at > now);
        entries.insert(
            key,
            CacheSlot {
                value,
                expires_at: now + self.ttl,
            },
        );
        debug!("[Cache] {} entries stored", entries.len());
    }

    /// Drop one entry. No pipeline caller needs this, but operators do.
    pub async fn invalidate(&self, key: &str) {
        self.entries.write().await.remove(key);
    }
}
