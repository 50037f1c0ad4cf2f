//! Mock collaborator implementations for testing
//!
//! In-memory ticket validators and directory sources for fast, isolated
//! tests of the full gateway pipeline.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use dirgate_core::{
    CasAssertion, DirectoryEntity, DirectoryError, DirectorySource, ProxyChain, RepoResult,
    SourceConfig, SourceConnection, TicketValidator,
};

// ============================================================================
// MockTicketValidator
// ============================================================================

/// Ticket validator backed by a fixed ticket -> assertion table. Any ticket
/// not in the table is rejected as invalid.
#[derive(Default)]
pub struct MockTicketValidator {
    assertions: HashMap<String, CasAssertion>,
    pub calls: AtomicUsize,
}

impl MockTicketValidator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Accept `ticket` as a direct (non-proxied) login for `principal`.
    pub fn with_direct(mut self, ticket: &str, principal: &str) -> Self {
        self.assertions.insert(
            ticket.to_string(),
            CasAssertion {
                principal: principal.to_string(),
                proxies: ProxyChain::default(),
            },
        );
        self
    }

    /// Accept `ticket` as a login for `principal` proxied through `proxies`,
    /// nearest-first.
    pub fn with_proxied(mut self, ticket: &str, principal: &str, proxies: &[&str]) -> Self {
        self.assertions.insert(
            ticket.to_string(),
            CasAssertion {
                principal: principal.to_string(),
                proxies: ProxyChain::new(proxies.iter().map(|p| p.to_string()).collect()),
            },
        );
        self
    }
}

#[async_trait]
impl TicketValidator for MockTicketValidator {
    async fn validate(&self, ticket: &str) -> Result<CasAssertion, DirectoryError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.assertions.get(ticket).cloned().ok_or_else(|| {
            DirectoryError::AuthenticationFailed("ticket rejected (INVALID_TICKET)".to_string())
        })
    }
}

// ============================================================================
// MemorySource
// ============================================================================

/// Counters shared between a [`MemorySource`] and the connections it opens,
/// so tests can assert on connection discipline and query volume.
#[derive(Default)]
pub struct SourceCounters {
    pub connects: AtomicUsize,
    pub disconnects: AtomicUsize,
    pub queries: AtomicUsize,
}

/// Shared immutable dataset behind a [`MemorySource`].
///
/// Entities are stored with source-native attribute names; connections
/// project them to canonical names through the request's (possibly
/// attribute-filtered) source configuration, like a real source would.
#[derive(Default)]
struct SourceData {
    users: Vec<DirectoryEntity>,
    groups: Vec<DirectoryEntity>,
    /// Group id -> member user ids.
    members: HashMap<String, Vec<String>>,
    fail_connect: bool,
}

/// In-memory directory source.
pub struct MemorySource {
    data: Arc<SourceData>,
    pub counters: Arc<SourceCounters>,
}

impl MemorySource {
    pub fn builder() -> MemorySourceBuilder {
        MemorySourceBuilder {
            data: SourceData::default(),
        }
    }
}

pub struct MemorySourceBuilder {
    data: SourceData,
}

impl MemorySourceBuilder {
    /// Add a user entity (attributes in source-native names).
    pub fn user(mut self, user: DirectoryEntity) -> Self {
        self.data.users.push(user);
        self
    }

    /// Add a group entity (attributes in source-native names).
    pub fn group(mut self, group: DirectoryEntity) -> Self {
        self.data.groups.push(group);
        self
    }

    /// Record the member user ids of a group.
    pub fn members(mut self, group_id: &str, user_ids: &[&str]) -> Self {
        self.data.members.insert(
            group_id.to_string(),
            user_ids.iter().map(|id| id.to_string()).collect(),
        );
        self
    }

    /// Make every `connect` fail.
    pub fn fail_connect(mut self) -> Self {
        self.data.fail_connect = true;
        self
    }

    pub fn build(self) -> Arc<MemorySource> {
        Arc::new(MemorySource {
            data: Arc::new(self.data),
            counters: Arc::new(SourceCounters::default()),
        })
    }
}

#[async_trait]
impl DirectorySource for MemorySource {
    async fn connect(&self, config: &SourceConfig) -> RepoResult<Box<dyn SourceConnection>> {
        if self.data.fail_connect {
            anyhow::bail!("connection refused");
        }
        self.counters.connects.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(MemoryConnection {
            data: Arc::clone(&self.data),
            config: config.clone(),
            counters: Arc::clone(&self.counters),
        }))
    }
}

struct MemoryConnection {
    data: Arc<SourceData>,
    config: SourceConfig,
    counters: Arc<SourceCounters>,
}

impl MemoryConnection {
    /// Project native attributes to canonical names through a mapping.
    fn project(entity: &DirectoryEntity, mapping: &[(String, String)]) -> DirectoryEntity {
        let mut out = if entity.is_group() {
            DirectoryEntity::group(&entity.id)
        } else {
            DirectoryEntity::user(&entity.id)
        };
        for (native, canonical) in mapping {
            if let Some(values) = entity.values(native) {
                out = out.with_attribute(canonical, values.iter().cloned());
            }
        }
        out
    }

    fn matches(entity: &DirectoryEntity, query: &str) -> bool {
        let query = query.to_lowercase();
        entity.id.to_lowercase().contains(&query)
            || entity
                .attributes
                .iter()
                .flat_map(|(_, values)| values)
                .any(|value| value.to_lowercase().contains(&query))
    }
}

#[async_trait]
impl SourceConnection for MemoryConnection {
    async fn search_users(&mut self, query: &str) -> RepoResult<Vec<DirectoryEntity>> {
        self.counters.queries.fetch_add(1, Ordering::SeqCst);
        Ok(self
            .data
            .users
            .iter()
            .filter(|user| Self::matches(user, query))
            .map(|user| Self::project(user, &self.config.user_attributes))
            .collect())
    }

    async fn search_groups(
        &mut self,
        query: &str,
        include_members: bool,
    ) -> RepoResult<Vec<DirectoryEntity>> {
        self.counters.queries.fetch_add(1, Ordering::SeqCst);
        let mut results = Vec::new();
        for group in self.data.groups.iter().filter(|g| Self::matches(g, query)) {
            let mut projected = Self::project(group, &self.config.group_attributes);
            if include_members {
                if let Some(ids) = self.data.members.get(&group.id) {
                    projected = projected.with_attribute("member", ids.iter().cloned());
                }
            }
            results.push(projected);
        }
        Ok(results)
    }

    async fn search_users_by_attributes(
        &mut self,
        filters: &[(String, String)],
    ) -> RepoResult<Vec<DirectoryEntity>> {
        self.counters.queries.fetch_add(1, Ordering::SeqCst);
        // Filters arrive in canonical names; resolve each back to the native
        // name this source knows the attribute by. A filter on an attribute
        // this source does not map can never match.
        let mut results = Vec::new();
        'users: for user in &self.data.users {
            for (canonical, wanted) in filters {
                let Some(native) = self
                    .config
                    .user_attributes
                    .iter()
                    .find(|(_, c)| c == canonical)
                    .map(|(n, _)| n)
                else {
                    continue 'users;
                };
                let matched = user
                    .values(native)
                    .is_some_and(|values| values.iter().any(|v| v == wanted));
                if !matched {
                    continue 'users;
                }
            }
            results.push(Self::project(user, &self.config.user_attributes));
        }
        Ok(results)
    }

    async fn get_user(&mut self, id: &str) -> RepoResult<Option<DirectoryEntity>> {
        self.counters.queries.fetch_add(1, Ordering::SeqCst);
        Ok(self
            .data
            .users
            .iter()
            .find(|user| user.id == id)
            .map(|user| Self::project(user, &self.config.user_attributes)))
    }

    async fn get_group(
        &mut self,
        id: &str,
        include_members: bool,
    ) -> RepoResult<Option<DirectoryEntity>> {
        self.counters.queries.fetch_add(1, Ordering::SeqCst);
        let Some(group) = self.data.groups.iter().find(|group| group.id == id) else {
            return Ok(None);
        };
        let mut projected = Self::project(group, &self.config.group_attributes);
        if include_members {
            if let Some(ids) = self.data.members.get(id) {
                projected = projected.with_attribute("member", ids.iter().cloned());
            }
        }
        Ok(Some(projected))
    }

    async fn get_group_members(&mut self, id: &str) -> RepoResult<Option<Vec<DirectoryEntity>>> {
        self.counters.queries.fetch_add(1, Ordering::SeqCst);
        let Some(ids) = self.data.members.get(id) else {
            return Ok(None);
        };
        let members = ids
            .iter()
            .filter_map(|member_id| self.data.users.iter().find(|u| &u.id == member_id))
            .map(|user| Self::project(user, &self.config.user_attributes))
            .collect();
        Ok(Some(members))
    }

    async fn disconnect(&mut self) -> RepoResult<()> {
        self.counters.disconnects.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
