//! Collaborator traits consumed by the gateway.
//!
//! These traits define the interface to the authentication service, the
//! service registry, and the directory sources without specifying an
//! implementation (CAS over HTTP, SQLite, LDAP, in-memory, ...).

use std::collections::HashSet;

use async_trait::async_trait;

use crate::domain::{CasAssertion, DirectoryEntity, ServiceDescriptor, SourceConfig};
use crate::error::DirectoryError;

/// Result type for repository operations.
pub type RepoResult<T> = anyhow::Result<T>;

/// Validates a proxy ticket against the authentication service.
#[async_trait]
pub trait TicketValidator: Send + Sync {
    /// Validate a ticket, returning the principal and proxy chain on success.
    ///
    /// An invalid or expired ticket is `AuthenticationFailed`; an unreachable
    /// authentication service surfaces as `Unclassified`.
    async fn validate(&self, ticket: &str) -> Result<CasAssertion, DirectoryError>;
}

/// Registry of downstream services and their attribute grants.
#[async_trait]
pub trait ServiceRegistry: Send + Sync {
    /// All descriptors that participate in attribute filtering: enabled,
    /// allowed to proxy, and not ignoring attributes.
    async fn list_proxy_eligible(&self) -> RepoResult<Vec<ServiceDescriptor>>;

    /// Union of the attribute names granted to the given descriptors.
    async fn allowed_attributes_for(&self, descriptor_ids: &[i64]) -> RepoResult<HashSet<String>>;
}

/// A directory source that can open request-scoped connections.
///
/// Connections are acquired at the start of the aggregation step and released
/// before it returns - never pooled or reused across requests.
#[async_trait]
pub trait DirectorySource: Send + Sync {
    /// Open a connection using the (already attribute-filtered) source
    /// configuration for the current request.
    async fn connect(&self, config: &SourceConfig) -> RepoResult<Box<dyn SourceConnection>>;
}

/// One open connection to a directory source.
///
/// Get-style operations return `None` when the id does not resolve in this
/// source; that is an expected outcome, not an error.
#[async_trait]
pub trait SourceConnection: Send {
    async fn search_users(&mut self, query: &str) -> RepoResult<Vec<DirectoryEntity>>;

    async fn search_groups(
        &mut self,
        query: &str,
        include_members: bool,
    ) -> RepoResult<Vec<DirectoryEntity>>;

    async fn search_users_by_attributes(
        &mut self,
        filters: &[(String, String)],
    ) -> RepoResult<Vec<DirectoryEntity>>;

    async fn get_user(&mut self, id: &str) -> RepoResult<Option<DirectoryEntity>>;

    async fn get_group(
        &mut self,
        id: &str,
        include_members: bool,
    ) -> RepoResult<Option<DirectoryEntity>>;

    /// Members of a group. `None` when the group id does not resolve here;
    /// `Some(vec![])` when it resolves to an empty group.
    async fn get_group_members(&mut self, id: &str) -> RepoResult<Option<Vec<DirectoryEntity>>>;

    async fn disconnect(&mut self) -> RepoResult<()>;
}
