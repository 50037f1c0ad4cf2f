//! Multi-source action dispatch and result merging.
//!
//! Each configured source is visited in configuration order: connect, invoke
//! the operation for the action, append the results, disconnect. The
//! connection is released even when the operation fails. Merging is plain
//! ordered concatenation - no cross-source deduplication; a record present in
//! two sources yields two entries.

use std::sync::Arc;

use dirgate_core::{
    Action, DirectoryEntity, DirectoryError, DirectorySource, RepoResult, SourceConfig,
    SourceConnection,
};
use tracing::debug;

/// A directory source paired with its (attribute-filtered, request-scoped)
/// configuration.
pub struct BoundSource {
    pub config: SourceConfig,
    pub source: Arc<dyn DirectorySource>,
}

/// Dispatch `action` against every source and merge the results.
///
/// Get-style lookups tolerate "not found in this source" and only fail with
/// `UnknownId` once every source has been queried without a match. Any
/// outright operation failure aborts the whole request.
pub async fn run(
    action: &Action,
    sources: &[BoundSource],
) -> Result<Vec<DirectoryEntity>, DirectoryError> {
    let mut merged: Vec<DirectoryEntity> = Vec::new();
    let mut matched = !action.is_get_style();

    for bound in sources {
        let mut conn = bound
            .source
            .connect(&bound.config)
            .await
            .map_err(DirectoryError::SourceOperation)?;

        let outcome = invoke(action, conn.as_mut()).await;

        // Release the connection before propagating any operation failure.
        let released = conn.disconnect().await;

        let result = outcome.map_err(DirectoryError::SourceOperation)?;
        released.map_err(DirectoryError::SourceOperation)?;

        if let Some(entities) = result {
            matched = true;
            debug!(
                "[Aggregator] source {} returned {} entities for {}",
                bound.config.id,
                entities.len(),
                action.name()
            );
            merged.extend(entities);
        }
    }

    if !matched {
        let id = match action {
            Action::GetUser { id }
            | Action::GetGroup { id, .. }
            | Action::GetGroupMembers { id } => id.as_str(),
            _ => "",
        };
        return Err(DirectoryError::UnknownId(format!(
            "'{id}' was not found in any configured source"
        )));
    }

    Ok(merged)
}

/// Invoke the operation for one action on an open connection.
///
/// `None` means a get-style id did not resolve in this source.
async fn invoke(
    action: &Action,
    conn: &mut dyn SourceConnection,
) -> RepoResult<Option<Vec<DirectoryEntity>>> {
    match action {
        Action::SearchUsers { query } => conn.search_users(query).await.map(Some),
        Action::SearchGroups {
            query,
            include_members,
        } => conn.search_groups(query, *include_members).await.map(Some),
        Action::SearchUsersByAttributes { filters } => {
            conn.search_users_by_attributes(filters).await.map(Some)
        }
        Action::GetUser { id } => Ok(conn.get_user(id).await?.map(|entity| vec![entity])),
        Action::GetGroup {
            id,
            include_members,
        } => Ok(conn
            .get_group(id, *include_members)
            .await?
            .map(|entity| vec![entity])),
        Action::GetGroupMembers { id } => conn.get_group_members(id).await,
    }
}
