//! SQLite implementation of ServiceRegistry.

use std::collections::HashSet;
use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use dirgate_core::{RepoResult, ServiceDescriptor, ServiceRegistry};
use rusqlite::params;
use tokio::sync::Mutex;

use crate::Database;

/// SQLite-backed implementation of ServiceRegistry.
pub struct SqliteServiceRegistry {
    db: Arc<Mutex<Database>>,
}

impl SqliteServiceRegistry {
    /// Create a new SQLite service registry.
    pub fn new(db: Arc<Mutex<Database>>) -> Self {
        Self { db }
    }

    /// Register a downstream service. Returns the new descriptor id.
    pub async fn register(
        &self,
        name: &str,
        pattern: &str,
        allowed_to_proxy: bool,
        enabled: bool,
        ignore_attributes: bool,
    ) -> Result<i64> {
        let db = self.db.lock().await;
        let conn = db.connection();

        conn.execute(
            "INSERT INTO registered_services
                 (name, service_pattern, allowed_to_proxy, enabled, ignore_attributes)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                name,
                pattern,
                allowed_to_proxy as i64,
                enabled as i64,
                ignore_attributes as i64,
            ],
        )?;

        Ok(conn.last_insert_rowid())
    }

    /// Grant an attribute name to a registered service.
    pub async fn allow_attribute(&self, service_id: i64, attribute_name: &str) -> Result<()> {
        let db = self.db.lock().await;
        let conn = db.connection();

        conn.execute(
            "INSERT OR IGNORE INTO service_attributes (service_id, attribute_name)
             VALUES (?1, ?2)",
            params![service_id, attribute_name],
        )?;

        Ok(())
    }

    /// Enable or disable a registered service.
    pub async fn set_enabled(&self, service_id: i64, enabled: bool) -> Result<()> {
        let db = self.db.lock().await;
        let conn = db.connection();

        let rows_affected = conn.execute(
            "UPDATE registered_services SET enabled = ?2 WHERE id = ?1",
            params![service_id, enabled as i64],
        )?;

        if rows_affected == 0 {
            anyhow::bail!("Registered service not found: {}", service_id);
        }

        Ok(())
    }
}

#[async_trait]
impl ServiceRegistry for SqliteServiceRegistry {
    async fn list_proxy_eligible(&self) -> RepoResult<Vec<ServiceDescriptor>> {
        let db = self.db.lock().await;
        let conn = db.connection();

        let mut stmt = conn.prepare(
            "SELECT id, service_pattern, allowed_to_proxy, enabled, ignore_attributes
             FROM registered_services
             WHERE allowed_to_proxy = 1 AND enabled = 1 AND ignore_attributes = 0
             ORDER BY id ASC",
        )?;

        let descriptors = stmt
            .query_map([], |row| {
                Ok(ServiceDescriptor {
                    id: row.get(0)?,
                    pattern: row.get(1)?,
                    allowed_to_proxy: row.get::<_, i64>(2)? == 1,
                    enabled: row.get::<_, i64>(3)? == 1,
                    ignore_attributes: row.get::<_, i64>(4)? == 1,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;

        tracing::debug!(
            "[ServiceRegistry] {} proxy-eligible services",
            descriptors.len()
        );

        Ok(descriptors)
    }

    async fn allowed_attributes_for(&self, descriptor_ids: &[i64]) -> RepoResult<HashSet<String>> {
        if descriptor_ids.is_empty() {
            return Ok(HashSet::new());
        }

        let db = self.db.lock().await;
        let conn = db.connection();

        // One placeholder per matching service id.
        let placeholders = vec!["?"; descriptor_ids.len()].join(", ");
        let sql = format!(
            "SELECT DISTINCT attribute_name FROM service_attributes
             WHERE service_id IN ({placeholders})"
        );

        let mut stmt = conn.prepare(&sql)?;
        let names = stmt
            .query_map(rusqlite::params_from_iter(descriptor_ids.iter()), |row| {
                row.get::<_, String>(0)
            })?
            .collect::<Result<HashSet<_>, _>>()?;

        Ok(names)
    }
}
