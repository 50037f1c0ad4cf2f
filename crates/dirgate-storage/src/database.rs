//! Database manager for SQLite storage.
//!
//! ## Migration System
//!
//! Migrations are numbered sequentially and stored in the `migrations/`
//! directory. Each migration is run exactly once, tracked via the
//! `schema_migrations` table.
//!
//! To add a new migration:
//! 1. Create a new file: `migrations/NNN_description.sql`
//! 2. Add the migration to the `MIGRATIONS` array below
//! 3. The migration will auto-run on next open

use anyhow::{Context, Result};
use rusqlite::Connection;
use std::path::Path;
use tracing::{debug, info};

/// A database migration with version number and SQL content.
struct Migration {
    version: i64,
    name: &'static str,
    sql: &'static str,
}

/// All migrations in order. Add new migrations here.
const MIGRATIONS: &[Migration] = &[Migration {
    version: 1,
    name: "initial",
    sql: include_str!("migrations/001_initial.sql"),
}];

/// SQLite database wrapper.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open a database at the given path.
    ///
    /// If the database doesn't exist, it will be created.
    /// All pending migrations will be automatically applied.
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create database directory: {:?}", parent))?;
        }

        let conn = Connection::open(path)
            .with_context(|| format!("Failed to open database at {:?}", path))?;

        conn.pragma_update(None, "foreign_keys", "ON")?;

        // WAL for better concurrency under parallel request load
        conn.pragma_update(None, "journal_mode", "WAL")?;

        debug!("Opened database at {:?}", path);

        let db = Self { conn };
        db.run_migrations()?;

        Ok(db)
    }

    /// Open an in-memory database (for testing).
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;

        conn.pragma_update(None, "foreign_keys", "ON")?;

        debug!("Opened in-memory database");

        let db = Self { conn };
        db.run_migrations()?;

        Ok(db)
    }

    /// Get a reference to the underlying connection.
    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    /// Run all pending database migrations.
    fn run_migrations(&self) -> Result<()> {
        self.ensure_migrations_table()?;

        let current_version = self.get_schema_version();

        info!(
            "Current database schema version: {}, latest available: {}",
            current_version,
            MIGRATIONS.last().map(|m| m.version).unwrap_or(0)
        );

        for migration in MIGRATIONS {
            if migration.version > current_version {
                info!(
                    "Running migration {} ({})...",
                    migration.version, migration.name
                );

                let tx = self.conn.unchecked_transaction()?;

                self.conn.execute_batch(migration.sql).with_context(|| {
                    format!(
                        "Migration {} ({}) failed",
                        migration.version, migration.name
                    )
                })?;

                tx.execute(
                    "INSERT INTO schema_migrations (version, name) VALUES (?1, ?2)",
                    rusqlite::params![migration.version, migration.name],
                )?;

                tx.commit()?;
            }
        }

        Ok(())
    }

    fn ensure_migrations_table(&self) -> Result<()> {
        self.conn.execute(
            "CREATE TABLE IF NOT EXISTS schema_migrations (
                version INTEGER PRIMARY KEY,
                name TEXT NOT NULL,
                applied_at TEXT NOT NULL DEFAULT (datetime('now'))
            )",
            [],
        )?;
        Ok(())
    }

    fn get_schema_version(&self) -> i64 {
        self.conn
            .query_row(
                "SELECT COALESCE(MAX(version), 0) FROM schema_migrations",
                [],
                |row| row.get(0),
            )
            .unwrap_or(0)
    }
}
