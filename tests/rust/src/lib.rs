//! Shared test utilities and fixtures for Dirgate integration tests.

pub use dirgate_core::{DirectoryEntity, SourceConfig};

/// Mock collaborator implementations
pub mod mocks;
pub use mocks::{MemorySource, MockTicketValidator};

/// Test fixture utilities
pub mod fixtures {
    use std::sync::Arc;

    use dirgate_core::{DirectoryEntity, DirectorySource, SourceConfig};
    use dirgate_gateway::{DispatcherSettings, RequestDispatcher};
    use dirgate_storage::SqliteServiceRegistry;

    use crate::mocks::MemorySource;

    /// A campus-directory config mapping native LDAP-ish names to the
    /// canonical attribute vocabulary.
    pub fn campus_config() -> SourceConfig {
        SourceConfig::new("campus")
            .with_user_attribute("uid", "username")
            .with_user_attribute("displayName", "cn")
            .with_user_attribute("mail", "mail")
            .with_user_attribute("telephoneNumber", "telephone")
            .with_group_attribute("description", "description")
    }

    /// A user in the campus source's native attribute names.
    pub fn campus_user(id: &str, name: &str, mail: &str) -> DirectoryEntity {
        DirectoryEntity::user(id)
            .with_attribute("uid", [id])
            .with_attribute("displayName", [name])
            .with_attribute("mail", [mail])
    }

    /// Populate a memory source with a small campus directory.
    pub fn campus_source() -> Arc<MemorySource> {
        MemorySource::builder()
            .user(
                campus_user("jdoe", "John Doe", "jdoe@example.edu")
                    .with_attribute("telephoneNumber", ["x1234"]),
            )
            .user(campus_user("asmith", "Alice Smith", "asmith@example.edu"))
            .group(DirectoryEntity::group("staff").with_attribute("description", ["All staff"]))
            .members("staff", &["jdoe", "asmith"])
            .build()
    }

    /// Build a dispatcher over the given validator, registry and sources with
    /// default settings.
    pub fn dispatcher(
        validator: crate::mocks::MockTicketValidator,
        registry: SqliteServiceRegistry,
        sources: Vec<(SourceConfig, Arc<MemorySource>)>,
    ) -> RequestDispatcher {
        RequestDispatcher::new(
            DispatcherSettings::default(),
            Arc::new(validator),
            Arc::new(registry),
            sources
                .into_iter()
                .map(|(config, source)| (config, source as Arc<dyn DirectorySource>))
                .collect(),
        )
    }
}

/// Database test helpers
pub mod db {
    use std::sync::Arc;

    use dirgate_storage::{Database, SqliteServiceRegistry, DATABASE_FILE};
    use std::path::{Path, PathBuf};
    use tempfile::TempDir;
    use tokio::sync::Mutex;

    /// Create a temporary database for testing
    pub struct TestDatabase {
        pub db: Arc<Mutex<Database>>,
        _temp_dir: TempDir,
        db_path: PathBuf,
    }

    impl TestDatabase {
        /// Create a new test database in a temporary directory
        pub fn new() -> Self {
            let temp_dir = TempDir::new().expect("Failed to create temp dir");
            let db_path = temp_dir.path().join(DATABASE_FILE);
            let db = Database::open(&db_path).expect("Failed to open test database");
            Self {
                db: Arc::new(Mutex::new(db)),
                db_path,
                _temp_dir: temp_dir,
            }
        }

        /// Create an in-memory database for fast tests
        pub fn in_memory() -> Self {
            let temp_dir = TempDir::new().expect("Failed to create temp dir");
            let db = Database::open_in_memory().expect("Failed to open in-memory database");
            Self {
                db: Arc::new(Mutex::new(db)),
                db_path: PathBuf::new(),
                _temp_dir: temp_dir,
            }
        }

        /// A registry over this database.
        pub fn registry(&self) -> SqliteServiceRegistry {
            SqliteServiceRegistry::new(Arc::clone(&self.db))
        }

        /// Get the full database file path
        pub fn db_path(&self) -> &Path {
            &self.db_path
        }
    }

    impl Default for TestDatabase {
        fn default() -> Self {
            Self::new()
        }
    }

    /// An empty in-memory registry (no registered services).
    pub fn empty_registry() -> SqliteServiceRegistry {
        TestDatabase::in_memory().registry()
    }
}
