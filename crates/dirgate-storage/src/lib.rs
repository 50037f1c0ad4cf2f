//! Dirgate Storage Layer
//!
//! SQLite-backed implementation of the service registry: which downstream
//! services exist, which may proxy, and which directory attributes each is
//! allowed to receive.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │                 Gateway                      │
//! ├──────────────────────────────────────────────┤
//! │           ServiceRegistry trait              │
//! ├──────────────────────────────────────────────┤
//! │          SqliteServiceRegistry               │
//! ├──────────────────────────────────────────────┤
//! │               Database (SQLite)              │
//! └──────────────────────────────────────────────┘
//! ```

mod database;
mod registry;

pub use database::Database;
pub use registry::SqliteServiceRegistry;

/// Default database file name.
pub const DATABASE_FILE: &str = "dirgate.db";
