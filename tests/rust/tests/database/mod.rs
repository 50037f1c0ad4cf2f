//! Database integration tests
//!
//! Migration behavior and the SQLite service registry on real database
//! files.
