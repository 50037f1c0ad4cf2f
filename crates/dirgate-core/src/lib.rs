//! # Dirgate Core Library
//!
//! Domain logic and business rules for the directory-lookup gateway.
//!
//! ## Modules
//!
//! - `domain` - Core entities (DirectoryEntity, ServiceDescriptor, SourceConfig)
//! - `action` - The closed set of supported directory actions
//! - `antpath` - Ant-style path pattern matching for registered services
//! - `error` - The gateway error taxonomy
//! - `repository` - Collaborator traits (ticket validation, service registry,
//!   directory sources)

pub mod action;
pub mod antpath;
pub mod domain;
pub mod error;
pub mod repository;

// Re-export commonly used types
pub use action::{Action, ACTION_PARAM, ADMIN_ACCESS_PARAM, TICKET_PARAM};
pub use domain::*;
pub use error::DirectoryError;
pub use repository::*;
