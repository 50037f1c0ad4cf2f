//! Core domain entities.

mod auth;
mod config;
mod descriptor;
mod entity;

pub use auth::{Authentication, CasAssertion, ProxyChain};
pub use config::{source_configs_from_json, SourceConfig};
pub use descriptor::ServiceDescriptor;
pub use entity::{DirectoryEntity, EntityKind};
