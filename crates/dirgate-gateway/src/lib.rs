//! Dirgate Gateway
//!
//! Directory-lookup gateway that provides:
//! - CAS proxy-ticket authentication (plus a trusted-internal bypass token)
//! - Proxy-scoped attribute authorization against the service registry
//! - Multi-source action dispatch with ordered result merging
//! - TTL-cached, proxy-aware response memoization
//! - Canonical `cas:results` XML serialization

pub mod aggregate;
pub mod auth;
pub mod authz;
pub mod cache;
pub mod dispatch;
pub mod logging;
pub mod serialize;
pub mod server;

pub use aggregate::BoundSource;
pub use auth::CasClient;
pub use authz::{AttributeFilter, AuthorizationResolver};
pub use cache::ResponseCache;
pub use dispatch::{DispatcherSettings, RequestDispatcher};
pub use server::{GatewayConfig, GatewayServer};
