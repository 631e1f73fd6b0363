//! # Rihla Infrastructure
//!
//! Concrete implementations of the ports defined in `rihla-core`:
//! key-value storage backends, a cookie jar over any storage, and HTTP
//! clients for the identity API and the portal.
//!
//! ## Feature Flags
//!
//! - `full` (default) - All features enabled
//! - `minimal` - No external services, in-memory and file storage only
//! - `http` - Identity API client and content refresher via reqwest
//! - `redis` - Redis-backed key-value storage

pub mod cookies;
pub mod storage;

#[cfg(feature = "http")]
pub mod identity;

#[cfg(feature = "http")]
pub mod refresh;

// Re-exports - storage
pub use cookies::StoredCookieJar;
pub use storage::{FileStorage, InMemoryStorage};

#[cfg(feature = "http")]
pub use identity::{HttpIdentityApi, IdentityConfig};
#[cfg(feature = "http")]
pub use refresh::HttpContentRefresher;

// Re-exports - Redis
#[cfg(feature = "redis")]
pub use storage::{RedisConfig, RedisStorage};
