//! Ports - trait definitions for external dependencies.
//! These are the "interfaces" that infrastructure must implement.

mod cookies;
mod identity;
mod refresh;
mod storage;

pub use cookies::CookieJar;
pub use identity::{IdentityApi, IdentityError};
pub use refresh::{ContentRefresher, RefreshError};
pub use storage::{KeyValueStorage, StorageError};
