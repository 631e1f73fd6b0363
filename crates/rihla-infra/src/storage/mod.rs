//! Key-value storage implementations - file, Redis and in-memory.

mod file;
mod memory;

#[cfg(feature = "redis")]
mod redis;

pub use file::FileStorage;
pub use memory::InMemoryStorage;

#[cfg(feature = "redis")]
pub use self::redis::{RedisConfig, RedisStorage};
