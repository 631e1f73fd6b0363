//! Cookie jar implementations.

mod jar;

pub use jar::StoredCookieJar;
