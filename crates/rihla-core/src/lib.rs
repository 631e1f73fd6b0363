//! # Rihla Core
//!
//! The auth layer of the Rihla directory: domain types, the ports that
//! infrastructure implements, and the session services built on top of them
//! (token store, session loader, client auth store, server verifier, guards).
//!
//! Nothing in this crate talks to the network or the filesystem directly.

pub mod auth;
pub mod domain;
pub mod error;
pub mod ports;

#[cfg(test)]
pub(crate) mod testing;

pub use error::SessionError;
