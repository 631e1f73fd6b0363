//! # Rihla Shared
//!
//! Wire types of the identity API and the response envelopes used by the portal.
//! Nothing in here knows about auth state; it only describes JSON shapes.

pub mod dto;
pub mod response;

pub use response::{ApiResponse, ErrorResponse};
