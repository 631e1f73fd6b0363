//! Identity API client.

mod http;
mod mapping;

pub use http::{HttpIdentityApi, IdentityConfig};
pub use mapping::{permissions_from_dto, profile_from_dto, role_from_dto};
