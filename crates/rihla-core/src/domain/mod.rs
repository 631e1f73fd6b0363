//! Domain entities - the user record and what it is allowed to do.

mod role;
mod user;

pub use role::{RoleDefinition, SUPER_ADMIN, UserRole};
pub use user::{User, UserProfile};
