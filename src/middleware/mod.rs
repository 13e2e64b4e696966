pub mod auth;

pub use auth::{AuthenticatedUser, auth_middleware};
