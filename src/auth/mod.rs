//! Authentication module
//!
//! Password hashing, bearer tokens and the authentication service.

mod password;
mod service;
mod token;

pub use password::{hash_password, verify_password, PasswordError};
pub use service::{AuthService, LoginResult, RegisterCommand};
pub use token::{Claims, TokenError, TokenService};
