//! Domain module
//!
//! Core domain types and business logic.

pub mod amount;
pub mod context;
pub mod error;
pub mod ownership;
pub mod summary;
pub mod transaction;
pub mod user;

pub use amount::{check_amount, normalize_amount, MONEY_SCALE};
pub use context::AuthenticatedUser;
pub use error::DomainError;
pub use ownership::ensure_owner;
pub use summary::Summary;
pub use transaction::{Transaction, TransactionFields, TransactionType, MAX_CATEGORY_CHARS};
pub use user::{NewUser, User};
