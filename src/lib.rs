//! Expense Tracker Library
//!
//! Re-exports modules for integration testing and external use.

pub mod api;
pub mod auth;
pub mod config;
pub mod db;
pub mod domain;
pub mod service;
pub mod store;
mod error;

pub use config::Config;
pub use error::{AppError, AppResult, ErrorResponse};
pub use domain::{AuthenticatedUser, DomainError, Summary, Transaction, TransactionFields, TransactionType};
