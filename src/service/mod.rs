//! Service module
//!
//! Business operations over the stores. Every operation takes the caller
//! identity explicitly.

mod transactions;

pub use transactions::TransactionService;
