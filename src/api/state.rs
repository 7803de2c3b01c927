//! Shared handler state

use std::sync::Arc;

use crate::auth::{AuthService, TokenService};
use crate::service::TransactionService;
use crate::store::{TransactionStore, UserStore};

/// Services available to every handler.
#[derive(Clone)]
pub struct AppState {
    pub auth: AuthService,
    pub transactions: TransactionService,
}

impl AppState {
    /// Wire both services to a single store.
    pub fn with_store<S>(store: Arc<S>, tokens: TokenService, bcrypt_cost: u32) -> Self
    where
        S: UserStore + TransactionStore + 'static,
    {
        let users: Arc<dyn UserStore> = store.clone();
        let transactions: Arc<dyn TransactionStore> = store;

        Self {
            auth: AuthService::new(users, tokens, bcrypt_cost),
            transactions: TransactionService::new(transactions),
        }
    }
}
