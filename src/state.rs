//! Shared application state handed to every handler.

use crate::{
    config::Limits,
    repository::{AccountRepository, InMemoryAccountRepository},
};
use std::sync::Arc;

/// State extracted by handlers with `State<AppState>`.
///
/// Cloning is cheap: the store sits behind an `Arc`.
#[derive(Clone)]
pub struct AppState {
    pub accounts: Arc<dyn AccountRepository>,
    pub limits: Limits,
}

impl AppState {
    pub fn new(accounts: Arc<dyn AccountRepository>, limits: Limits) -> Self {
        Self { accounts, limits }
    }

    /// Empty in-memory store with the given limits.
    pub fn in_memory(limits: Limits) -> Self {
        Self::new(Arc::new(InMemoryAccountRepository::new()), limits)
    }
}
