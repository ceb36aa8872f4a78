//! Account storage.
//!
//! `AccountRepository` is the seam between the services and whatever holds
//! the accounts. The only implementation is process memory; state is lost on
//! restart.

use crate::{error::AppError, models::account::Account};
use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

/// In-place change applied to a single account while the store is locked.
///
/// Returning an error aborts the change and leaves the account as it was.
pub type AccountMutation = Box<dyn FnOnce(&mut Account) -> Result<(), AppError> + Send>;

/// CRUD access to stored accounts.
#[async_trait]
pub trait AccountRepository: Send + Sync {
    /// All accounts owned by `customer_id`, ordered by account number.
    async fn find_by_customer_id(&self, customer_id: i32) -> Vec<Account>;

    async fn find_by_account_number(&self, account_number: i64) -> Option<Account>;

    /// Store a new account.
    ///
    /// # Errors
    ///
    /// - `AccountNumberTaken`: another account already uses this number
    async fn insert(&self, account: Account) -> Result<(), AppError>;

    /// Remove an account, returning it if it existed.
    async fn remove(&self, account_number: i64) -> Option<Account>;

    /// Run `mutation` against one account as a single read-modify-write step.
    ///
    /// # Errors
    ///
    /// - `AccountNotFound`: no account has this number
    /// - whatever `mutation` returns, in which case nothing is written
    async fn update(
        &self,
        account_number: i64,
        mutation: AccountMutation,
    ) -> Result<Account, AppError>;

    /// Number of stored accounts.
    async fn count(&self) -> usize;
}

/// Accounts kept in a map keyed by account number.
#[derive(Debug, Default)]
pub struct InMemoryAccountRepository {
    accounts: RwLock<HashMap<i64, Account>>,
}

impl InMemoryAccountRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AccountRepository for InMemoryAccountRepository {
    async fn find_by_customer_id(&self, customer_id: i32) -> Vec<Account> {
        let accounts = self.accounts.read().await;
        let mut matches: Vec<Account> = accounts
            .values()
            .filter(|account| account.customer_id == customer_id)
            .cloned()
            .collect();
        matches.sort_by_key(|account| account.account_number);
        matches
    }

    async fn find_by_account_number(&self, account_number: i64) -> Option<Account> {
        self.accounts.read().await.get(&account_number).cloned()
    }

    async fn insert(&self, account: Account) -> Result<(), AppError> {
        let mut accounts = self.accounts.write().await;
        if accounts.contains_key(&account.account_number) {
            return Err(AppError::AccountNumberTaken(account.account_number));
        }
        accounts.insert(account.account_number, account);
        Ok(())
    }

    async fn remove(&self, account_number: i64) -> Option<Account> {
        self.accounts.write().await.remove(&account_number)
    }

    async fn update(
        &self,
        account_number: i64,
        mutation: AccountMutation,
    ) -> Result<Account, AppError> {
        let mut accounts = self.accounts.write().await;
        let stored = accounts
            .get_mut(&account_number)
            .ok_or(AppError::AccountNotFound)?;

        // Work on a copy so a rejected mutation leaves no partial writes
        let mut candidate = stored.clone();
        mutation(&mut candidate)?;
        *stored = candidate.clone();

        Ok(candidate)
    }

    async fn count(&self) -> usize {
        self.accounts.read().await.len()
    }
}
