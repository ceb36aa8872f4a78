//! Account service - lookup, creation and removal of accounts.

use crate::{
    error::AppError,
    models::account::{Account, BaseAccount},
    repository::AccountRepository,
};
use chrono::Utc;
use rand::Rng;

/// How many fresh account numbers to try before giving up.
const MAX_ACCOUNT_NUMBER_ATTEMPTS: usize = 16;

/// All accounts owned by a customer. Empty when the customer has none.
pub async fn get_accounts_by_customer_id(
    accounts: &dyn AccountRepository,
    customer_id: i32,
) -> Vec<Account> {
    accounts.find_by_customer_id(customer_id).await
}

pub async fn get_account_by_account_number(
    accounts: &dyn AccountRepository,
    account_number: i64,
) -> Option<Account> {
    accounts.find_by_account_number(account_number).await
}

/// Whether the customer already holds a conflicting account.
///
/// An account conflicts when it belongs to the same customer and either has
/// the same account type or is held under the same first and last name.
/// Comparisons ignore case.
pub async fn check_if_account_exists(
    accounts: &dyn AccountRepository,
    candidate: &BaseAccount,
) -> bool {
    accounts
        .find_by_customer_id(candidate.customer_id)
        .await
        .iter()
        .any(|existing| conflicts(existing, candidate))
}

fn conflicts(existing: &Account, candidate: &BaseAccount) -> bool {
    let same_type = eq_ignore_case(&existing.account_type, &candidate.account_type);
    let same_name = eq_ignore_case(&existing.first_name, &candidate.first_name)
        && eq_ignore_case(&existing.last_name, &candidate.last_name);
    same_type || same_name
}

fn eq_ignore_case(a: &str, b: &str) -> bool {
    a.to_lowercase() == b.to_lowercase()
}

/// Store an already validated account.
///
/// # Errors
///
/// - `AccountNumberTaken`: the account number is in use
pub async fn create_account(
    accounts: &dyn AccountRepository,
    account: Account,
) -> Result<(), AppError> {
    accounts.insert(account).await
}

/// Remove an account, returning it. Does nothing when the number is unknown.
pub async fn delete_account(
    accounts: &dyn AccountRepository,
    account_number: i64,
) -> Option<Account> {
    let removed = accounts.remove(account_number).await;
    if removed.is_none() {
        tracing::debug!(account_number, "delete of unknown account ignored");
    }
    removed
}

/// Pseudo-random account number in `0..=i32::MAX`.
pub fn generate_account_number() -> i64 {
    rand::rng().random_range(0..=i64::from(i32::MAX))
}

/// Turn a creation request into a stored account with a fresh number and
/// the current timestamp.
pub fn build_account(base: BaseAccount) -> Account {
    Account::from_base(base, generate_account_number(), Utc::now())
}

/// Build and store an account, drawing a new number whenever the generated
/// one is already taken.
///
/// # Errors
///
/// - `Internal`: no free number was found within the attempt budget
pub async fn open_account(
    accounts: &dyn AccountRepository,
    base: BaseAccount,
) -> Result<Account, AppError> {
    let mut account = build_account(base);

    for attempt in 1..=MAX_ACCOUNT_NUMBER_ATTEMPTS {
        match create_account(accounts, account.clone()).await {
            Ok(()) => return Ok(account),
            Err(AppError::AccountNumberTaken(taken)) => {
                tracing::warn!(account_number = taken, attempt, "account number collision");
                account.account_number = generate_account_number();
            }
            Err(other) => return Err(other),
        }
    }

    Err(AppError::Internal(anyhow::anyhow!(
        "no free account number after {MAX_ACCOUNT_NUMBER_ATTEMPTS} attempts"
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::InMemoryAccountRepository;
    use rust_decimal_macros::dec;

    fn base(customer_id: i32, first: &str, last: &str, account_type: &str) -> BaseAccount {
        BaseAccount {
            customer_id,
            first_name: first.into(),
            last_name: last.into(),
            balance: dec!(250),
            account_type: account_type.into(),
        }
    }

    async fn seeded() -> InMemoryAccountRepository {
        let repo = InMemoryAccountRepository::new();
        open_account(&repo, base(1, "Ada", "Lovelace", "Savings"))
            .await
            .unwrap();
        repo
    }

    #[tokio::test]
    async fn same_account_type_is_detected_ignoring_case() {
        let repo = seeded().await;
        let candidate = base(1, "Someone", "Else", "SAVINGS");
        assert!(check_if_account_exists(&repo, &candidate).await);
    }

    #[tokio::test]
    async fn same_name_is_detected_ignoring_case() {
        let repo = seeded().await;
        let candidate = base(1, "ADA", "lovelace", "Checking");
        assert!(check_if_account_exists(&repo, &candidate).await);
    }

    #[tokio::test]
    async fn matching_first_name_alone_is_not_a_conflict() {
        let repo = seeded().await;
        let candidate = base(1, "Ada", "Byron", "Checking");
        assert!(!check_if_account_exists(&repo, &candidate).await);
    }

    #[tokio::test]
    async fn other_customers_never_conflict() {
        let repo = seeded().await;
        let candidate = base(2, "Ada", "Lovelace", "Savings");
        assert!(!check_if_account_exists(&repo, &candidate).await);
    }

    #[tokio::test]
    async fn open_account_copies_request_fields() {
        let repo = InMemoryAccountRepository::new();
        let account = open_account(&repo, base(5, "Alan", "Turing", "Checking"))
            .await
            .unwrap();

        assert_eq!(account.customer_id, 5);
        assert_eq!(account.balance, dec!(250));
        assert!((0..=i64::from(i32::MAX)).contains(&account.account_number));

        let stored = get_account_by_account_number(&repo, account.account_number)
            .await
            .unwrap();
        assert_eq!(stored, account);
    }

    #[tokio::test]
    async fn create_account_rejects_taken_numbers() {
        let repo = InMemoryAccountRepository::new();
        let first = open_account(&repo, base(1, "A", "A", "One")).await.unwrap();

        let mut clash = build_account(base(2, "B", "B", "Two"));
        clash.account_number = first.account_number;
        let err = create_account(&repo, clash).await.unwrap_err();

        assert!(matches!(err, AppError::AccountNumberTaken(n) if n == first.account_number));
        assert_eq!(repo.count().await, 1);
    }

    #[tokio::test]
    async fn opened_accounts_get_distinct_numbers() {
        let repo = InMemoryAccountRepository::new();
        for customer_id in 0..50 {
            open_account(&repo, base(customer_id, "A", "B", "C"))
                .await
                .unwrap();
        }
        assert_eq!(repo.count().await, 50);
    }

    #[tokio::test]
    async fn delete_account_removes_and_tolerates_unknown_numbers() {
        let repo = InMemoryAccountRepository::new();
        let account = open_account(&repo, base(1, "A", "B", "C")).await.unwrap();

        assert!(delete_account(&repo, account.account_number).await.is_some());
        assert!(delete_account(&repo, account.account_number).await.is_none());

        assert!(
            get_account_by_account_number(&repo, account.account_number)
                .await
                .is_none()
        );
        assert!(get_accounts_by_customer_id(&repo, 1).await.is_empty());
    }
}
