//! Transaction service - balance changes on a single account.
//!
//! This service handles:
//! - Deposits and withdrawals
//! - The percentage-of-balance withdrawal check
//!
//! # Atomicity Guarantees
//!
//! Every balance change runs inside one `AccountRepository::update` call, so
//! the read, the check and the write happen under the store's write lock.
//!
//! `deposit` and `withdraw` apply no business rules of their own. The limits
//! live in the HTTP handlers, except for the withdrawal percentage, which is
//! evaluated by `withdraw_within_limit` under the same lock as the write.

use crate::{error::AppError, models::account::Account, repository::AccountRepository};
use chrono::Utc;
use rust_decimal::Decimal;

/// Add `amount` to the account balance.
///
/// # Errors
///
/// - `AccountNotFound`: Account doesn't exist
/// - `InvalidRequest`: the new balance would overflow
pub async fn deposit(
    accounts: &dyn AccountRepository,
    account_number: i64,
    amount: Decimal,
) -> Result<Account, AppError> {
    let account = accounts
        .update(
            account_number,
            Box::new(move |account: &mut Account| -> Result<(), AppError> {
                account.balance = account
                    .balance
                    .checked_add(amount)
                    .ok_or_else(|| AppError::InvalidRequest("Balance overflow".to_string()))?;
                account.last_updated_date = Utc::now();
                Ok(())
            }),
        )
        .await?;

    tracing::info!(account_number, %amount, balance = %account.balance, "deposit applied");
    Ok(account)
}

/// Subtract `amount` from the account balance.
///
/// No floor check; the balance may go negative.
pub async fn withdraw(
    accounts: &dyn AccountRepository,
    account_number: i64,
    amount: Decimal,
) -> Result<Account, AppError> {
    let account = accounts
        .update(
            account_number,
            Box::new(move |account: &mut Account| debit(account, amount)),
        )
        .await?;

    tracing::info!(account_number, %amount, balance = %account.balance, "withdrawal applied");
    Ok(account)
}

/// Subtract `amount` unless it exceeds `max_percent` of the current balance.
///
/// The boundary is inclusive: taking exactly `max_percent` is allowed.
///
/// # Errors
///
/// - `AccountNotFound`: Account doesn't exist
/// - `WithdrawalLimitExceeded`: share of the balance is too large, or the
///   balance is zero so no share can be computed
pub async fn withdraw_within_limit(
    accounts: &dyn AccountRepository,
    account_number: i64,
    amount: Decimal,
    max_percent: Decimal,
) -> Result<Account, AppError> {
    let account = accounts
        .update(
            account_number,
            Box::new(move |account: &mut Account| -> Result<(), AppError> {
                if account.balance <= Decimal::ZERO {
                    return Err(AppError::WithdrawalLimitExceeded(max_percent));
                }
                match withdrawal_percentage(amount, account.balance) {
                    Some(percent) if percent <= max_percent => debit(account, amount),
                    _ => Err(AppError::WithdrawalLimitExceeded(max_percent)),
                }
            }),
        )
        .await?;

    tracing::info!(account_number, %amount, balance = %account.balance, "withdrawal applied");
    Ok(account)
}

/// `(amount / balance) * 100`, or `None` when the balance is zero or the
/// result does not fit in a `Decimal`.
pub fn withdrawal_percentage(amount: Decimal, balance: Decimal) -> Option<Decimal> {
    amount
        .checked_div(balance)?
        .checked_mul(Decimal::ONE_HUNDRED)
}

fn debit(account: &mut Account, amount: Decimal) -> Result<(), AppError> {
    account.balance = account
        .balance
        .checked_sub(amount)
        .ok_or_else(|| AppError::InvalidRequest("Balance overflow".to_string()))?;
    account.last_updated_date = Utc::now();
    Ok(())
}
