//! Account management HTTP handlers.
//!
//! This module implements the account API endpoints:
//! - GET /api/account/{customerId} - List a customer's accounts
//! - POST /api/account - Open an account
//! - DELETE /api/account/{accountNumber} - Close an account
//! - PUT /api/account/Deposit/{accountNumber}?amount= - Deposit money
//! - PUT /api/account/Withdraw/{accountNumber}?amount= - Withdraw money
//!
//! Validation rules are evaluated in order and the first failure is returned.

use crate::{
    error::AppError,
    models::account::{Account, AmountQuery, BaseAccount},
    services::{account_service, transaction_service},
    state::AppState,
};
use axum::{
    Json,
    extract::{Path, Query, State, rejection::JsonRejection},
    http::StatusCode,
};

/// List all accounts of a customer.
///
/// # Response
///
/// - **Success (200 OK)**: array of accounts, ordered by account number
/// - **Error (404)**: the customer has no accounts
pub async fn get_accounts(
    State(state): State<AppState>,
    Path(customer_id): Path<i32>,
) -> Result<Json<Vec<Account>>, AppError> {
    let accounts =
        account_service::get_accounts_by_customer_id(state.accounts.as_ref(), customer_id).await;

    if accounts.is_empty() {
        tracing::debug!(customer_id, "no accounts for customer");
        return Err(AppError::CustomerAccountsNotFound);
    }

    Ok(Json(accounts))
}

/// Open a new account.
///
/// # Request Body
///
/// ```json
/// {
///   "customerId": 42,
///   "firstName": "Ada",
///   "lastName": "Lovelace",
///   "balance": 150.00,
///   "accountType": "Savings"
/// }
/// ```
///
/// # Response
///
/// - **Success (204 No Content)**
/// - **Error (400)**: opening balance below the minimum, the customer
///   already holds an account with the same type or under the same name, or
///   the body is not valid JSON
///
/// A missing `balance` counts as the smallest possible decimal and so fails
/// the minimum balance rule.
pub async fn create_account(
    State(state): State<AppState>,
    payload: Result<Json<BaseAccount>, JsonRejection>,
) -> Result<StatusCode, AppError> {
    let Json(request) = payload.map_err(|rejection| {
        tracing::warn!(error = %rejection.body_text(), "unreadable account request");
        AppError::InvalidRequest(rejection.body_text())
    })?;

    let min_balance = state.limits.min_opening_balance;
    if request.balance < min_balance {
        tracing::warn!(customer_id = request.customer_id, balance = %request.balance, "opening balance too low");
        return Err(AppError::OpeningBalanceTooLow(min_balance));
    }

    if account_service::check_if_account_exists(state.accounts.as_ref(), &request).await {
        tracing::warn!(customer_id = request.customer_id, "duplicate account rejected");
        return Err(AppError::DuplicateAccount);
    }

    let account = account_service::open_account(state.accounts.as_ref(), request).await?;
    tracing::info!(
        customer_id = account.customer_id,
        account_number = account.account_number,
        "account created"
    );

    Ok(StatusCode::NO_CONTENT)
}

/// Delete an account by account number.
///
/// # Response
///
/// - **Success (204 No Content)**
/// - **Error (404)**: no account with this number
pub async fn delete_account(
    State(state): State<AppState>,
    Path(account_number): Path<i64>,
) -> Result<StatusCode, AppError> {
    account_service::delete_account(state.accounts.as_ref(), account_number)
        .await
        .ok_or(AppError::AccountNotFound)?;
    tracing::info!(account_number, "account deleted");

    Ok(StatusCode::NO_CONTENT)
}

/// Deposit money into an account.
///
/// # Validation
///
/// - Amount must not exceed the single-deposit cap (10,000 by default)
/// - Account must exist
pub async fn deposit_money(
    State(state): State<AppState>,
    Path(account_number): Path<i64>,
    Query(query): Query<AmountQuery>,
) -> Result<StatusCode, AppError> {
    let amount = query.amount;

    let max_deposit = state.limits.max_deposit_amount;
    if amount > max_deposit {
        tracing::warn!(account_number, %amount, "deposit over limit");
        return Err(AppError::DepositLimitExceeded(max_deposit));
    }

    transaction_service::deposit(state.accounts.as_ref(), account_number, amount).await?;

    Ok(StatusCode::NO_CONTENT)
}

/// Withdraw money from an account.
///
/// # Validation
///
/// - Account must exist
/// - Amount must not exceed 90% (by default) of the current balance
///
/// The percentage check and the balance change happen atomically.
pub async fn withdraw_money(
    State(state): State<AppState>,
    Path(account_number): Path<i64>,
    Query(query): Query<AmountQuery>,
) -> Result<StatusCode, AppError> {
    let amount = query.amount;

    transaction_service::withdraw_within_limit(
        state.accounts.as_ref(),
        account_number,
        amount,
        state.limits.max_withdrawal_percent,
    )
    .await
    .inspect_err(|err| {
        if matches!(err, AppError::WithdrawalLimitExceeded(_)) {
            tracing::warn!(account_number, %amount, "withdrawal over limit");
        }
    })?;

    Ok(StatusCode::NO_CONTENT)
}
