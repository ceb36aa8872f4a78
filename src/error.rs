//! Error types and HTTP error response handling.
//!
//! This module defines all application errors and how they are converted
//! into HTTP responses with appropriate status codes and JSON bodies.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use rust_decimal::Decimal;
use serde_json::json;

/// Application-wide error type.
///
/// Every failure the API can report is either a missing resource or a
/// violated business rule. The only server-side failure is running out of
/// free account numbers.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// No account is registered for the requested customer.
    ///
    /// Returns HTTP 404 Not Found.
    #[error("Accounts Do not exist for the given Customer Id")]
    CustomerAccountsNotFound,

    /// No account carries the requested account number.
    ///
    /// Returns HTTP 404 Not Found.
    #[error("Account Does not exist")]
    AccountNotFound,

    /// Opening balance is below the configured minimum.
    #[error("Opening Balance cannot be less than ${}", with_thousands(.0))]
    OpeningBalanceTooLow(Decimal),

    /// The customer already holds an account of the same type or under the same name.
    #[error("Account already existing with the same accountType or Name")]
    DuplicateAccount,

    /// A single deposit exceeded the configured cap.
    #[error("Cannot Deposit more than ${} in a single Transaction", with_thousands(.0))]
    DepositLimitExceeded(Decimal),

    /// A withdrawal would take more than the allowed share of the balance.
    #[error("Cannot Withdraw more than {0}% from your account")]
    WithdrawalLimitExceeded(Decimal),

    /// The generated account number is already taken.
    #[error("Account number {0} is already in use")]
    AccountNumberTaken(i64),

    /// Request parameters are invalid.
    ///
    /// Returns HTTP 400 Bad Request.
    /// The String contains details about what was invalid.
    #[error("Invalid request")]
    InvalidRequest(String),

    /// Unexpected server-side failure. Details are logged, never returned.
    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

/// Render an amount with comma thousands separators, `10000.5` as `10,000.5`.
fn with_thousands(amount: &Decimal) -> String {
    let text = amount.to_string();
    let (sign, unsigned) = match text.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", text.as_str()),
    };
    let (whole, fraction) = match unsigned.split_once('.') {
        Some((whole, fraction)) => (whole, Some(fraction)),
        None => (unsigned, None),
    };

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    match fraction {
        Some(fraction) => format!("{sign}{grouped}.{fraction}"),
        None => format!("{sign}{grouped}"),
    }
}

/// Convert AppError into an HTTP response.
///
/// # Response Format
///
/// ```json
/// {
///   "error": {
///     "code": "account_not_found",
///     "message": "Account Does not exist"
///   }
/// }
/// ```
///
/// # Status Code Mapping
///
/// - `CustomerAccountsNotFound`, `AccountNotFound` → 404 Not Found
/// - business rule violations and `InvalidRequest` → 400 Bad Request
/// - `AccountNumberTaken`, `Internal` → 500 Internal Server Error (hides details from client)
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match self {
            AppError::CustomerAccountsNotFound => (
                StatusCode::NOT_FOUND,
                "customer_accounts_not_found",
                self.to_string(),
            ),
            AppError::AccountNotFound => {
                (StatusCode::NOT_FOUND, "account_not_found", self.to_string())
            }
            AppError::OpeningBalanceTooLow(_) => (
                StatusCode::BAD_REQUEST,
                "opening_balance_too_low",
                self.to_string(),
            ),
            AppError::DuplicateAccount => {
                (StatusCode::BAD_REQUEST, "duplicate_account", self.to_string())
            }
            AppError::DepositLimitExceeded(_) => (
                StatusCode::BAD_REQUEST,
                "deposit_limit_exceeded",
                self.to_string(),
            ),
            AppError::WithdrawalLimitExceeded(_) => (
                StatusCode::BAD_REQUEST,
                "withdrawal_limit_exceeded",
                self.to_string(),
            ),
            AppError::InvalidRequest(ref msg) => {
                (StatusCode::BAD_REQUEST, "invalid_request", msg.clone())
            }
            AppError::AccountNumberTaken(_) | AppError::Internal(_) => {
                tracing::error!(error = %self, "request failed with internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    "An internal error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_variants_map_to_404() {
        assert_eq!(
            AppError::AccountNotFound.into_response().status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::CustomerAccountsNotFound.into_response().status(),
            StatusCode::NOT_FOUND
        );
    }

    #[test]
    fn rule_violations_map_to_400() {
        for err in [
            AppError::OpeningBalanceTooLow(Decimal::ONE_HUNDRED),
            AppError::DuplicateAccount,
            AppError::DepositLimitExceeded(Decimal::from(10_000)),
            AppError::WithdrawalLimitExceeded(Decimal::from(90)),
            AppError::InvalidRequest("bad".into()),
        ] {
            assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
        }
    }

    #[test]
    fn messages_carry_the_configured_limit() {
        assert_eq!(
            AppError::OpeningBalanceTooLow(Decimal::ONE_HUNDRED).to_string(),
            "Opening Balance cannot be less than $100"
        );
        assert_eq!(
            AppError::DepositLimitExceeded(Decimal::from(10_000)).to_string(),
            "Cannot Deposit more than $10,000 in a single Transaction"
        );
        assert_eq!(
            AppError::WithdrawalLimitExceeded(Decimal::from(90)).to_string(),
            "Cannot Withdraw more than 90% from your account"
        );
    }

    #[test]
    fn thousands_are_grouped() {
        assert_eq!(with_thousands(&Decimal::from(100)), "100");
        assert_eq!(with_thousands(&Decimal::from(1_234_567)), "1,234,567");
        assert_eq!(with_thousands(&Decimal::new(-250_050, 2)), "-2,500.50");
    }

    #[test]
    fn internal_errors_map_to_500() {
        let err = AppError::Internal(anyhow::anyhow!("boom"));
        assert_eq!(
            err.into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            AppError::AccountNumberTaken(7).into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
