//! Account data models and API request types.
//!
//! This module defines:
//! - `Account`: a stored bank account, also the response body for listings
//! - `BaseAccount`: request body for opening an account
//! - `AmountQuery`: the `?amount=` query string of deposit and withdraw

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A customer's bank account.
///
/// # JSON Example
///
/// ```json
/// {
///   "customerId": 42,
///   "accountNumber": 1804289383,
///   "firstName": "Ada",
///   "lastName": "Lovelace",
///   "accountType": "Savings",
///   "balance": 150.25,
///   "lastUpdatedDate": "2025-12-20T10:00:00Z"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    /// Customer that owns this account
    pub customer_id: i32,

    /// System-assigned identifier, unique within the store
    pub account_number: i64,

    pub first_name: String,

    pub last_name: String,

    /// Free-form account kind, e.g. "Savings" or "Checking"
    pub account_type: String,

    /// Current balance
    ///
    /// Serialized as a JSON number carrying every decimal digit.
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub balance: Decimal,

    /// Timestamp of creation or of the last balance change
    pub last_updated_date: DateTime<Utc>,
}

impl Account {
    /// Build a stored account from a creation request.
    pub fn from_base(base: BaseAccount, account_number: i64, now: DateTime<Utc>) -> Self {
        Self {
            customer_id: base.customer_id,
            account_number,
            first_name: base.first_name,
            last_name: base.last_name,
            account_type: base.account_type,
            balance: base.balance,
            last_updated_date: now,
        }
    }
}

/// Request body for opening a new account.
///
/// # JSON Example
///
/// ```json
/// {
///   "customerId": 42,
///   "firstName": "Ada",
///   "lastName": "Lovelace",
///   "balance": 150.25,
///   "accountType": "Savings"
/// }
/// ```
///
/// Omitted fields take defaults: empty strings, customer 0, and the smallest
/// representable balance, so a request without a balance fails the opening
/// balance rule instead of the JSON parser.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BaseAccount {
    #[serde(default)]
    pub customer_id: i32,

    #[serde(default)]
    pub first_name: String,

    #[serde(default)]
    pub last_name: String,

    #[serde(
        default = "missing_balance",
        with = "rust_decimal::serde::arbitrary_precision"
    )]
    pub balance: Decimal,

    #[serde(default)]
    pub account_type: String,
}

fn missing_balance() -> Decimal {
    Decimal::MIN
}

/// Query string for deposit and withdraw, `?amount=250.00`.
///
/// A missing amount is treated as zero.
#[derive(Debug, Default, Deserialize)]
pub struct AmountQuery {
    #[serde(default)]
    pub amount: Decimal,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn account_serializes_with_camel_case_fields() {
        let account = Account {
            customer_id: 1,
            account_number: 99,
            first_name: "Ada".into(),
            last_name: "Lovelace".into(),
            account_type: "Savings".into(),
            balance: dec!(150.5),
            last_updated_date: Utc::now(),
        };

        let value = serde_json::to_value(&account).unwrap();
        assert_eq!(value["customerId"], 1);
        assert_eq!(value["accountNumber"], 99);
        assert_eq!(value["accountType"], "Savings");
        assert_eq!(value["balance"], 150.5);
        assert!(value.get("lastUpdatedDate").is_some());
    }

    #[test]
    fn balance_keeps_every_digit_through_json() {
        let account = Account {
            customer_id: 1,
            account_number: 5,
            first_name: "Ada".into(),
            last_name: "Lovelace".into(),
            account_type: "Savings".into(),
            balance: dec!(100.0000000000000001),
            last_updated_date: Utc::now(),
        };

        let text = serde_json::to_string(&account).unwrap();
        assert!(text.contains(r#""balance":100.0000000000000001"#), "{text}");

        let back: Account = serde_json::from_str(&text).unwrap();
        assert_eq!(back.balance, dec!(100.0000000000000001));
    }

    #[test]
    fn base_account_without_balance_or_customer_uses_defaults() {
        let base: BaseAccount =
            serde_json::from_str(r#"{"firstName": "Ada", "accountType": "Savings"}"#).unwrap();

        assert_eq!(base.customer_id, 0);
        assert_eq!(base.balance, Decimal::MIN);
    }

    #[test]
    fn base_account_defaults_missing_names() {
        let base: BaseAccount =
            serde_json::from_str(r#"{"customerId": 7, "balance": 250}"#).unwrap();

        assert_eq!(base.customer_id, 7);
        assert_eq!(base.balance, dec!(250));
        assert!(base.first_name.is_empty());
        assert!(base.account_type.is_empty());
    }
}
