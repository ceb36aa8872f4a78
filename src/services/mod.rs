//! Business logic services.
//!
//! Services sit between the HTTP handlers and the account store. They do not
//! apply the request-level validation rules; the handlers do.

pub mod account_service;
pub mod transaction_service;
