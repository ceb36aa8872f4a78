//! Data models for stored accounts and API payloads.

/// Bank account model
pub mod account;
