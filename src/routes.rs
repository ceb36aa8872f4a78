//! HTTP routing table.

use crate::{handlers, state::AppState};
use axum::{
    Router,
    routing::{get, post, put},
};
use tower_http::trace::TraceLayer;

/// Build the application router.
///
/// `GET` and `DELETE` on `/api/account/{id}` share one path: the segment is a
/// customer id for the listing and an account number for the delete.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health::health_check))
        .route("/api/account", post(handlers::accounts::create_account))
        .route(
            "/api/account/{id}",
            get(handlers::accounts::get_accounts).delete(handlers::accounts::delete_account),
        )
        .route(
            "/api/account/Deposit/{account_number}",
            put(handlers::accounts::deposit_money),
        )
        .route(
            "/api/account/Withdraw/{account_number}",
            put(handlers::accounts::withdraw_money),
        )
        // Log every request and response
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
