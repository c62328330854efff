use axum::Router;
use axum::routing::{get, post};

use crate::core::ServerState;
use crate::handler;

/// Points router - credit trigger plus ledger read paths
pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/api/points/credit", post(handler::points::credit))
        .route("/api/points/balance/{user_id}", get(handler::points::balance))
        .route(
            "/api/points/transactions/{user_id}",
            get(handler::points::transactions),
        )
}
