use axum::Router;
use axum::routing::{get, post, put};

use crate::core::ServerState;
use crate::handler;

/// Rewards router
///
/// Authentication and admin authorization live in the surrounding
/// platform; this service trusts its callers.
pub fn router() -> Router<ServerState> {
    Router::new()
        .route(
            "/api/rewards",
            get(handler::rewards::list).post(handler::rewards::create),
        )
        .route(
            "/api/rewards/overview/{user_id}",
            get(handler::rewards::overview),
        )
        .route("/api/rewards/redeem", post(handler::rewards::redeem))
        .route(
            "/api/rewards/{id}",
            put(handler::rewards::update).delete(handler::rewards::remove),
        )
}
