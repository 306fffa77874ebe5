/*
 * Responsibility
 * - v1 URL layout
 * - /health is open; /graphql runs behind the bearer token middleware
 */
use axum::{Router, routing::get};

use crate::api::v1::handlers::{graphql::graphql, health::health};
use crate::middleware;
use crate::state::AppState;

pub fn routes(state: AppState) -> Router<AppState> {
    let graphql = Router::new().route("/graphql", get(graphql).post(graphql));
    let graphql = middleware::auth::access::apply(graphql, state);

    Router::new().route("/health", get(health)).merge(graphql)
}
