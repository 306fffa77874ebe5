/*
 * Responsibility
 * - Shared context bound to the Router (AppState)
 *   - token extractor (with its injected validator), GraphQL executor, body limit
 * - Cheap to Clone (everything behind Arc); nothing per-request lives here
 */
use std::sync::Arc;

use crate::services::{graphql::GraphQLExecutor, request_reader::AuthTokenExtractor};

#[derive(Clone)]
pub struct AppState {
    pub tokens: Arc<AuthTokenExtractor>,
    pub executor: Arc<dyn GraphQLExecutor>,
    pub body_limit_bytes: usize,
}

impl AppState {
    pub fn new(
        tokens: Arc<AuthTokenExtractor>,
        executor: Arc<dyn GraphQLExecutor>,
        body_limit_bytes: usize,
    ) -> Self {
        Self {
            tokens,
            executor,
            body_limit_bytes,
        }
    }
}
