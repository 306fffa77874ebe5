/*
 * Responsibility
 * - The authenticated context a handler sees
 * - Put into request extensions by the auth middleware; verification itself
 *   belongs to services/request_reader + services/auth
 */
use crate::services::auth::AuthToken;

#[derive(Debug, Clone)]
pub struct AuthCtx {
    token: AuthToken,
}

impl AuthCtx {
    pub fn new(token: AuthToken) -> Self {
        Self { token }
    }

    pub fn token(&self) -> &AuthToken {
        &self.token
    }
}
