use thiserror::Error;

use crate::services::auth::TokenValidationError;

/// A bearer-shaped header carried a token the validator rejected.
#[derive(Debug, Error)]
#[error("invalid token: {0}")]
pub struct InvalidToken(#[from] pub TokenValidationError);

#[derive(Debug, Error)]
pub enum GraphQLRequestError {
    #[error("unable to read request body: {0}")]
    UnreadableBody(#[from] std::io::Error),
    #[error("malformed json body: {0}")]
    MalformedJsonBody(#[source] serde_json::Error),
    #[error("malformed variables: {0}")]
    MalformedVariables(String),
    #[error("invariant violation: {0}")]
    InvariantViolation(&'static str),
}
