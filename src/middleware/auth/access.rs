//! Bearer token check -> AuthCtx in request extensions.
//!
//! Anonymous requests are allowed through untouched. A bearer-shaped header with a
//! token the validator rejects ends the request with 401.

use axum::{
    Router,
    body::Body,
    extract::State,
    http::Request,
    middleware::{self, Next},
    response::Response,
};

use crate::api::v1::extractors::AuthCtx;
use crate::error::AppError;
use crate::state::AppState;

/// Apply token extraction to every route of `router`.
///
/// ```ignore
/// let graphql = Router::new().route("/graphql", post(graphql));
/// let graphql = middleware::auth::access::apply(graphql, state.clone());
/// ```
pub fn apply(router: Router<AppState>, state: AppState) -> Router<AppState> {
    router.layer(middleware::from_fn_with_state(state, access_middleware))
}

async fn access_middleware(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    match state.tokens.auth_token(req.headers()) {
        Ok(Some(token)) => {
            tracing::debug!(
                user_id = ?token.user_id,
                anonymous = token.anonymous,
                "access token verified"
            );
            // middleware -> extractor
            req.extensions_mut().insert(AuthCtx::new(token));
        }
        Ok(None) => {}
        Err(err) => {
            tracing::warn!(error = %err, "access token verification failed");
            return Err(err.into());
        }
    }

    Ok(next.run(req).await)
}
