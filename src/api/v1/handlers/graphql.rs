/*
 * Responsibility
 * - GET|POST /graphql
 * - normalize the request into {query, variables, operationName} and hand it,
 *   together with the optional verified token, to the executor
 */
use axum::{Json, extract::State};
use serde_json::Value;

use crate::api::v1::extractors::{AuthCtx, MaybeAuthCtx, RawRequestExtractor};
use crate::error::AppError;
use crate::services::request_reader::graphql_request_data;
use crate::state::AppState;

pub async fn graphql(
    State(state): State<AppState>,
    MaybeAuthCtx(auth): MaybeAuthCtx,
    RawRequestExtractor(request): RawRequestExtractor,
) -> Result<Json<Value>, AppError> {
    let payload = graphql_request_data(&request).inspect_err(|err| {
        tracing::warn!(error = %err, "graphql request could not be normalized");
    })?;

    tracing::debug!(
        operation_name = ?payload.operation_name,
        authenticated = auth.is_some(),
        "graphql request normalized"
    );

    let response = state
        .executor
        .execute(payload, auth.as_ref().map(AuthCtx::token));

    Ok(Json(response))
}
