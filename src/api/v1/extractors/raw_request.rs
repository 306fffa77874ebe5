/*
 * Responsibility
 * - Turn one axum request into a RawRequest snapshot
 *   - headers, query-string fields
 *   - body bytes (JSON / anything else), decoded fields (url-encoded, multipart text parts)
 * - Body read failures are rejected here: 413 over the limit, 400 otherwise
 */
use axum::body::Bytes;
use axum::extract::{FromRequest, Multipart, Request};

use crate::error::AppError;
use crate::services::request_reader::{ContentKind, RawRequest, is_form_urlencoded};
use crate::state::AppState;

pub struct RawRequestExtractor(pub RawRequest);

impl FromRequest<AppState> for RawRequestExtractor {
    type Rejection = AppError;

    async fn from_request(req: Request, state: &AppState) -> Result<Self, Self::Rejection> {
        let mut raw = RawRequest::new(req.headers().clone());

        if let Some(query) = req.uri().query() {
            let fields: Vec<(String, String)> = serde_urlencoded::from_str(query)
                .map_err(|e| AppError::bad_request("MALFORMED_QUERY_STRING", e.to_string()))?;
            for (name, value) in fields {
                raw.insert_query_field(name, value);
            }
        }

        match ContentKind::classify(raw.content_type()) {
            ContentKind::Multipart => read_multipart(req, state, &mut raw).await?,
            _ => read_body(req, state, &mut raw).await?,
        }

        Ok(Self(raw))
    }
}

// Bounded by the router's `DefaultBodyLimit`.
async fn read_body(req: Request, state: &AppState, raw: &mut RawRequest) -> Result<(), AppError> {
    let body = Bytes::from_request(req, state).await.map_err(|rejection| {
        tracing::warn!(error = %rejection, "failed to read request body");
        AppError::unreadable_body(rejection.status(), "unable to read request body")
    })?;

    if is_form_urlencoded(raw.content_type()) {
        let fields: Vec<(String, String)> = serde_urlencoded::from_bytes(&body)
            .map_err(|e| AppError::bad_request("MALFORMED_FORM_BODY", e.to_string()))?;
        for (name, value) in fields {
            raw.insert_post_field(name, value);
        }
    }

    raw.set_body(body);
    Ok(())
}

// Text parts become POST fields; file parts are skipped at this layer.
async fn read_multipart(
    req: Request,
    state: &AppState,
    raw: &mut RawRequest,
) -> Result<(), AppError> {
    let mut multipart = Multipart::from_request(req, state).await.map_err(|rejection| {
        tracing::warn!(error = %rejection, "multipart body could not be opened");
        AppError::unreadable_body(rejection.status(), "unable to read multipart body")
    })?;

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        tracing::warn!(error = %e, "multipart body could not be decoded");
        AppError::unreadable_body(e.status(), "unable to decode multipart body")
    })? {
        let Some(name) = field.name().map(str::to_owned) else {
            continue;
        };

        if let Some(file_name) = field.file_name() {
            tracing::debug!(field = %name, file_name, "skipping multipart file part");
            continue;
        }

        let text = field.text().await.map_err(|e| {
            tracing::warn!(error = %e, field = %name, "multipart field could not be read");
            AppError::unreadable_body(e.status(), "unable to read multipart field")
        })?;
        raw.insert_post_field(name, text);
    }

    Ok(())
}
