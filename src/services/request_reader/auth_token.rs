//! Bearer token extraction from request headers.
//!
//! Absent or non-bearer-shaped headers mean "no auth attempted" and yield
//! `Ok(None)`; only a bearer-shaped value the validator rejects is an error.

use std::sync::Arc;

use axum::http::{HeaderMap, HeaderName, header};

use super::error::InvalidToken;
use crate::services::auth::{AuthToken, TokenValidator};

const BEARER_SCHEME: &str = "Bearer";

pub struct AuthTokenExtractor {
    validator: Arc<dyn TokenValidator>,
    // Checked in order; the first header present wins.
    header_names: [HeaderName; 2],
}

impl std::fmt::Debug for AuthTokenExtractor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthTokenExtractor")
            .field("header_names", &self.header_names)
            .finish()
    }
}

impl AuthTokenExtractor {
    pub fn new(validator: Arc<dyn TokenValidator>, forwarded_header: HeaderName) -> Self {
        Self {
            validator,
            header_names: [header::AUTHORIZATION, forwarded_header],
        }
    }

    pub fn auth_token(&self, headers: &HeaderMap) -> Result<Option<AuthToken>, InvalidToken> {
        let Some(value) = self.header_names.iter().find_map(|name| headers.get(name)) else {
            return Ok(None);
        };

        // Non visible-ASCII values cannot be bearer-shaped.
        let Some(token) = value.to_str().ok().and_then(bearer_token) else {
            return Ok(None);
        };

        Ok(Some(self.validator.validate_token(token)?))
    }
}

/// Token part of `Bearer <token>` after trimming the whole value.
///
/// The scheme is matched case-sensitively and must be followed by whitespace.
pub fn bearer_token(value: &str) -> Option<&str> {
    let rest = value.trim().strip_prefix(BEARER_SCHEME)?;
    if !rest.starts_with(char::is_whitespace) {
        return None;
    }
    let token = rest.trim_start();
    if token.is_empty() { None } else { Some(token) }
}
