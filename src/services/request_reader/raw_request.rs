/*
 * Responsibility
 * - Per-request snapshot of everything the reader looks at
 *   (headers, raw body, query-string fields, decoded POST fields)
 * - Built once per request by the HTTP extractor, never shared between requests
 */
use std::collections::HashMap;

use axum::body::Bytes;
use axum::http::{HeaderMap, header};
#[cfg(test)]
use axum::http::{HeaderName, HeaderValue};

#[derive(Debug, Clone, Default)]
pub struct RawRequest {
    headers: HeaderMap,
    body: Bytes,
    query_fields: HashMap<String, String>,
    post_fields: HashMap<String, String>,
}

impl RawRequest {
    pub fn new(headers: HeaderMap) -> Self {
        Self {
            headers,
            ..Self::default()
        }
    }

    pub fn content_type(&self) -> Option<&str> {
        self.headers
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
    }

    pub fn body(&self) -> &[u8] {
        &self.body
    }

    pub fn post_field(&self, name: &str) -> Option<&str> {
        self.post_fields.get(name).map(String::as_str)
    }

    /// Query-string fields overlaid with POST fields (POST wins).
    pub fn request_field(&self, name: &str) -> Option<&str> {
        self.post_fields
            .get(name)
            .or_else(|| self.query_fields.get(name))
            .map(String::as_str)
    }

    pub fn set_body(&mut self, body: Bytes) {
        self.body = body;
    }

    pub fn insert_query_field(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.query_fields.insert(name.into(), value.into());
    }

    pub fn insert_post_field(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.post_fields.insert(name.into(), value.into());
    }
}

#[cfg(test)]
impl RawRequest {
    pub fn with_header(mut self, name: HeaderName, value: &'static str) -> Self {
        self.headers.insert(name, HeaderValue::from_static(value));
        self
    }

    pub fn with_body(mut self, body: impl Into<Bytes>) -> Self {
        self.set_body(body.into());
        self
    }

    pub fn with_query_field(mut self, name: &str, value: &str) -> Self {
        self.insert_query_field(name, value);
        self
    }

    pub fn with_post_field(mut self, name: &str, value: &str) -> Self {
        self.insert_post_field(name, value);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn post_fields_shadow_query_fields() {
        let request = RawRequest::default()
            .with_query_field("query", "from-query")
            .with_query_field("operationName", "op")
            .with_post_field("query", "from-post");

        assert_eq!(request.request_field("query"), Some("from-post"));
        assert_eq!(request.request_field("operationName"), Some("op"));
        assert_eq!(request.request_field("variables"), None);
        assert_eq!(request.post_field("operationName"), None);
    }

    #[test]
    fn content_type_reads_header() {
        let request = RawRequest::default().with_header(header::CONTENT_TYPE, "text/plain");
        assert_eq!(request.content_type(), Some("text/plain"));
        assert_eq!(RawRequest::default().content_type(), None);
    }
}
