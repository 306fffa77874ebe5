/*
 * Responsibility
 * - auth_ctx: verified token placed by the auth middleware
 * - raw_request: per-request snapshot for the request reader
 */
pub mod auth_ctx;
pub mod raw_request;

pub use auth_ctx::{AuthCtx, MaybeAuthCtx};
pub use raw_request::RawRequestExtractor;
