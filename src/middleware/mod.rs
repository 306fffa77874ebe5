/*
 * Responsibility
 * - middleware public interface
 * - auth: bearer token -> AuthCtx in request extensions
 * - http: request id, body limit, timeout, access log
 */
pub mod auth;
pub mod http;
