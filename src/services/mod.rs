/*
 * Responsibility
 * - auth: token validation + JWT configuration seams
 * - request_reader: per-request token extraction and GraphQL payload normalization
 * - graphql: execution seam the normalized payload is handed to
 */
pub mod auth;
pub mod graphql;
pub mod request_reader;
