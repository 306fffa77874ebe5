/*!
 * Request reader
 *
 * Responsibility:
 * - bearer token extraction + validation (auth_token)
 * - GraphQL payload normalization across JSON / form / multipart bodies (graphql_request)
 *
 * Both read the same `RawRequest` snapshot and do not depend on each other.
 */

mod auth_token;
mod content_type;
mod error;
mod graphql_request;
mod raw_request;

pub use auth_token::AuthTokenExtractor;
pub use content_type::{ContentKind, is_form_urlencoded};
pub use error::{GraphQLRequestError, InvalidToken};
pub use graphql_request::{GraphQLPayload, graphql_request_data};
pub use raw_request::RawRequest;
