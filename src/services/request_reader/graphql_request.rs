//! Normalizes a GraphQL request into `{query, variables, operationName}`.
//!
//! The carrier is picked from the content type:
//! - unset: query-string fields only
//! - `application/json`: the body is a JSON object
//! - `multipart/*`: the `operations` POST field holds the JSON object
//! - anything else: query-string and POST fields, `variables` JSON-encoded
//!
//! Missing values become `null`. Malformed JSON bodies and multipart requests
//! without a usable `operations` field are errors.

use std::io::Read;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::content_type::ContentKind;
use super::error::GraphQLRequestError;
use super::raw_request::RawRequest;

/// Canonical request handed to the execution engine. All three keys are
/// always serialized, `null` when absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphQLPayload {
    pub query: Option<String>,
    pub variables: Option<Map<String, Value>>,
    pub operation_name: Option<String>,
}

// JSON shape shared by `application/json` bodies and multipart `operations`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct OperationDescriptor {
    #[serde(default)]
    query: Option<String>,
    #[serde(default)]
    variables: Option<Value>,
    #[serde(default)]
    operation_name: Option<String>,
}

impl OperationDescriptor {
    fn into_payload(self) -> Result<GraphQLPayload, GraphQLRequestError> {
        Ok(GraphQLPayload {
            query: self.query,
            variables: self.variables.map(decode_variables).transpose()?.flatten(),
            operation_name: self.operation_name,
        })
    }
}

/// Reads the GraphQL triple from `request`, taking a JSON body from the request itself.
pub fn graphql_request_data(request: &RawRequest) -> Result<GraphQLPayload, GraphQLRequestError> {
    graphql_request_data_from(request, request.body())
}

/// Same as [`graphql_request_data`], but a JSON body is read from `source`.
pub fn graphql_request_data_from(
    request: &RawRequest,
    source: impl Read,
) -> Result<GraphQLPayload, GraphQLRequestError> {
    match ContentKind::classify(request.content_type()) {
        ContentKind::Unset | ContentKind::Fields => from_fields(request),
        ContentKind::Json => from_json_source(source),
        ContentKind::Multipart => from_multipart(request),
    }
}

fn from_json_source(mut source: impl Read) -> Result<GraphQLPayload, GraphQLRequestError> {
    let mut raw = Vec::new();
    source.read_to_end(&mut raw)?;

    if raw.iter().all(u8::is_ascii_whitespace) {
        return Ok(GraphQLPayload::default());
    }

    let Value::Object(object) =
        serde_json::from_slice::<Value>(&raw).map_err(GraphQLRequestError::MalformedJsonBody)?
    else {
        return Err(GraphQLRequestError::MalformedJsonBody(
            serde::de::Error::custom("expected a JSON object"),
        ));
    };

    serde_json::from_value::<OperationDescriptor>(Value::Object(object))
        .map_err(GraphQLRequestError::MalformedJsonBody)?
        .into_payload()
}

fn from_fields(request: &RawRequest) -> Result<GraphQLPayload, GraphQLRequestError> {
    let variables = request
        .request_field("variables")
        .map(|v| decode_variables(Value::String(v.to_owned())))
        .transpose()?
        .flatten();

    Ok(GraphQLPayload {
        query: request.request_field("query").map(str::to_owned),
        variables,
        operation_name: request.request_field("operationName").map(str::to_owned),
    })
}

fn from_multipart(request: &RawRequest) -> Result<GraphQLPayload, GraphQLRequestError> {
    // `map` (file -> variable path) is accepted but not applied here.
    let operations = request
        .post_field("operations")
        .ok_or(GraphQLRequestError::InvariantViolation(
            "multipart request is missing the 'operations' field",
        ))?;

    let object: Map<String, Value> = serde_json::from_str(operations).map_err(|_| {
        GraphQLRequestError::InvariantViolation("'operations' must be a JSON object")
    })?;
    if !object.contains_key("query") {
        return Err(GraphQLRequestError::InvariantViolation(
            "'operations' must contain a 'query'",
        ));
    }

    serde_json::from_value::<OperationDescriptor>(Value::Object(object))
        .map_err(|_| {
            GraphQLRequestError::InvariantViolation("'operations' does not describe a GraphQL request")
        })?
        .into_payload()
}

// `variables` may be an object, null, or a JSON-encoded string of either.
// An empty array is an empty variable set.
fn decode_variables(value: Value) -> Result<Option<Map<String, Value>>, GraphQLRequestError> {
    match value {
        Value::String(s) if s.trim().is_empty() => Ok(None),
        Value::String(s) => serde_json::from_str::<Value>(&s)
            .map_err(|e| GraphQLRequestError::MalformedVariables(e.to_string()))
            .and_then(decoded_variables),
        other => decoded_variables(other),
    }
}

fn decoded_variables(value: Value) -> Result<Option<Map<String, Value>>, GraphQLRequestError> {
    match value {
        Value::Null => Ok(None),
        Value::Object(map) => Ok(Some(map)),
        Value::Array(items) if items.is_empty() => Ok(Some(Map::new())),
        _ => Err(GraphQLRequestError::MalformedVariables(
            "expected a JSON object".to_string(),
        )),
    }
}
