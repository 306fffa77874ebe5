//! Execution seam for normalized GraphQL requests.

use serde_json::{Value, json};

use crate::services::auth::AuthToken;
use crate::services::request_reader::GraphQLPayload;

/// Runs a normalized request. Schema execution lives behind this trait.
pub trait GraphQLExecutor: Send + Sync {
    fn execute(&self, payload: GraphQLPayload, auth: Option<&AuthToken>) -> Value;
}

/// Answers every request with the payload it was given.
///
/// Used until a real engine is plugged in; handy for checking what a client sent.
#[derive(Debug, Clone, Copy, Default)]
pub struct EchoExecutor;

impl GraphQLExecutor for EchoExecutor {
    fn execute(&self, payload: GraphQLPayload, auth: Option<&AuthToken>) -> Value {
        json!({
            "data": null,
            "extensions": {
                "request": payload,
                "authenticated": auth.is_some(),
                "auth": auth,
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;

    #[test]
    fn echoes_payload_and_auth_state() {
        let payload = GraphQLPayload {
            query: Some("{token}".to_string()),
            ..GraphQLPayload::default()
        };
        let token = AuthToken {
            user_id: Some("user-1".to_string()),
            user_name: None,
            shop_id: Some(1),
            anonymous: false,
            token_id: None,
            issued_at: None,
            expires_at: Utc::now(),
        };

        let value = EchoExecutor.execute(payload, Some(&token));

        assert_eq!(value["data"], Value::Null);
        assert_eq!(value["extensions"]["request"]["query"], "{token}");
        assert_eq!(value["extensions"]["request"]["operationName"], Value::Null);
        assert_eq!(value["extensions"]["authenticated"], true);
        assert_eq!(value["extensions"]["auth"]["userId"], "user-1");
        assert_eq!(value["extensions"]["auth"]["shopId"], 1);
    }
}
