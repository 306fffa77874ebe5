use chrono::{DateTime, Utc};
use jsonwebtoken::{DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::jwt_config::JwtConfigurationProvider;

// Errors returned by token verification + shop-specific claim checks.
#[derive(Debug, Error)]
pub enum TokenValidationError {
    #[error("jwt verification failed: {0}")]
    Jwt(#[from] jsonwebtoken::errors::Error),
    #[error("token was issued for shop {actual}, expected {expected}")]
    ShopMismatch { expected: u32, actual: u32 },
    #[error("invalid '{0}' timestamp")]
    InvalidTimestamp(&'static str),
}

/// Structural, signature and expiry checks for a raw bearer token.
pub trait TokenValidator: Send + Sync {
    fn validate_token(&self, token: &str) -> Result<AuthToken, TokenValidationError>;
}

/// Claims as written by the shop's token issuer.
#[derive(Debug, Clone, Deserialize)]
struct ShopTokenClaims {
    exp: i64,
    #[serde(default)]
    iat: Option<i64>,

    #[serde(default)]
    shopid: Option<u32>,
    #[serde(default)]
    username: Option<String>,
    #[serde(default)]
    userid: Option<String>,
    #[serde(default)]
    useranonymous: bool,
    #[serde(default)]
    tokenid: Option<String>,
}

/// A parsed and verified token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthToken {
    pub user_id: Option<String>,
    pub user_name: Option<String>,
    pub shop_id: Option<u32>,
    pub anonymous: bool,
    pub token_id: Option<String>,
    pub issued_at: Option<DateTime<Utc>>,
    pub expires_at: DateTime<Utc>,
}

/// HMAC JWT verifier configured by a `JwtConfigurationProvider`.
///
/// `jsonwebtoken::Validation` checks signature, `exp`, `nbf`, `iss` and `aud`;
/// on top of that the `shopid` claim, when present, has to match this shop.
#[derive(Clone)]
pub struct JwtTokenValidator {
    decoding_key: DecodingKey,
    validation: Validation,
    shop_id: u32,
}

impl std::fmt::Debug for JwtTokenValidator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Do not print key material
        f.debug_struct("JwtTokenValidator")
            .field("validation", &self.validation)
            .field("shop_id", &self.shop_id)
            .finish()
    }
}

impl JwtTokenValidator {
    pub fn new(provider: &dyn JwtConfigurationProvider) -> Self {
        let mut validation = Validation::new(provider.algorithm());
        validation.set_issuer(&[provider.issuer()]);
        validation.set_audience(&[provider.audience()]);
        validation.validate_nbf = true;
        validation.leeway = provider.leeway_seconds();

        Self {
            decoding_key: provider.decoding_key(),
            validation,
            shop_id: provider.shop_id(),
        }
    }
}

impl TokenValidator for JwtTokenValidator {
    fn validate_token(&self, token: &str) -> Result<AuthToken, TokenValidationError> {
        let claims =
            jsonwebtoken::decode::<ShopTokenClaims>(token, &self.decoding_key, &self.validation)?
                .claims;

        if let Some(actual) = claims.shopid
            && actual != self.shop_id
        {
            return Err(TokenValidationError::ShopMismatch {
                expected: self.shop_id,
                actual,
            });
        }

        let expires_at = DateTime::from_timestamp(claims.exp, 0)
            .ok_or(TokenValidationError::InvalidTimestamp("exp"))?;
        let issued_at = claims
            .iat
            .map(|iat| {
                DateTime::from_timestamp(iat, 0).ok_or(TokenValidationError::InvalidTimestamp("iat"))
            })
            .transpose()?;

        Ok(AuthToken {
            user_id: claims.userid.filter(|s| !s.trim().is_empty()),
            user_name: claims.username.filter(|s| !s.trim().is_empty()),
            shop_id: claims.shopid,
            anonymous: claims.useranonymous,
            token_id: claims.tokenid,
            issued_at,
            expires_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use jsonwebtoken::{Algorithm, EncodingKey, Header};
    use serde_json::{Value, json};

    use super::*;
    use crate::services::auth::jwt_config::ShopJwtConfiguration;

    const SHOP_URL: &str = "https://www.myoxidshop.com/";

    fn signature() -> String {
        "0123456789abcdef".repeat(4)
    }

    fn validator() -> JwtTokenValidator {
        JwtTokenValidator::new(&ShopJwtConfiguration::new(SHOP_URL, 1, signature(), 0))
    }

    fn sign(claims: &Value, secret: &str) -> String {
        jsonwebtoken::encode(
            &Header::new(Algorithm::HS512),
            claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap()
    }

    fn claims(exp_offset: i64) -> Value {
        let now = Utc::now().timestamp();
        json!({
            "iss": SHOP_URL,
            "aud": SHOP_URL,
            "iat": now,
            "nbf": now,
            "exp": now + exp_offset,
            "shopid": 1,
            "username": "user@oxid-esales.com",
            "userid": "e7af1c3b786fd02906ccd75698f4e6b9",
            "useranonymous": false,
            "tokenid": "d9d6b8d1c9e1c2f1a8f4e8b0c0a2e7f3",
        })
    }

    #[test]
    fn accepts_token_signed_by_this_shop() {
        let token = validator()
            .validate_token(&sign(&claims(3600), &signature()))
            .unwrap();

        assert_eq!(token.user_name.as_deref(), Some("user@oxid-esales.com"));
        assert_eq!(
            token.user_id.as_deref(),
            Some("e7af1c3b786fd02906ccd75698f4e6b9")
        );
        assert_eq!(token.shop_id, Some(1));
        assert!(!token.anonymous);
        assert!(token.issued_at.is_some());
        assert!(token.expires_at > Utc::now());
    }

    #[test]
    fn rejects_wrong_signature() {
        let other = "f".repeat(64);
        let err = validator()
            .validate_token(&sign(&claims(3600), &other))
            .unwrap_err();
        assert!(matches!(err, TokenValidationError::Jwt(_)));
    }

    #[test]
    fn rejects_expired_token() {
        let err = validator()
            .validate_token(&sign(&claims(-3600), &signature()))
            .unwrap_err();
        assert!(matches!(err, TokenValidationError::Jwt(_)));
    }

    #[test]
    fn rejects_foreign_issuer() {
        let mut claims = claims(3600);
        claims["iss"] = json!("https://another-shop.example/");
        let err = validator()
            .validate_token(&sign(&claims, &signature()))
            .unwrap_err();
        assert!(matches!(err, TokenValidationError::Jwt(_)));
    }

    #[test]
    fn rejects_token_for_another_shop() {
        let mut claims = claims(3600);
        claims["shopid"] = json!(2);
        let err = validator()
            .validate_token(&sign(&claims, &signature()))
            .unwrap_err();
        assert!(matches!(
            err,
            TokenValidationError::ShopMismatch {
                expected: 1,
                actual: 2
            }
        ));
    }

    #[test]
    fn rejects_garbage() {
        let err = validator().validate_token("invalidjwt").unwrap_err();
        assert!(matches!(err, TokenValidationError::Jwt(_)));
    }
}
