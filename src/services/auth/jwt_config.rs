//! Key material and claim expectations for shop-issued tokens.

use jsonwebtoken::{Algorithm, DecodingKey};

use crate::config::Config;

/// Supplies everything `JwtTokenValidator` needs to check a token.
///
/// Only the validator talks to this; the request reader never does.
pub trait JwtConfigurationProvider: Send + Sync {
    fn algorithm(&self) -> Algorithm;
    fn decoding_key(&self) -> DecodingKey;
    fn issuer(&self) -> &str;
    fn audience(&self) -> &str;
    fn leeway_seconds(&self) -> u64;
    fn shop_id(&self) -> u32;
}

/// HS512 configuration derived from the shop URL and signature.
#[derive(Clone)]
pub struct ShopJwtConfiguration {
    shop_url: String,
    shop_id: u32,
    signature: String,
    leeway_seconds: u64,
}

impl std::fmt::Debug for ShopJwtConfiguration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Do not print key material
        f.debug_struct("ShopJwtConfiguration")
            .field("shop_url", &self.shop_url)
            .field("shop_id", &self.shop_id)
            .field("leeway_seconds", &self.leeway_seconds)
            .finish()
    }
}

impl ShopJwtConfiguration {
    pub fn new(
        shop_url: impl Into<String>,
        shop_id: u32,
        signature: impl Into<String>,
        leeway_seconds: u64,
    ) -> Self {
        Self {
            shop_url: shop_url.into(),
            shop_id,
            signature: signature.into(),
            leeway_seconds,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            config.shop_url.clone(),
            config.shop_id,
            config.jwt_signature.clone(),
            config.token_leeway_seconds,
        )
    }
}

impl JwtConfigurationProvider for ShopJwtConfiguration {
    fn algorithm(&self) -> Algorithm {
        Algorithm::HS512
    }

    fn decoding_key(&self) -> DecodingKey {
        DecodingKey::from_secret(self.signature.as_bytes())
    }

    // The shop both issues and consumes its tokens.
    fn issuer(&self) -> &str {
        &self.shop_url
    }

    fn audience(&self) -> &str {
        &self.shop_url
    }

    fn leeway_seconds(&self) -> u64 {
        self.leeway_seconds
    }

    fn shop_id(&self) -> u32 {
        self.shop_id
    }
}
