pub mod jwt_config;
pub mod token_validator;

pub use jwt_config::ShopJwtConfiguration;
pub use token_validator::{AuthToken, JwtTokenValidator, TokenValidationError, TokenValidator};
