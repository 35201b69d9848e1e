use jsonwebtoken::{decode, DecodingKey, TokenData, Validation};
use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::error::{AppError, AppResult};

/// Claims issued by the identity provider. `sub` is the opaque owner id.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    pub sub: String,
    #[serde(default)]
    pub email: Option<String>,
    pub exp: i64,
    pub iat: i64,
    pub token_type: TokenType,
}

/// The identity provider issues both kinds; only access tokens are accepted
/// on API requests.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum TokenType {
    Access,
    Refresh,
}

pub fn verify_token(token: &str, config: &Config) -> AppResult<TokenData<Claims>> {
    let mut validation = Validation::default();
    validation.validate_exp = true;

    decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.jwt_secret.as_bytes()),
        &validation,
    )
    .map_err(|e| {
        tracing::debug!(error = %e, "Token rejected");
        AppError::Unauthorized
    })
}

#[cfg(test)]
pub fn create_token(owner_id: &str, token_type: TokenType, ttl_secs: i64, config: &Config) -> String {
    use chrono::{Duration, Utc};
    use jsonwebtoken::{encode, EncodingKey, Header};

    let now = Utc::now();
    let claims = Claims {
        sub: owner_id.to_string(),
        email: None,
        exp: (now + Duration::seconds(ttl_secs)).timestamp(),
        iat: now.timestamp(),
        token_type,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.jwt_secret.as_bytes()),
    )
    .unwrap()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verify_round_trip() {
        let config = Config::for_tests();
        let token = create_token("user-123", TokenType::Access, 900, &config);
        let data = verify_token(&token, &config).unwrap();
        assert_eq!(data.claims.sub, "user-123");
        assert_eq!(data.claims.token_type, TokenType::Access);
    }

    #[test]
    fn test_expired_token_rejected() {
        let config = Config::for_tests();
        let token = create_token("user-123", TokenType::Access, -3600, &config);
        assert!(matches!(verify_token(&token, &config), Err(AppError::Unauthorized)));
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let config = Config::for_tests();
        let token = create_token("user-123", TokenType::Access, 900, &config);
        let mut other = Config::for_tests();
        other.jwt_secret = "another-secret".into();
        assert!(verify_token(&token, &other).is_err());
    }
}
