use crate::error::{AppError, AppResult};
use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // 后台用户 ID (users.id)
    pub exp: i64,
    pub iat: i64,
    pub token_type: String, // "access"
}

#[derive(Clone)]
pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    access_token_expires_in: i64,
}

impl JwtService {
    pub fn new(secret: &str, access_expires_in: i64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            access_token_expires_in: access_expires_in,
        }
    }

    /// 签发访问令牌（身份提供方对接不在本服务范围内，主要用于运维与测试）
    pub fn generate_access_token(&self, user_id: &str) -> AppResult<String> {
        let now = Utc::now();
        let exp = now + Duration::seconds(self.access_token_expires_in);

        let claims = Claims {
            sub: user_id.to_string(),
            exp: exp.timestamp(),
            iat: now.timestamp(),
            token_type: "access".to_string(),
        };

        encode(&Header::default(), &claims, &self.encoding_key).map_err(AppError::JwtError)
    }

    pub fn verify_token(&self, token: &str) -> AppResult<Claims> {
        let validation = Validation::new(Algorithm::HS256);
        decode::<Claims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(AppError::JwtError)
    }

    pub fn verify_access_token(&self, token: &str) -> AppResult<Claims> {
        let claims = self.verify_token(token)?;

        if claims.token_type != "access" {
            return Err(AppError::AuthError("Invalid access token type".to_string()));
        }

        Ok(claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_access_token_roundtrip() {
        let jwt = JwtService::new("test-secret", 60);
        let token = jwt.generate_access_token("admin-1").unwrap();
        let claims = jwt.verify_access_token(&token).unwrap();
        assert_eq!(claims.sub, "admin-1");
        assert_eq!(claims.token_type, "access");
    }

    #[test]
    fn test_token_signed_with_other_secret_is_rejected() {
        let issuer = JwtService::new("secret-a", 60);
        let verifier = JwtService::new("secret-b", 60);
        let token = issuer.generate_access_token("admin-1").unwrap();
        assert!(verifier.verify_access_token(&token).is_err());
    }

    #[test]
    fn test_expired_token_is_rejected() {
        // 超过默认 60 秒 leeway
        let jwt = JwtService::new("test-secret", -3600);
        let token = jwt.generate_access_token("admin-1").unwrap();
        assert!(jwt.verify_access_token(&token).is_err());
    }
}
