//! Session token issuance and verification.
//!
//! Tokens are stateless HS256 JWTs carrying the user id; nothing is stored
//! server-side, so a token is invalidated only by its expiry. Signature
//! verification is mandatory before any claim is trusted.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Session tokens live for 3 days.
pub const TOKEN_TTL_DAYS: i64 = 3;

/// JWT claims structure
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// User ID
    pub sub: Uuid,
    /// Issued at time
    pub iat: i64,
    /// Expiration time
    pub exp: i64,
}

#[derive(Clone)]
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl TokenService {
    pub fn new(secret: &[u8]) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = 0;

        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            validation,
        }
    }

    /// Issue a token for a user, expiring in [`TOKEN_TTL_DAYS`].
    pub fn issue(&self, user_id: Uuid) -> Result<String, jsonwebtoken::errors::Error> {
        let now = Utc::now();
        let claims = Claims {
            sub: user_id,
            iat: now.timestamp(),
            exp: (now + Duration::days(TOKEN_TTL_DAYS)).timestamp(),
        };

        encode(&Header::default(), &claims, &self.encoding_key)
    }

    /// Verify a token's signature and expiry and return its claims.
    pub fn verify(&self, token: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
        let data = decode::<Claims>(token, &self.decoding_key, &self.validation)?;
        Ok(data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_issue_and_verify_round_trip() {
        let service = TokenService::new(b"test-secret");
        let user_id = Uuid::new_v4();

        let token = service.issue(user_id).unwrap();
        let claims = service.verify(&token).unwrap();

        assert_eq!(claims.sub, user_id);
        assert_eq!(claims.exp - claims.iat, TOKEN_TTL_DAYS * 24 * 60 * 60);
    }

    #[test]
    fn test_token_signed_with_other_secret_rejected() {
        let issuer = TokenService::new(b"secret-a");
        let verifier = TokenService::new(b"secret-b");

        let token = issuer.issue(Uuid::new_v4()).unwrap();
        assert!(verifier.verify(&token).is_err());
    }

    #[test]
    fn test_expired_token_rejected() {
        let service = TokenService::new(b"test-secret");
        let now = Utc::now();
        let claims = Claims {
            sub: Uuid::new_v4(),
            iat: (now - Duration::days(4)).timestamp(),
            exp: (now - Duration::days(1)).timestamp(),
        };
        let token = encode(&Header::default(), &claims, &service.encoding_key).unwrap();

        assert!(service.verify(&token).is_err());
    }

    #[test]
    fn test_tampered_token_rejected() {
        let service = TokenService::new(b"test-secret");
        let mut token = service.issue(Uuid::new_v4()).unwrap();
        token.push('x');

        assert!(service.verify(&token).is_err());
    }
}
