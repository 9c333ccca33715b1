//! JWT Token handling

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::domain::{User, UserRole};

/// JWT configuration
#[derive(Clone)]
pub struct JwtConfig {
    /// Secret key for signing tokens
    pub secret: String,
    /// Token expiration time in hours
    pub expiration_hours: i64,
    /// Issuer claim
    pub issuer: String,
}

impl JwtConfig {
    pub fn new(secret: impl Into<String>, expiration_hours: i64) -> Self {
        Self {
            secret: secret.into(),
            expiration_hours,
            issuer: "nexuspay".to_string(),
        }
    }
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self::new("change-me-in-production", 24)
    }
}

/// JWT TokenClaims
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct TokenClaims {
    /// Subject (user ID)
    pub sub: String,
    pub email: String,
    /// `ADMIN` or `CUSTOMER`
    pub role: String,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    pub iss: String,
}

impl TokenClaims {
    pub fn for_user(user: &User, config: &JwtConfig) -> Self {
        let now = Utc::now();
        let exp = now + Duration::hours(config.expiration_hours);

        Self {
            sub: user.id.to_string(),
            email: user.email.clone(),
            role: user.role.as_str().to_string(),
            exp: exp.timestamp(),
            iat: now.timestamp(),
            iss: config.issuer.clone(),
        }
    }

    pub fn user_id(&self) -> Option<i32> {
        self.sub.parse().ok()
    }

    pub fn is_admin(&self) -> bool {
        self.role.parse::<UserRole>().ok() == Some(UserRole::Admin)
    }
}

/// Create a JWT token for a user
pub fn create_token(
    user: &User,
    config: &JwtConfig,
) -> Result<String, jsonwebtoken::errors::Error> {
    encode(
        &Header::default(),
        &TokenClaims::for_user(user, config),
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )
}

/// Verify and decode a JWT token
pub fn verify_token(
    token: &str,
    config: &JwtConfig,
) -> Result<TokenClaims, jsonwebtoken::errors::Error> {
    let mut validation = Validation::default();
    validation.set_issuer(&[&config.issuer]);

    let token_data = decode::<TokenClaims>(
        token,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &validation,
    )?;

    Ok(token_data.claims)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn admin() -> User {
        let mut user = User::new_admin("root@nexuspay.local", "Root", "hash".into());
        user.id = 42;
        user
    }

    #[test]
    fn token_round_trips_claims() {
        let config = JwtConfig::new("test-secret", 1);
        let token = create_token(&admin(), &config).unwrap();
        let claims = verify_token(&token, &config).unwrap();
        assert_eq!(claims.user_id(), Some(42));
        assert_eq!(claims.email, "root@nexuspay.local");
        assert!(claims.is_admin());
    }

    #[test]
    fn wrong_secret_is_rejected() {
        let token = create_token(&admin(), &JwtConfig::new("one", 1)).unwrap();
        assert!(verify_token(&token, &JwtConfig::new("two", 1)).is_err());
    }

    #[test]
    fn expired_token_is_rejected() {
        let config = JwtConfig::new("test-secret", -2);
        let token = create_token(&admin(), &config).unwrap();
        assert!(verify_token(&token, &config).is_err());
    }
}
