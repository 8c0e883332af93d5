//! HS256 session tokens.
//!
//! A token carries the admin id and role. It is delivered only through the
//! `admin_token` cookie, never in a response body.

use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use portfolio_core::types::DbId;
use serde::{Deserialize, Serialize};

/// JWT claims embedded in every session token.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// The admin's database id.
    pub id: DbId,
    /// The admin's role at login time. Guards re-read the role from the
    /// database on every request.
    pub role: String,
    /// Unix seconds.
    pub exp: i64,
    pub iat: i64,
}

/// Configuration for token generation and validation.
#[derive(Debug, Clone)]
pub struct JwtConfig {
    pub secret: String,
    /// Token and cookie lifetime in days (default: 7).
    pub expiry_days: i64,
}

/// Default token lifetime in days.
const DEFAULT_EXPIRY_DAYS: i64 = 7;

impl JwtConfig {
    /// `JWT_SECRET` (required, non-empty) and `JWT_EXPIRY_DAYS` (default 7).
    ///
    /// # Panics
    ///
    /// When the secret is missing or the expiry is not a positive integer.
    pub fn from_env() -> Self {
        let secret = std::env::var("JWT_SECRET")
            .ok()
            .filter(|s| !s.is_empty())
            .expect("JWT_SECRET must be set to a non-empty value");

        let expiry_days = match std::env::var("JWT_EXPIRY_DAYS") {
            Ok(raw) => raw
                .parse::<i64>()
                .ok()
                .filter(|days| *days > 0)
                .expect("JWT_EXPIRY_DAYS must be a positive number of days"),
            Err(_) => DEFAULT_EXPIRY_DAYS,
        };

        Self {
            secret,
            expiry_days,
        }
    }

    /// Token lifetime in seconds, also used as the cookie `Max-Age`.
    pub fn expiry_secs(&self) -> i64 {
        self.expiry_days * 24 * 60 * 60
    }
}

/// Generate an HS256 session token for the given admin.
pub fn generate_token(
    admin_id: DbId,
    role: &str,
    config: &JwtConfig,
) -> Result<String, jsonwebtoken::errors::Error> {
    let now = chrono::Utc::now().timestamp();
    let claims = Claims {
        id: admin_id,
        role: role.to_string(),
        exp: now + config.expiry_secs(),
        iat: now,
    };

    let key = EncodingKey::from_secret(config.secret.as_bytes());
    encode(&Header::new(Algorithm::HS256), &claims, &key)
}

/// Validate and decode a session token, returning the embedded [`Claims`].
pub fn validate_token(
    token: &str,
    config: &JwtConfig,
) -> Result<Claims, jsonwebtoken::errors::Error> {
    let key = DecodingKey::from_secret(config.secret.as_bytes());
    let mut validation = Validation::new(Algorithm::HS256);
    validation.set_required_spec_claims(&["exp", "iat"]);
    decode::<Claims>(token, &key, &validation).map(|data| data.claims)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(secret: &str) -> JwtConfig {
        JwtConfig {
            secret: secret.to_string(),
            expiry_days: DEFAULT_EXPIRY_DAYS,
        }
    }

    fn sign(claims: &Claims, secret: &str) -> String {
        encode(
            &Header::new(Algorithm::HS256),
            claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap()
    }

    #[test]
    fn session_token_carries_id_role_and_week_lifetime() {
        let cfg = config("portfolio-session-key");
        let token = generate_token(42, "editor", &cfg).unwrap();

        let claims = validate_token(&token, &cfg).unwrap();
        assert_eq!((claims.id, claims.role.as_str()), (42, "editor"));
        assert_eq!(claims.exp - claims.iat, cfg.expiry_secs());
        assert_eq!(cfg.expiry_secs(), 604_800);
    }

    #[test]
    fn lapsed_session_is_rejected() {
        let now = chrono::Utc::now().timestamp();
        let stale = Claims {
            id: 7,
            role: "admin".to_string(),
            iat: now - 8 * 24 * 3600,
            exp: now - 24 * 3600,
        };
        let token = sign(&stale, "portfolio-session-key");
        assert!(validate_token(&token, &config("portfolio-session-key")).is_err());
    }

    #[test]
    fn token_from_another_deployment_is_rejected() {
        let token = generate_token(1, "superadmin", &config("staging-key")).unwrap();
        assert!(validate_token(&token, &config("production-key")).is_err());
    }

    #[test]
    fn garbage_cookie_value_is_rejected() {
        assert!(validate_token("not.a.jwt", &config("portfolio-session-key")).is_err());
    }
}
