//! JWT token service implementation.

use chrono::{DateTime, TimeDelta, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use delivery_core::ports::{AuthError, TokenClaims, TokenService};

const DEFAULT_SECRET: &str = "change-me-in-production-at-least-32-bytes";
const DEFAULT_LIFETIME_MINUTES: i64 = 60;
/// One year.
const MAX_LIFETIME_MINUTES: i64 = 60 * 24 * 365;

/// JWT signing parameters. Built once at startup.
#[derive(Debug, Clone)]
pub struct JwtConfig {
    pub issuer: String,
    pub audience: String,
    pub secret: String,
    pub lifetime_minutes: i64,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            issuer: "delivery-backend".to_string(),
            audience: "delivery-clients".to_string(),
            secret: DEFAULT_SECRET.to_string(),
            lifetime_minutes: DEFAULT_LIFETIME_MINUTES,
        }
    }
}

impl JwtConfig {
    /// Load signing parameters from `JWT_*` environment variables.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let secret = std::env::var("JWT_SECRET").unwrap_or_else(|_| DEFAULT_SECRET.to_string());

        // Warn if using default secret in production
        if secret == DEFAULT_SECRET {
            let is_production = std::env::var("RUST_ENV")
                .map(|v| v == "production" || v == "prod")
                .unwrap_or(false);

            if is_production {
                tracing::error!(
                    "SECURITY: Using default JWT secret in production! Set JWT_SECRET environment variable."
                );
            } else {
                tracing::warn!("Using default JWT secret. Set JWT_SECRET for production use.");
            }
        }

        Self {
            issuer: std::env::var("JWT_ISSUER").unwrap_or(defaults.issuer),
            audience: std::env::var("JWT_AUDIENCE").unwrap_or(defaults.audience),
            secret,
            lifetime_minutes: parse_lifetime(std::env::var("JWT_LIFETIME_MINUTES").ok()),
        }
    }
}

/// Token lifetime in minutes, bounded to `1..=MAX_LIFETIME_MINUTES`.
fn parse_lifetime(raw: Option<String>) -> i64 {
    let Some(raw) = raw else {
        return DEFAULT_LIFETIME_MINUTES;
    };

    match raw.trim().parse::<i64>() {
        Ok(m) if m > 0 && m <= MAX_LIFETIME_MINUTES && TimeDelta::try_minutes(m).is_some() => m,
        _ => {
            tracing::warn!(
                "Ignoring JWT_LIFETIME_MINUTES={:?}; expected 1..={}, using {}",
                raw,
                MAX_LIFETIME_MINUTES,
                DEFAULT_LIFETIME_MINUTES
            );
            DEFAULT_LIFETIME_MINUTES
        }
    }
}

/// Wire form of the token claims.
#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: String, // user_id
    nbf: i64,
    iat: i64,
    exp: i64,
    iss: String,
    aud: String,
}

/// HS256 JWT token service.
pub struct JwtTokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    config: JwtConfig,
}

impl JwtTokenService {
    pub fn new(config: JwtConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.secret.as_bytes());

        Self {
            encoding_key,
            decoding_key,
            config,
        }
    }
}

impl TokenService for JwtTokenService {
    fn issue_token_at(&self, subject: Uuid, now: DateTime<Utc>) -> Result<String, AuthError> {
        let exp = TimeDelta::try_minutes(self.config.lifetime_minutes)
            .and_then(|lifetime| now.checked_add_signed(lifetime))
            .ok_or_else(|| {
                AuthError::Signing(format!(
                    "token lifetime of {} minutes is out of range",
                    self.config.lifetime_minutes
                ))
            })?;

        let claims = Claims {
            sub: subject.to_string(),
            nbf: now.timestamp(),
            iat: now.timestamp(),
            exp: exp.timestamp(),
            iss: self.config.issuer.clone(),
            aud: self.config.audience.clone(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| AuthError::Signing(e.to_string()))
    }

    fn validate_token(&self, token: &str) -> Result<TokenClaims, AuthError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[&self.config.issuer]);
        validation.set_audience(&[&self.config.audience]);
        validation.validate_nbf = true;

        let token_data = decode::<Claims>(token, &self.decoding_key, &validation).map_err(|e| {
            match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => AuthError::TokenExpired,
                _ => AuthError::InvalidToken(e.to_string()),
            }
        })?;

        let subject = Uuid::parse_str(&token_data.claims.sub)
            .map_err(|e| AuthError::InvalidToken(e.to_string()))?;

        Ok(TokenClaims {
            subject,
            issuer: token_data.claims.iss,
            audience: token_data.claims.aud,
            not_before: token_data.claims.nbf,
            expires_at: token_data.claims.exp,
        })
    }

    fn lifetime_seconds(&self) -> i64 {
        self.config.lifetime_minutes.saturating_mul(60)
    }
}
