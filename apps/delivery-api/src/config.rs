//! Application configuration loaded from environment variables.

use std::env;

#[cfg(feature = "postgres")]
use delivery_infra::DatabaseConfig;
use delivery_infra::{JwtConfig, PasswordStorage};

/// Application configuration. Read once at startup, immutable afterwards.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    #[cfg(feature = "postgres")]
    pub database: Option<DatabaseConfig>,
    pub jwt: JwtConfig,
    pub password_storage: PasswordStorage,
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        #[cfg(feature = "postgres")]
        let database = env::var("DATABASE_URL").ok().map(|url| DatabaseConfig {
            url,
            max_connections: env::var("DB_MAX_CONNECTIONS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(100),
            min_connections: env::var("DB_MIN_CONNECTIONS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(10),
        });

        Self {
            host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            #[cfg(feature = "postgres")]
            database,
            jwt: JwtConfig::from_env(),
            password_storage: Self::parse_password_storage(),
        }
    }

    /// PASSWORD_STORAGE=argon2|plaintext, defaulting to argon2.
    fn parse_password_storage() -> PasswordStorage {
        match env::var("PASSWORD_STORAGE") {
            Ok(value) => value.parse().unwrap_or_else(|e| {
                tracing::warn!("{}. Falling back to argon2.", e);
                PasswordStorage::Argon2
            }),
            Err(_) => PasswordStorage::default(),
        }
    }
}
