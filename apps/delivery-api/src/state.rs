//! Application state - shared across all handlers.

use std::sync::Arc;

use delivery_core::IdentityService;
use delivery_core::ports::{OrderService, PasswordService, TokenService, UserRepository};
#[cfg(feature = "postgres")]
use delivery_infra::{DatabaseConnections, PostgresOrderService, PostgresUserRepository};
use delivery_infra::{InMemoryOrderService, InMemoryUserRepository, JwtConfig, JwtTokenService};

use crate::config::AppConfig;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub identity: Arc<IdentityService>,
    pub orders: Arc<dyn OrderService>,
    pub tokens: Arc<dyn TokenService>,
    #[cfg(feature = "postgres")]
    pub db: Option<Arc<DatabaseConnections>>,
}

impl AppState {
    /// Build the application state with appropriate implementations.
    pub async fn new(config: &AppConfig) -> Self {
        let passwords = config.password_storage.service();

        #[cfg(feature = "postgres")]
        if let Some(conn) = Self::connect(config).await {
            let users = Arc::new(PostgresUserRepository::new(conn.main.clone()));
            let orders = Arc::new(PostgresOrderService::new(conn.main.clone()));

            let mut state = Self::assemble(users, orders, config.jwt.clone(), passwords);
            state.db = Some(conn);

            tracing::info!("Application state initialized");
            return state;
        }

        #[cfg(not(feature = "postgres"))]
        tracing::info!("Running without postgres feature - using in-memory storage");

        let state = Self::in_memory(config.jwt.clone(), passwords);
        tracing::info!("Application state initialized");
        state
    }

    #[cfg(feature = "postgres")]
    async fn connect(config: &AppConfig) -> Option<Arc<DatabaseConnections>> {
        let Some(db_config) = &config.database else {
            tracing::warn!("DATABASE_URL not set. Running without database (in-memory mode).");
            return None;
        };

        match DatabaseConnections::init(db_config).await {
            Ok(connections) => Some(Arc::new(connections)),
            Err(e) => {
                tracing::error!(
                    "Failed to connect to database: {}. Using in-memory fallback.",
                    e
                );
                None
            }
        }
    }

    /// State backed entirely by in-memory adapters.
    pub fn in_memory(jwt: JwtConfig, passwords: Arc<dyn PasswordService>) -> Self {
        Self::assemble(
            Arc::new(InMemoryUserRepository::new()),
            Arc::new(InMemoryOrderService::new()),
            jwt,
            passwords,
        )
    }

    fn assemble(
        users: Arc<dyn UserRepository>,
        orders: Arc<dyn OrderService>,
        jwt: JwtConfig,
        passwords: Arc<dyn PasswordService>,
    ) -> Self {
        let tokens: Arc<dyn TokenService> = Arc::new(JwtTokenService::new(jwt));
        let identity = Arc::new(IdentityService::new(users, tokens.clone(), passwords));

        Self {
            identity,
            orders,
            tokens,
            #[cfg(feature = "postgres")]
            db: None,
        }
    }
}
