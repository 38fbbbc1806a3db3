//! Application state - shared across all handlers.

use std::sync::Arc;

use sample_core::pagination::PageRequest;
use sample_core::ports::{
    Cache, MicropostRepository, PasswordService, RelationshipRepository, UserRepository,
};
use sample_infra::{Argon2PasswordService, InMemoryCache, InMemoryStore};

use crate::config::AppConfig;
use crate::middleware::session::SessionStore;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserRepository>,
    pub microposts: Arc<dyn MicropostRepository>,
    pub relationships: Arc<dyn RelationshipRepository>,
    pub passwords: Arc<dyn PasswordService>,
    pub cache: Arc<dyn Cache>,
    pub sessions: SessionStore,
    pub per_page: u64,
}

impl AppState {
    /// Build the application state, on PostgreSQL when a database is
    /// configured and reachable, otherwise on the in-memory store.
    pub async fn new(config: &AppConfig) -> Self {
        #[cfg(feature = "postgres")]
        {
            if let Some(db_config) = &config.database {
                match postgres::connect(db_config, config.run_migrations).await {
                    Ok(conn) => {
                        let state = Self::assemble(
                            config,
                            Arc::new(sample_infra::PostgresUserRepository::new(conn.clone())),
                            Arc::new(sample_infra::PostgresMicropostRepository::new(conn.clone())),
                            Arc::new(sample_infra::PostgresRelationshipRepository::new(conn)),
                        );
                        tracing::info!("Application state initialized (postgres)");
                        return state;
                    }
                    Err(e) => {
                        tracing::error!(
                            "Failed to connect to database: {}. Using in-memory fallback.",
                            e
                        );
                    }
                }
            } else {
                tracing::warn!("DATABASE_URL not set. Running without database (in-memory mode).");
            }
        }

        #[cfg(not(feature = "postgres"))]
        tracing::info!("Running without postgres feature - using in-memory repositories");

        let state = Self::in_memory(config);
        tracing::info!("Application state initialized (in-memory)");
        state
    }

    /// State backed entirely by memory. Each call gets its own empty store.
    pub fn in_memory(config: &AppConfig) -> Self {
        let store = InMemoryStore::new();
        Self::assemble(
            config,
            Arc::new(store.users()),
            Arc::new(store.microposts()),
            Arc::new(store.relationships()),
        )
    }

    fn assemble(
        config: &AppConfig,
        users: Arc<dyn UserRepository>,
        microposts: Arc<dyn MicropostRepository>,
        relationships: Arc<dyn RelationshipRepository>,
    ) -> Self {
        let cache: Arc<dyn Cache> = Arc::new(InMemoryCache::new());

        Self {
            users,
            microposts,
            relationships,
            passwords: Arc::new(Argon2PasswordService::with_config(config.password)),
            sessions: SessionStore::new(cache.clone(), &config.session),
            cache,
            per_page: config.per_page,
        }
    }

    /// Page request for a `?page=` parameter at the configured page size.
    pub fn page(&self, page: Option<u64>) -> PageRequest {
        PageRequest::new(page, self.per_page)
    }
}

#[cfg(feature = "postgres")]
mod postgres {
    use migration::{Migrator, MigratorTrait};
    use sample_infra::DatabaseConfig;
    use sea_orm::{DbConn, DbErr};

    pub(super) async fn connect(config: &DatabaseConfig, migrate: bool) -> Result<DbConn, DbErr> {
        let conn = sample_infra::connect(config).await?;
        if migrate {
            Migrator::up(&conn, None).await?;
            tracing::info!("Database migrations applied");
        }
        Ok(conn)
    }
}
