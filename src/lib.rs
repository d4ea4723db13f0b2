//! Key Ledger
//!
//! Per-account API keys holding token balances, with:
//! - Create, delete, balance override and zero-sum transfer between keys
//! - Optimistic concurrency on every account write
//! - JWT identities and a stored admin flag
//! - A small public blog feed managed by admins

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;

use std::sync::Arc;

use api::state::AppState;
use domain::account::AccountRepository;
use domain::storage::Storage;
use domain::{BalanceLedger, BlogPost};
use infrastructure::{
    account::{AccountService, InMemoryAccountRepository, PostgresAccountRepository},
    auth::{JwtConfig, JwtService},
    services::BlogPostService,
    storage::{run_storage_migrations, InMemoryStorage, PostgresStorage, StorageConfig},
};
use tracing::{info, warn};

const DEFAULT_JWT_SECRET: &str = "change-me-in-production";
const BLOG_POSTS_TABLE: &str = "blog_posts";

/// Create the application state with default (in-memory) configuration
pub async fn create_app_state() -> anyhow::Result<AppState> {
    create_app_state_with_config(&AppConfig::default()).await
}

/// Create the application state, connecting to the configured storage backend
pub async fn create_app_state_with_config(config: &AppConfig) -> anyhow::Result<AppState> {
    let storage_config = StorageConfig::from_settings(&config.storage)?;
    info!("Storage backend: {:?}", storage_config.storage_type());

    let (accounts, posts): (Arc<dyn AccountRepository>, Arc<dyn Storage<BlogPost>>) =
        match storage_config {
            StorageConfig::InMemory => (
                Arc::new(InMemoryAccountRepository::new()),
                Arc::new(InMemoryStorage::<BlogPost>::new()),
            ),
            StorageConfig::Postgres(pg_config) => {
                info!("Connecting to PostgreSQL...");
                let pool = pg_config.connect().await?;
                run_storage_migrations(&pool).await?;
                info!("PostgreSQL connection established");

                (
                    Arc::new(PostgresAccountRepository::new(pool.clone())),
                    Arc::new(PostgresStorage::<BlogPost>::new(pool, BLOG_POSTS_TABLE)),
                )
            }
        };

    build_app_state(config, accounts, posts).await
}

/// Wire services over the given stores and create the bootstrap admin, if configured
pub async fn build_app_state(
    config: &AppConfig,
    accounts: Arc<dyn AccountRepository>,
    posts: Arc<dyn Storage<BlogPost>>,
) -> anyhow::Result<AppState> {
    let account_service = AccountService::new(accounts)
        .with_ledger(BalanceLedger::new(config.ledger.same_key_transfer))
        .with_max_conflict_retries(config.storage.max_conflict_retries);

    bootstrap_admin(&account_service, config).await?;

    if config.auth.jwt_secret == DEFAULT_JWT_SECRET {
        warn!("auth.jwt_secret is the built-in default. Set APP__AUTH__JWT_SECRET in production.");
    }

    Ok(AppState::new(
        Arc::new(account_service),
        Arc::new(BlogPostService::new(posts)),
        Arc::new(JwtService::new(JwtConfig::from(&config.auth))),
    ))
}

async fn bootstrap_admin(
    account_service: &AccountService<dyn AccountRepository>,
    config: &AppConfig,
) -> anyhow::Result<()> {
    let Some(admin_id) = config.auth.bootstrap_admin_id.as_deref() else {
        return Ok(());
    };

    let email = config
        .auth
        .bootstrap_admin_email
        .clone()
        .unwrap_or_else(|| format!("{}@localhost", admin_id));

    let admin = account_service.ensure_admin(admin_id, &email).await?;
    info!(account_id = %admin.id(), "Bootstrap admin ready");

    Ok(())
}
