use anyhow::Result;
use clap::Args;

use crate::finance_store::{FinanceStore, config::TenantContext};
use crate::utils::db::create_pool;

/// Database settings shared by the server and the admin CLI.
#[derive(Args, Debug, Clone)]
pub struct DatabaseArgs {
    /// Path of the SQLite database file
    #[clap(long, env, default_value = "finance.db")]
    pub database_url: String,

    /// Maximum number of pooled connections
    #[clap(long, env, default_value_t = 5)]
    pub db_pool_size: u32,

    /// Profile row that every store operation is scoped to
    #[clap(long, env, default_value_t = TenantContext::DEFAULT_USER_ID)]
    pub tenant_id: i32,
}

#[derive(Clone)]
pub struct AppConfig {
    pub store: FinanceStore,
    pub tenant: TenantContext,
}

impl AppConfig {
    pub fn new(store: FinanceStore, tenant: TenantContext) -> Self {
        Self { store, tenant }
    }

    /// Opens the pool and runs the store's startup hook. Any failure here is
    /// fatal for the caller.
    pub async fn connect(args: &DatabaseArgs) -> Result<Self> {
        let pool = create_pool(&args.database_url, args.db_pool_size)?;
        let store = FinanceStore::new(pool);
        let tenant = TenantContext::new(args.tenant_id);

        store.initialize(tenant).await?;
        tracing::info!(
            database = %args.database_url,
            tenant = tenant.user_id,
            "Finance store initialized"
        );

        Ok(Self::new(store, tenant))
    }
}
