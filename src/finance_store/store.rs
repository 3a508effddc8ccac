use diesel::sqlite::SqliteConnection;

use crate::finance_store::config::TenantContext;
use crate::finance_store::error::StoreError;
use crate::finance_store::models::{FinanceSnapshot, ReplaceSummary};
use crate::finance_store::operations;
use crate::utils::db::{DbPool, get_conn};

/// Persistence facade over one tenant's profile, transactions, categories,
/// goals and achievements.
///
/// Each call checks a connection out of the pool and runs on the blocking
/// thread pool. The spawned task owns the connection, so dropping the
/// returned future (e.g. a client hanging up) still lets the database
/// transaction commit or roll back.
#[derive(Clone)]
pub struct FinanceStore {
    pool: DbPool,
}

impl FinanceStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub async fn initialize(&self, tenant: TenantContext) -> Result<(), StoreError> {
        self.run(move |conn| operations::initialize(conn, tenant)).await
    }

    pub async fn fetch_all(&self, tenant: TenantContext) -> Result<FinanceSnapshot, StoreError> {
        self.run(move |conn| operations::fetch_all(conn, tenant)).await
    }

    pub async fn replace_all(
        &self,
        tenant: TenantContext,
        snapshot: FinanceSnapshot,
    ) -> Result<ReplaceSummary, StoreError> {
        self.run(move |conn| operations::replace_all(conn, tenant, &snapshot))
            .await
    }

    pub async fn reset_all(&self, tenant: TenantContext) -> Result<(), StoreError> {
        self.run(move |conn| operations::reset_all(conn, tenant)).await
    }

    async fn run<F, T>(&self, job: F) -> Result<T, StoreError>
    where
        F: FnOnce(&mut SqliteConnection) -> Result<T, StoreError> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();

        tokio::task::spawn_blocking(move || {
            let mut conn = get_conn(&pool)?;
            job(&mut *conn)
        })
        .await?
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::finance_store::models::TransactionEntry;
    use crate::utils::db::create_pool;

    async fn open_store() -> (tempfile::TempDir, FinanceStore) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("finance.db");
        let pool = create_pool(path.to_str().unwrap(), 2).unwrap();
        let store = FinanceStore::new(pool);
        store.initialize(TenantContext::default()).await.unwrap();
        (dir, store)
    }

    #[tokio::test]
    async fn test_store_round_trip_through_pool() {
        let (_dir, store) = open_store().await;
        let tenant = TenantContext::default();

        let snapshot = FinanceSnapshot {
            balance: 100.0,
            transactions: vec![TransactionEntry {
                id: 1,
                kind: "income".to_string(),
                amount: 100.0,
                category: "Salary".to_string(),
                emoji: "💳".to_string(),
                description: String::new(),
                date: String::new(),
                original_text: String::new(),
            }],
            ..FinanceSnapshot::default()
        };

        let summary = store.replace_all(tenant, snapshot.clone()).await.unwrap();
        assert_eq!(summary.transactions, 1);
        assert_eq!(store.fetch_all(tenant).await.unwrap(), snapshot);

        store.reset_all(tenant).await.unwrap();
        assert_eq!(store.fetch_all(tenant).await.unwrap(), FinanceSnapshot::default());
    }

    #[tokio::test]
    async fn test_initialize_twice_keeps_profile() {
        let (_dir, store) = open_store().await;
        let tenant = TenantContext::default();

        let snapshot = FinanceSnapshot {
            monthly_budget: 650.0,
            savings_goal: 35,
            ..FinanceSnapshot::default()
        };
        store.replace_all(tenant, snapshot.clone()).await.unwrap();
        store.initialize(tenant).await.unwrap();

        assert_eq!(store.fetch_all(tenant).await.unwrap(), snapshot);
    }
}
