use std::time::Duration;

use diesel::r2d2::{self, ConnectionManager, Pool, PooledConnection};
use diesel::sqlite::SqliteConnection;
use diesel::connection::SimpleConnection;
use diesel::prelude::*;
use diesel::sql_types::BigInt;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};

use crate::finance_store::error::StoreError;

const MIGRATIONS: EmbeddedMigrations = embed_migrations!();

const BUSY_TIMEOUT_MS: u64 = 30_000;

pub type DbPool = Pool<ConnectionManager<SqliteConnection>>;
pub type DbConnection = PooledConnection<ConnectionManager<SqliteConnection>>;

pub fn create_pool(database_url: &str, max_size: u32) -> Result<DbPool, StoreError> {
    let manager = ConnectionManager::<SqliteConnection>::new(database_url);
    let pool = Pool::builder()
        .max_size(max_size.max(1))
        .connection_timeout(Duration::from_secs(30))
        .connection_customizer(Box::new(ConnectionCustomizer))
        .build(manager)?;

    Ok(pool)
}

pub fn get_conn(pool: &DbPool) -> Result<DbConnection, StoreError> {
    let conn = pool.get()?;

    Ok(conn)
}

/// Applies every embedded migration that has not run yet.
///
/// The DDL uses `IF NOT EXISTS`, so a file whose tables were created by an
/// older tracker keeps its old layout. Such files are rejected here instead
/// of failing on the first read.
pub fn run_migrations(conn: &mut SqliteConnection) -> Result<(), StoreError> {
    let applied = conn
        .run_pending_migrations(MIGRATIONS)
        .map_err(|e| StoreError::Migration(e.to_string()))?;

    if applied.is_empty() {
        tracing::debug!("No pending migrations to apply");
    } else {
        for version in &applied {
            tracing::info!("Applied migration {}", version);
        }
    }

    ensure_current_layout(conn)
}

#[derive(QueryableByName)]
struct MatchCount {
    #[diesel(sql_type = BigInt)]
    count: i64,
}

/// Goals need the `row_id` ordering column and transactions are keyed by
/// `(user_id, id)`. Tables predating either cannot hold a snapshot.
fn ensure_current_layout(conn: &mut SqliteConnection) -> Result<(), StoreError> {
    let checks = [
        (
            "goals",
            "SELECT COUNT(*) AS count FROM pragma_table_info('goals') WHERE name = 'row_id'",
        ),
        (
            "transactions",
            "SELECT COUNT(*) AS count FROM pragma_table_info('transactions') \
             WHERE name = 'user_id' AND pk > 0",
        ),
    ];

    for (table, query) in checks {
        let found = diesel::sql_query(query).get_result::<MatchCount>(conn)?;
        if found.count == 0 {
            tracing::error!(table, "Table layout predates the current schema");
            return Err(StoreError::Migration(format!(
                "table `{}` was created by an older version of the tracker; \
                 export its data and point DATABASE_URL at a new file",
                table
            )));
        }
    }

    Ok(())
}


#[derive(Debug)]
struct ConnectionCustomizer;

impl r2d2::CustomizeConnection<SqliteConnection, r2d2::Error> for ConnectionCustomizer {
    fn on_acquire(&self, conn: &mut SqliteConnection) -> Result<(), r2d2::Error> {
        conn.batch_execute(&format!(
            "PRAGMA foreign_keys = ON; PRAGMA busy_timeout = {};",
            BUSY_TIMEOUT_MS
        ))
        .map_err(r2d2::Error::QueryError)?;

        Ok(())
    }
}
