use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Connection pool error: {0}")]
    Pool(#[from] diesel::r2d2::PoolError),

    #[error("{0}")]
    Query(#[from] diesel::result::Error),

    #[error("Migration failed: {0}")]
    Migration(String),

    #[error("Store task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}
