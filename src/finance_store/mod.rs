pub mod audit;
pub mod category_map;
pub mod config;
pub mod db_types;
pub mod error;
pub mod models;
pub mod operations;
pub mod store;

pub use store::FinanceStore;
