// Public library interface for finance-tracker-backend
pub mod api;
pub mod cli_utils;
pub mod finance_store;
pub mod schema;
pub mod utils;
