pub mod finance;
pub mod health;
