pub mod db;

pub mod accounts;
pub mod broker;
pub mod instruments;
pub mod market_data;
pub mod portfolio;
pub mod reports;
pub mod transactions;

pub mod constants;
pub mod errors;
pub mod schema;

pub use errors::{Error, Result};
