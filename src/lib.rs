pub mod args;
mod backup;
mod booth;
pub mod commands;
mod config;
pub mod debt;
mod error;
mod form;
pub mod ledger;
pub mod model;
pub mod pagination;
pub mod pricing;
pub mod reminder;
pub mod store;
#[cfg(test)]
mod test;
mod utils;

pub use backup::Backup;
pub use booth::Booth;
pub use config::Config;
pub use error::{Error, ErrorType, Result};
pub use form::{FormMode, TransactionForm};
