//! Command handlers for the booth CLI. Each handler opens the booth through a `Config`, does one
//! thing, and returns an `Out` for `main` to print.

mod debt;
mod delete;
mod init;
mod list;
mod materials;
mod quote;
mod remind;
mod sell;
mod transfer;
mod update;

use serde::Serialize;
use std::fmt::Debug;
use tracing::{debug, info};

pub use debt::debt;
pub use delete::delete;
pub use init::init;
pub use list::{list, Listing};
pub use materials::{materials_cost, materials_set, materials_show, BuyList};
pub use quote::quote;
pub use remind::remind;
pub use sell::sell;
pub use transfer::{export, import, Exported};
pub use update::update;

/// What a command hands back: a summary for the cashier and the data behind it for callers of
/// the library.
#[derive(Debug, Clone, Serialize)]
pub struct Out<T>
where
    T: Serialize + Clone + Debug,
{
    message: String,
    data: T,
}

impl<T> Out<T>
where
    T: Serialize + Clone + Debug,
{
    pub fn new(message: impl Into<String>, data: T) -> Self {
        Self {
            message: message.into(),
            data,
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn data(&self) -> &T {
        &self.data
    }

    pub fn into_data(self) -> T {
        self.data
    }

    /// Logs the summary at `info`, one event per line so tables stay aligned, and the data as
    /// JSON at `debug`.
    pub fn print(&self) {
        for line in self.message.lines() {
            info!("{line}");
        }
        match serde_json::to_string_pretty(&self.data) {
            Ok(json) => debug!("Command output:\n{json}"),
            Err(e) => debug!("Unable to serialize the command output: {e}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_out_keeps_message_and_data() {
        let out = Out::new(String::from("Sold 2 sales"), vec![1_i64, 2]);
        assert_eq!(out.message(), "Sold 2 sales");
        assert_eq!(out.data(), &vec![1, 2]);
        out.print();
        assert_eq!(out.into_data(), vec![1, 2]);
    }
}
