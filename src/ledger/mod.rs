//! The transaction and material ledgers. These operate on the in-memory `AppState` only; the
//! `Booth` runs them and persists the result.
pub mod materials;
pub mod transactions;

pub use transactions::SearchMode;
