//! Fintrack Core - Domain entities, services, and traits.
//!
//! This crate contains the ledger engine: transaction filtering, sorting and
//! pagination, aggregation, savings goals and forecasting.
//! It is database-agnostic and defines traits that are implemented
//! by the `storage-sqlite` crate.

pub mod aggregation;
pub mod categories;
pub mod constants;
pub mod errors;
pub mod forecast;
pub mod goals;
pub mod imports;
pub mod transactions;
pub mod utils;

#[cfg(test)]
pub(crate) mod test_fixtures;

// Re-export error types
pub use errors::Error;
pub use errors::Result;
