//! SQLite storage implementation for Fintrack.
//!
//! This crate provides all database-related functionality using Diesel ORM with SQLite.
//! It implements the repository traits defined in `fintrack-core` and contains:
//! - Database connection pooling and the serialized writer
//! - Diesel migrations
//! - Repository implementations for categories, transactions and savings goals
//! - Database-specific model types (with Diesel derives)
//!
//! This crate is the only place in the application where Diesel dependencies exist.
//! Amounts are stored as integer minor units (cents).

pub mod db;
pub mod errors;
pub mod schema;
pub mod utils;

// Repository implementations
pub mod categories;
pub mod goals;
pub mod transactions;

#[cfg(test)]
pub(crate) mod test_support;

// Re-export database utilities
pub use db::{
    create_pool, get_connection, init, run_migrations, spawn_writer, DbConnection, DbPool,
    WriteHandle,
};

// Re-export storage errors and conversion helpers
pub use errors::{IntoCore, StorageError};

// Re-export from fintrack-core for convenience
pub use fintrack_core::errors::{DatabaseError, Error, Result};
