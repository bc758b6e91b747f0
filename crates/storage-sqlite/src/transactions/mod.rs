//! SQLite storage implementation for the ledger.

mod model;
mod repository;

pub use model::{NewTransactionDB, TransactionDB, TransactionDetailsDB};
pub use repository::TransactionRepository;
pub(crate) use repository::insert_transaction;
