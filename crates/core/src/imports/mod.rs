//! Imports module - CSV ledger import.

mod csv_parser;
mod imports_model;
mod imports_service;
mod imports_traits;

pub use csv_parser::parse_csv;
pub use imports_model::{ImportResult, ImportRow, ImportRowError};
pub use imports_service::ImportService;
pub use imports_traits::ImportServiceTrait;
