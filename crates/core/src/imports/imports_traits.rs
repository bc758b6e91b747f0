use async_trait::async_trait;

use super::imports_model::{ImportResult, ImportRow};
use crate::errors::Result;

/// Trait for bulk ledger imports.
#[async_trait]
pub trait ImportServiceTrait: Send + Sync {
    /// Parses a CSV upload and records every valid row.
    async fn import_csv(&self, owner_id: &str, content: &[u8]) -> Result<ImportResult>;
    async fn import_rows(&self, owner_id: &str, rows: Vec<ImportRow>) -> Result<ImportResult>;
}
