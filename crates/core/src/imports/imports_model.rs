use serde::{Deserialize, Serialize};

/// One data row of an uploaded CSV, values trimmed but otherwise untouched.
///
/// `row` counts file lines after the header, so the line right below the
/// header is row 1 and skipped blank lines still take up a number.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportRow {
    pub row: usize,
    pub transaction_date: String,
    pub amount: String,
    pub description: String,
    pub category_name: String,
    pub category_type: String,
    /// Set when the record itself could not be decoded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub malformed: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportRowError {
    pub row: usize,
    pub message: String,
}

/// Outcome of an import. Rows are independent: a rejected row is reported
/// here and does not stop the rest.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportResult {
    pub success_count: usize,
    pub error_count: usize,
    pub errors: Vec<ImportRowError>,
}

impl ImportResult {
    pub(crate) fn record_success(&mut self) {
        self.success_count += 1;
    }

    pub(crate) fn record_failure(&mut self, row: usize, message: impl Into<String>) {
        self.error_count += 1;
        self.errors.push(ImportRowError {
            row,
            message: message.into(),
        });
    }
}
