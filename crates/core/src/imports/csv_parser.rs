//! CSV parsing for ledger imports.
//!
//! Expects a header row naming the columns. Header matching ignores case and
//! surrounding whitespace, and column order is free.

use std::collections::HashMap;

use csv::{ByteRecord, ReaderBuilder, StringRecord, Trim};

use super::imports_model::ImportRow;
use crate::errors::{Error, ValidationError};
use crate::Result;

pub const COLUMN_DATE: &str = "transaction_date";
pub const COLUMN_AMOUNT: &str = "amount";
pub const COLUMN_DESCRIPTION: &str = "description";
pub const COLUMN_CATEGORY_NAME: &str = "category_name";
pub const COLUMN_CATEGORY_TYPE: &str = "category_type";

const REQUIRED_COLUMNS: [&str; 4] = [
    COLUMN_DATE,
    COLUMN_AMOUNT,
    COLUMN_CATEGORY_NAME,
    COLUMN_CATEGORY_TYPE,
];

struct ColumnMap {
    positions: HashMap<String, usize>,
}

impl ColumnMap {
    fn from_headers(headers: &StringRecord) -> Result<Self> {
        let positions: HashMap<String, usize> = headers
            .iter()
            .enumerate()
            .map(|(idx, name)| (name.trim().to_ascii_lowercase(), idx))
            .collect();

        if let Some(missing) = REQUIRED_COLUMNS
            .iter()
            .find(|column| !positions.contains_key(**column))
        {
            return Err(Error::Validation(ValidationError::MissingField(
                missing.to_string(),
            )));
        }
        Ok(Self { positions })
    }

    fn value(&self, record: &StringRecord, column: &str) -> String {
        self.positions
            .get(column)
            .and_then(|idx| record.get(*idx))
            .map(|v| v.trim().to_string())
            .unwrap_or_default()
    }
}

/// Parses an uploaded CSV into raw rows. Blank lines are skipped; short rows
/// yield empty values that row validation will reject. A record that is not
/// valid UTF-8 is kept as a malformed row so the rest of the file still imports.
pub fn parse_csv(content: &[u8]) -> Result<Vec<ImportRow>> {
    // Excel likes to prepend a UTF-8 BOM.
    let content = content.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(content);

    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(content);

    let headers = reader
        .headers()
        .map_err(|e| Error::invalid_input(format!("Unreadable CSV header: {}", e)))?
        .clone();
    if headers.iter().all(|h| h.trim().is_empty()) {
        return Err(Error::invalid_input("CSV file is empty"));
    }
    let columns = ColumnMap::from_headers(&headers)?;
    let header_line = headers.position().map(|p| p.line()).unwrap_or(1);

    let mut rows = Vec::new();
    let mut raw = ByteRecord::new();
    loop {
        let more = reader
            .read_byte_record(&mut raw)
            .map_err(|e| Error::invalid_input(format!("Malformed CSV content: {}", e)))?;
        if !more {
            break;
        }
        let row = raw
            .position()
            .map(|p| p.line().saturating_sub(header_line) as usize)
            .unwrap_or(rows.len() + 1);

        let record = match StringRecord::from_byte_record(raw.clone()) {
            Ok(record) => record,
            Err(e) => {
                rows.push(ImportRow {
                    row,
                    malformed: Some(format!("Row is not valid UTF-8: {}", e.utf8_error())),
                    ..Default::default()
                });
                continue;
            }
        };
        if record.iter().all(|v| v.trim().is_empty()) {
            continue;
        }
        rows.push(ImportRow {
            row,
            transaction_date: columns.value(&record, COLUMN_DATE),
            amount: columns.value(&record, COLUMN_AMOUNT),
            description: columns.value(&record, COLUMN_DESCRIPTION),
            category_name: columns.value(&record, COLUMN_CATEGORY_NAME),
            category_type: columns.value(&record, COLUMN_CATEGORY_TYPE),
            malformed: None,
        });
    }
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorKind;

    #[test]
    fn headers_match_regardless_of_case_and_order() {
        let csv = "Amount , CATEGORY_TYPE,transaction_date,Category_Name,description\n\
                   12.50,expense,2024-03-01,Food,Lunch\n";
        let rows = parse_csv(csv.as_bytes()).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].row, 1);
        assert_eq!(rows[0].amount, "12.50");
        assert_eq!(rows[0].category_type, "expense");
        assert_eq!(rows[0].transaction_date, "2024-03-01");
        assert_eq!(rows[0].description, "Lunch");
    }

    #[test]
    fn description_column_is_optional() {
        let csv = "transaction_date,amount,category_name,category_type\n2024-03-01,5,Food,EXPENSE\n";
        let rows = parse_csv(csv.as_bytes()).unwrap();
        assert_eq!(rows[0].description, "");
    }

    #[test]
    fn missing_required_column_is_rejected() {
        let csv = "transaction_date,amount,description\n2024-03-01,5,x\n";
        let err = parse_csv(csv.as_bytes()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert!(err.to_string().contains("category_name"));
    }

    #[test]
    fn blank_lines_are_skipped_and_short_rows_kept() {
        let csv = "\u{feff}transaction_date,amount,category_name,category_type\n\
                   2024-03-01,5,Food,EXPENSE\n\
                   ,,,\n\
                   2024-03-02,7\n";
        let rows = parse_csv(csv.as_bytes()).unwrap();
        assert_eq!(rows.len(), 2);
        // Row numbers follow the file, so the skipped line keeps its number.
        assert_eq!(rows[1].row, 3);
        assert_eq!(rows[1].category_name, "");
    }

    #[test]
    fn row_numbers_survive_empty_lines() {
        let csv = "transaction_date,amount,category_name,category_type
                   2024-03-01,5,Food,EXPENSE
                   
                   
                   2024-03-04,9,Food,EXPENSE
";
        let rows = parse_csv(csv.as_bytes()).unwrap();
        let numbers: Vec<usize> = rows.iter().map(|r| r.row).collect();
        assert_eq!(numbers, vec![1, 4]);
    }

    #[test]
    fn invalid_utf8_record_is_kept_as_a_malformed_row() {
        let mut csv = b"transaction_date,amount,category_name,category_type\n".to_vec();
        csv.extend_from_slice(b"2024-03-01,5,Caf\xE9,EXPENSE\n");
        csv.extend_from_slice(b"2024-03-02,7,Food,EXPENSE\n");

        let rows = parse_csv(&csv).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].row, 1);
        assert!(rows[0].malformed.as_deref().unwrap().contains("UTF-8"));
        assert_eq!(rows[1].row, 2);
        assert_eq!(rows[1].malformed, None);
        assert_eq!(rows[1].category_name, "Food");
    }

    #[test]
    fn empty_input_is_a_validation_error() {
        assert_eq!(parse_csv(b"").unwrap_err().kind(), ErrorKind::Validation);
    }
}
