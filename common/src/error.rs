//! エラー型定義

use thiserror::Error;

/// 共通エラー型
#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid chunk size: {0} (must be at least 1)")]
    InvalidChunkSize(usize),

    #[error("Missing column '{column}' in {table}")]
    MissingColumn { table: String, column: String },

    #[error("Malformed row at line {line} in {table}: expected {expected} fields, found {found}")]
    MalformedRow {
        table: String,
        line: usize,
        expected: usize,
        found: usize,
    },
}

/// Result型エイリアス
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_missing_column() {
        let error = Error::MissingColumn {
            table: "catalog".to_string(),
            column: "Brand".to_string(),
        };
        assert_eq!(format!("{}", error), "Missing column 'Brand' in catalog");
    }

    #[test]
    fn test_error_display_malformed_row() {
        let error = Error::MalformedRow {
            table: "queries".to_string(),
            line: 7,
            expected: 4,
            found: 2,
        };
        let display = format!("{}", error);
        assert!(display.contains("line 7"));
        assert!(display.contains("expected 4"));
    }

    #[test]
    fn test_error_display_invalid_chunk_size() {
        assert_eq!(
            Error::InvalidChunkSize(0).to_string(),
            "Invalid chunk size: 0 (must be at least 1)"
        );
    }

    #[test]
    fn test_error_debug() {
        let error = Error::InvalidChunkSize(0);
        let debug = format!("{:?}", error);
        assert!(debug.contains("InvalidChunkSize"));
    }
}
