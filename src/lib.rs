//! Transaction Remark Extractor Library
//!
//! Derives payer name, transaction identifier and issuing bank from the
//! free-text "Transaction Remarks" column of bank-statement exports.
//!
//! # Supported Dialects
//!
//! - **CMS**: `CMS/...` cash management collections
//! - **UPI**: `UPI/...` unified payments, including VPA handles
//! - **NEFT** / **RTGS**: `NEFT-<UTR>-<NAME>` and `RTGS-<UTR>-<NAME>`
//! - **CLG**: `CLG/<NAME>/<CHEQUE>/<BANK CODE>` cheque clearing
//! - **MMT**: `MMT/IMPS/<REF>/...` mobile transfers
//! - **BIL**: `BIL/INFT/<REF>/...` internet fund transfers
//!
//! Anything else yields `UNKNOWN` for all three fields; an empty remark
//! yields three empty strings.
//!
//! # Examples
//!
//! ## Parsing a single remark
//!
//! ```
//! use remark_extractor::RemarkParser;
//!
//! let parser = RemarkParser::default();
//! let result = parser.parse("UPI/123456789012/John Doe/Payment for goods/john@ybl");
//! assert_eq!(result.name, "John Doe");
//! assert_eq!(result.transaction_id, "UPI-123456789012");
//! assert_eq!(result.bank, "ICICI Bank");
//! ```
//!
//! ## Augmenting a CSV export
//!
//! [`xlsx_format::XlsxRemarkTable`] has the same shape for workbooks.
//!
//! ```no_run
//! use std::fs::File;
//! use remark_extractor::{csv_format::CsvRemarkTable, RemarkParser};
//!
//! let mut input = File::open("statement.csv")?;
//! let mut table = CsvRemarkTable::from_read(&mut input)?;
//! table.augment(&RemarkParser::default());
//!
//! let mut output = File::create("processed.csv")?;
//! table.write_to(&mut output)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod error;
pub mod types;
pub mod normalize;
pub mod bank;
pub mod config;
pub mod dialect;
mod extractors;
pub mod parser;
pub mod table;
pub mod csv_format;
pub mod xlsx_format;
pub mod logging;

use std::path::Path;
use std::str::FromStr;

// Re-export commonly used types
pub use bank::BankIdentifier;
pub use config::ParserConfig;
pub use dialect::Dialect;
pub use error::{Error, Result};
pub use parser::RemarkParser;
pub use types::{ParsedResult, ProcessingSummary, UNKNOWN};

/// Tabular file formats accepted by the tools.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// Comma-separated values
    Csv,
    /// Excel workbook; the first sheet is read, `Sheet1` is written
    Xlsx,
}

impl FromStr for Format {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim_start_matches('.').to_lowercase().as_str() {
            "csv" => Ok(Format::Csv),
            "xlsx" | "excel" => Ok(Format::Xlsx),
            _ => Err(Error::InvalidFormat(s.to_string())),
        }
    }
}

impl Format {
    /// Detect the format from a file extension.
    pub fn from_path(path: &Path) -> Result<Self> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .ok_or_else(|| Error::InvalidFormat(path.display().to_string()))?
            .parse()
    }

    /// Get file extension for this format.
    pub fn extension(&self) -> &'static str {
        match self {
            Format::Csv => "csv",
            Format::Xlsx => "xlsx",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_from_str() {
        assert_eq!("csv".parse::<Format>().unwrap(), Format::Csv);
        assert_eq!("CSV".parse::<Format>().unwrap(), Format::Csv);
        assert_eq!(".xlsx".parse::<Format>().unwrap(), Format::Xlsx);
        assert!("pdf".parse::<Format>().is_err());
    }

    #[test]
    fn test_format_from_path() {
        assert_eq!(Format::from_path(Path::new("in/statement.CSV")).unwrap(), Format::Csv);
        assert_eq!(Format::from_path(Path::new("book.xlsx")).unwrap(), Format::Xlsx);
        assert!(Format::from_path(Path::new("noext")).is_err());
    }

    #[test]
    fn test_format_extension() {
        assert_eq!(Format::Csv.extension(), "csv");
        assert_eq!(Format::Xlsx.extension(), "xlsx");
    }
}
