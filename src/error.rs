//! Error types for the remark extractor library.

use std::io;
use thiserror::Error;

/// Result type alias for library operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while configuring the parser or moving rows
/// in and out of files.
///
/// Remark parsing itself never fails; unparseable remarks degrade to the
/// `UNKNOWN` sentinel instead.
#[derive(Debug, Error)]
pub enum Error {
    /// I/O error occurred during read or write operations.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Error reading or writing CSV.
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    /// Error reading or writing an XLSX workbook.
    #[error("XLSX error: {0}")]
    XlsxError(String),

    /// A bank pattern failed to compile.
    #[error("Invalid pattern for bank '{bank}': {source}")]
    InvalidPattern {
        bank: String,
        #[source]
        source: regex::Error,
    },

    /// A BIL carrier code is not three uppercase ASCII letters.
    #[error("Invalid carrier code: {0}")]
    InvalidCarrierCode(String),

    /// Missing required field.
    #[error("Missing required field: {0}")]
    MissingField(String),

    /// Invalid format specified.
    #[error("Invalid format: {0}")]
    InvalidFormat(String),

}

impl From<calamine::XlsxError> for Error {
    fn from(err: calamine::XlsxError) -> Self {
        Error::XlsxError(err.to_string())
    }
}

impl From<rust_xlsxwriter::XlsxError> for Error {
    fn from(err: rust_xlsxwriter::XlsxError) -> Self {
        Error::XlsxError(err.to_string())
    }
}
