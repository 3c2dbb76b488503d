//! Common types shared by the parser and the row sinks.

use crate::dialect::Dialect;
use std::collections::BTreeMap;
use std::fmt;

/// Sentinel for a field that could not be determined.
pub const UNKNOWN: &str = "UNKNOWN";

/// Header of the column holding the free-text remark.
pub const REMARKS_COLUMN: &str = "Transaction Remarks";

/// Header of the derived payer-name column.
pub const NAME_COLUMN: &str = "Name";

/// Header of the derived transaction-identifier column.
pub const TRANSACTION_ID_COLUMN: &str = "Transaction ID";

/// Header of the derived bank column.
pub const BANK_COLUMN: &str = "Bank";

/// Fields derived from one transaction remark.
///
/// Every field is either a determined value or [`UNKNOWN`]. All three are
/// empty strings only when no remark was supplied at all.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedResult {
    /// Payer name.
    pub name: String,

    /// Dialect-prefixed identifier, e.g. `UPI-123456789012`.
    pub transaction_id: String,

    /// Display name of the issuing bank.
    pub bank: String,
}

impl ParsedResult {
    /// Create a result from its three fields.
    pub fn new(
        name: impl Into<String>,
        transaction_id: impl Into<String>,
        bank: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            transaction_id: transaction_id.into(),
            bank: bank.into(),
        }
    }

    /// Result for a remark that was supplied but matched no dialect.
    pub fn unknown() -> Self {
        Self::new(UNKNOWN, UNKNOWN, UNKNOWN)
    }

    /// Result for a row with no remark.
    pub fn empty() -> Self {
        Self::new("", "", "")
    }

    /// True when no remark was supplied.
    pub fn is_empty(&self) -> bool {
        self.name.is_empty() && self.transaction_id.is_empty() && self.bank.is_empty()
    }

    /// True when nothing could be determined from a supplied remark.
    pub fn is_unknown(&self) -> bool {
        self.name == UNKNOWN && self.transaction_id == UNKNOWN && self.bank == UNKNOWN
    }

    /// Fields in output column order: `Name`, `Transaction ID`, `Bank`.
    pub fn columns(&self) -> [&str; 3] {
        [&self.name, &self.transaction_id, &self.bank]
    }
}

/// Counts gathered while augmenting a table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessingSummary {
    /// Data rows processed.
    pub rows: usize,

    /// Rows with an absent or blank remark.
    pub without_remark: usize,

    /// Rows where name, identifier and bank were all `UNKNOWN`.
    pub unknown: usize,

    /// Rows handled by each dialect.
    pub by_dialect: BTreeMap<Dialect, usize>,
}

impl ProcessingSummary {
    /// Record one row; `None` means the row had no remark.
    pub fn record(&mut self, outcome: Option<(Dialect, &ParsedResult)>) {
        self.rows += 1;
        match outcome {
            Some((dialect, result)) => {
                *self.by_dialect.entry(dialect).or_insert(0) += 1;
                if result.is_unknown() {
                    self.unknown += 1;
                }
            }
            None => self.without_remark += 1,
        }
    }

    /// Rows handled by `dialect`.
    pub fn count(&self, dialect: Dialect) -> usize {
        self.by_dialect.get(&dialect).copied().unwrap_or(0)
    }
}

impl fmt::Display for ProcessingSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} rows ({} without remark, {} unknown)",
            self.rows, self.without_remark, self.unknown
        )?;
        for (dialect, count) in &self.by_dialect {
            write!(f, ", {}={}", dialect, count)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_and_empty_are_distinct() {
        assert!(ParsedResult::unknown().is_unknown());
        assert!(!ParsedResult::unknown().is_empty());
        assert!(ParsedResult::empty().is_empty());
        assert!(!ParsedResult::empty().is_unknown());
    }

    #[test]
    fn test_summary_record() {
        let mut summary = ProcessingSummary::default();
        summary.record(Some((Dialect::Upi, &ParsedResult::new("A", "UPI-1", UNKNOWN))));
        summary.record(Some((Dialect::Unknown, &ParsedResult::unknown())));
        summary.record(None);

        assert_eq!(summary.rows, 3);
        assert_eq!(summary.without_remark, 1);
        assert_eq!(summary.unknown, 1);
        assert_eq!(summary.count(Dialect::Upi), 1);
        assert_eq!(summary.count(Dialect::Neft), 0);
        assert_eq!(
            summary.to_string(),
            "3 rows (1 without remark, 1 unknown), UPI=1, UNKNOWN=1"
        );
    }

    #[test]
    fn test_columns_order() {
        let result = ParsedResult::new("A", "B", "C");
        assert_eq!(result.columns(), ["A", "B", "C"]);
    }
}
