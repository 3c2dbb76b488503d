//! In-memory row model shared by the CSV and XLSX sinks.

use crate::parser::RemarkParser;
use crate::types::{
    ParsedResult, ProcessingSummary, BANK_COLUMN, NAME_COLUMN, REMARKS_COLUMN,
    TRANSACTION_ID_COLUMN,
};
use tracing::{info, warn};

/// Header row plus data rows, all cells as text.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RemarkTable {
    /// Column headers, in file order.
    pub headers: Vec<String>,

    /// Data rows. Rows may be shorter than the header.
    pub rows: Vec<Vec<String>>,
}

impl RemarkTable {
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self { headers, rows }
    }

    /// Index of the `Transaction Remarks` column, ignoring surrounding
    /// whitespace and a leading byte-order mark.
    pub fn remark_column(&self) -> Option<usize> {
        self.column(REMARKS_COLUMN)
    }

    /// Fill `Name`, `Transaction ID` and `Bank` for every row.
    ///
    /// Existing columns with those headers are overwritten; otherwise they
    /// are appended. Rows whose remark cell is absent or empty get empty
    /// values; any other cell is parsed, so a whitespace-only remark comes
    /// back as `UNKNOWN`.
    pub fn augment(&mut self, parser: &RemarkParser) -> ProcessingSummary {
        let remark_column = self.remark_column();
        if remark_column.is_none() {
            warn!(column = REMARKS_COLUMN, "remark column not found, derived fields will be empty");
        }

        let targets = [NAME_COLUMN, TRANSACTION_ID_COLUMN, BANK_COLUMN]
            .map(|header| self.column_or_append(header));
        let width = self.headers.len();

        let mut summary = ProcessingSummary::default();
        for row in &mut self.rows {
            let remark = remark_column
                .and_then(|index| row.get(index))
                .filter(|cell| !cell.is_empty());

            let result = match remark {
                Some(raw) => {
                    let (dialect, result) = parser.parse_with_dialect(raw);
                    summary.record(Some((dialect, &result)));
                    result
                }
                None => {
                    summary.record(None);
                    ParsedResult::empty()
                }
            };

            if row.len() < width {
                row.resize(width, String::new());
            }
            for (index, value) in targets.iter().zip(result.columns()) {
                row[*index] = value.to_string();
            }
        }

        info!(%summary, "augmented table");
        summary
    }

    /// Indices of the `Name`, `Transaction ID` and `Bank` columns that are
    /// present in the header.
    pub fn derived_columns(&self) -> Vec<usize> {
        [NAME_COLUMN, TRANSACTION_ID_COLUMN, BANK_COLUMN]
            .iter()
            .filter_map(|header| self.column(header))
            .collect()
    }

    fn column(&self, header: &str) -> Option<usize> {
        self.headers
            .iter()
            .position(|h| h.trim_start_matches('\u{feff}').trim() == header)
    }

    fn column_or_append(&mut self, header: &str) -> usize {
        match self.column(header) {
            Some(index) => index,
            None => {
                self.headers.push(header.to_string());
                self.headers.len() - 1
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialect::Dialect;
    use crate::types::UNKNOWN;
    use pretty_assertions::assert_eq;

    fn strings(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|c| c.to_string()).collect()
    }

    #[test]
    fn test_blank_and_empty_cells_differ() {
        let mut table = RemarkTable::new(
            strings(&["Transaction Remarks"]),
            vec![strings(&[""]), strings(&["   \t "]), vec![]],
        );
        let summary = table.augment(&RemarkParser::default());

        assert_eq!(table.rows[0], strings(&["", "", "", ""]));
        assert_eq!(table.rows[1], strings(&["   \t ", UNKNOWN, UNKNOWN, UNKNOWN]));
        assert_eq!(table.rows[2], strings(&["", "", "", ""]));
        assert_eq!(summary.without_remark, 2);
        assert_eq!(summary.unknown, 1);
        assert_eq!(summary.count(Dialect::Unknown), 1);
    }

    #[test]
    fn test_remark_column_ignores_bom_and_padding() {
        let table = RemarkTable::new(strings(&["Date", "\u{feff} Transaction Remarks "]), vec![]);
        assert_eq!(table.remark_column(), Some(1));
    }
}
