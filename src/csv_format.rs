//! CSV row source and sink.
//!
//! Reads a bank-statement export, derives `Name`, `Transaction ID` and
//! `Bank` from each row's `Transaction Remarks` cell, and writes the table
//! back with those columns filled in.

use crate::error::Result;
use crate::parser::RemarkParser;
use crate::table::RemarkTable;
use crate::types::ProcessingSummary;
use csv::{ReaderBuilder, WriterBuilder};
use std::io::{Read, Write};

/// A headed CSV export.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CsvRemarkTable {
    /// The underlying rows.
    pub table: RemarkTable,
}

impl CsvRemarkTable {
    /// Read a CSV export with a header row.
    ///
    /// Rows may have fewer or more fields than the header. Headers are kept
    /// verbatim; the remark column is found later by trimmed name, so a
    /// padded or BOM-prefixed `Transaction Remarks` header still matches.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use std::fs::File;
    /// use remark_extractor::csv_format::CsvRemarkTable;
    ///
    /// let mut file = File::open("statement.csv")?;
    /// let csv = CsvRemarkTable::from_read(&mut file)?;
    /// println!("{} rows", csv.table.rows.len());
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn from_read<R: Read>(reader: &mut R) -> Result<Self> {
        let mut csv_reader = ReaderBuilder::new().flexible(true).from_reader(reader);

        let headers = csv_reader
            .headers()?
            .iter()
            .map(|h| h.to_string())
            .collect();

        let mut rows = Vec::new();
        for result in csv_reader.records() {
            let record = result?;
            rows.push(record.iter().map(|field| field.to_string()).collect());
        }

        Ok(CsvRemarkTable {
            table: RemarkTable::new(headers, rows),
        })
    }

    /// Write the header and rows back out, quoting only where CSV needs it.
    pub fn write_to<W: Write>(&self, writer: &mut W) -> Result<()> {
        let mut csv_writer = WriterBuilder::new().flexible(true).from_writer(writer);

        csv_writer.write_record(&self.table.headers)?;
        for row in &self.table.rows {
            csv_writer.write_record(row)?;
        }

        csv_writer.flush()?;
        Ok(())
    }

    /// Fill the derived columns; see [`RemarkTable::augment`].
    pub fn augment(&mut self, parser: &RemarkParser) -> ProcessingSummary {
        self.table.augment(parser)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialect::Dialect;
    use pretty_assertions::assert_eq;

    fn augment(input: &str) -> (String, ProcessingSummary) {
        let mut table = CsvRemarkTable::from_read(&mut input.as_bytes()).unwrap();
        let summary = table.augment(&RemarkParser::default());
        let mut out = Vec::new();
        table.write_to(&mut out).unwrap();
        (String::from_utf8(out).unwrap(), summary)
    }

    #[test]
    fn test_appends_derived_columns() {
        let input = "\
Date,Transaction Remarks,Amount
01/04/2024,UPI/123456789012/John Doe/Payment for goods/john@ybl,500
02/04/2024,,20
03/04/2024,CLG/RAMESH KUMAR/123456/HDF,1000
";
        let (output, summary) = augment(input);

        assert_eq!(
            output,
            "\
Date,Transaction Remarks,Amount,Name,Transaction ID,Bank
01/04/2024,UPI/123456789012/John Doe/Payment for goods/john@ybl,500,John Doe,UPI-123456789012,ICICI Bank
02/04/2024,,20,,,
03/04/2024,CLG/RAMESH KUMAR/123456/HDF,1000,RAMESH KUMAR,CLG-123456,HDFC Bank
"
        );
        assert_eq!(summary.rows, 3);
        assert_eq!(summary.without_remark, 1);
        assert_eq!(summary.count(Dialect::Upi), 1);
        assert_eq!(summary.count(Dialect::Clg), 1);
    }

    #[test]
    fn test_overwrites_existing_columns_and_pads_short_rows() {
        let input = " Transaction Remarks,Bank,Name\nCMS/REF_12345/OTHERDATA,old,old\nMISC ENTRY\n";
        let (output, summary) = augment(input);

        assert_eq!(
            output,
            " Transaction Remarks,Bank,Name,Transaction ID\n\
             CMS/REF_12345/OTHERDATA,UNKNOWN,UNKNOWN,CMS-REF_12345\n\
             MISC ENTRY,UNKNOWN,UNKNOWN,UNKNOWN\n"
        );
        assert_eq!(summary.unknown, 1);
    }

    #[test]
    fn test_missing_remark_column() {
        let input = "Date,Amount\n01/04/2024,5\n";
        let (output, summary) = augment(input);

        assert_eq!(output, "Date,Amount,Name,Transaction ID,Bank\n01/04/2024,5,,,\n");
        assert_eq!(summary.without_remark, 1);
    }

    #[test]
    fn test_whitespace_only_remark_is_unknown() {
        let input = "Transaction Remarks,Amount\n\"   \",5\n,6\n";
        let mut csv = CsvRemarkTable::from_read(&mut input.as_bytes()).unwrap();
        let summary = csv.augment(&RemarkParser::default());

        assert_eq!(csv.table.rows[0], vec!["   ", "5", "UNKNOWN", "UNKNOWN", "UNKNOWN"]);
        assert_eq!(csv.table.rows[1], vec!["", "6", "", "", ""]);
        assert_eq!(summary.without_remark, 1);
        assert_eq!(summary.unknown, 1);
    }

    #[test]
    fn test_quoted_remarks_survive() {
        let input = "Transaction Remarks\n\"MMT/IMPS/123456789012/SBI/SURESH, PATEL\"\n";
        let (output, _) = augment(input);

        assert_eq!(
            output,
            "Transaction Remarks,Name,Transaction ID,Bank\n\
             \"MMT/IMPS/123456789012/SBI/SURESH, PATEL\",\"SURESH, PATEL\",IMPS-123456789012,UNKNOWN\n"
        );
    }
}
