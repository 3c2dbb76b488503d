//! XLSX row source/sink for remark augmentation.

use crate::error::{Error, Result};
use crate::parser::RemarkParser;
use crate::table::RemarkTable;
use crate::types::ProcessingSummary;
use calamine::{Data, Reader, Xlsx};
use rust_xlsxwriter::Workbook;
use std::collections::BTreeSet;
use std::io::{Cursor, Read, Write};

/// Name of the worksheet written by [`XlsxRemarkTable::write_to`].
pub const OUTPUT_SHEET: &str = "Sheet1";

/// Rows of the first worksheet of a workbook.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct XlsxRemarkTable {
    pub table: RemarkTable,

    /// `(row, column)` of data cells that were numeric in the source sheet,
    /// so they are written back as numbers.
    numeric: BTreeSet<(usize, usize)>,
}

impl XlsxRemarkTable {
    /// Read the first worksheet. Its first row is the header; every cell
    /// is kept as display text.
    pub fn from_read<R: Read>(reader: &mut R) -> Result<Self> {
        let mut bytes = Vec::new();
        reader.read_to_end(&mut bytes)?;

        let mut workbook: Xlsx<_> = Xlsx::new(Cursor::new(bytes))?;
        let range = workbook
            .worksheet_range_at(0)
            .ok_or_else(|| Error::MissingField("worksheet".to_string()))??;

        let mut rows = range.rows();
        let headers = match rows.next() {
            Some(cells) => cells.iter().map(|cell| cell.to_string()).collect(),
            None => Vec::new(),
        };

        let mut numeric = BTreeSet::new();
        let mut data = Vec::new();
        for (row_index, cells) in rows.enumerate() {
            let mut row = Vec::with_capacity(cells.len());
            for (column, cell) in cells.iter().enumerate() {
                if matches!(cell, Data::Float(_) | Data::Int(_) | Data::DateTime(_)) {
                    numeric.insert((row_index, column));
                }
                row.push(cell.to_string());
            }
            while row.last().is_some_and(|cell| cell.is_empty()) {
                row.pop();
            }
            data.push(row);
        }

        Ok(Self {
            table: RemarkTable::new(headers, data),
            numeric,
        })
    }

    /// Fill the derived columns. See [`RemarkTable::augment`].
    pub fn augment(&mut self, parser: &RemarkParser) -> ProcessingSummary {
        let summary = self.table.augment(parser);
        // Derived columns are always text.
        let derived = self.table.derived_columns();
        self.numeric.retain(|(_, column)| !derived.contains(column));
        summary
    }

    /// Write a single `Sheet1` workbook. Empty cells are left blank.
    pub fn write_to<W: Write>(&self, writer: &mut W) -> Result<()> {
        let mut workbook = Workbook::new();
        let sheet = workbook.add_worksheet();
        sheet.set_name(OUTPUT_SHEET)?;

        for (column, header) in self.table.headers.iter().enumerate() {
            sheet.write_string(0, column as u16, header)?;
        }

        for (row_index, row) in self.table.rows.iter().enumerate() {
            let excel_row = row_index as u32 + 1;
            for (column, cell) in row.iter().enumerate() {
                if cell.is_empty() {
                    continue;
                }
                let number = self
                    .numeric
                    .contains(&(row_index, column))
                    .then(|| cell.parse::<f64>().ok())
                    .flatten();
                match number {
                    Some(number) => sheet.write_number(excel_row, column as u16, number)?,
                    None => sheet.write_string(excel_row, column as u16, cell)?,
                };
            }
        }

        writer.write_all(&workbook.save_to_buffer()?)?;
        Ok(())
    }
}
