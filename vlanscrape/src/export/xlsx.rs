//! Excel workbook output.

use std::path::Path;

use log::debug;
use rust_xlsxwriter::{Format, Workbook};

use super::{Exporter, cells, ensure_not_empty};
use crate::error::ExportError;
use crate::extract::VlanRecord;

/// Name of the single worksheet.
const SHEET_NAME: &str = "VLANs";

/// Writes records to a one-sheet `.xlsx` workbook with a bold header row.
///
/// Absent fields are left as blank cells.
#[derive(Debug, Clone, Copy, Default)]
pub struct XlsxExporter;

impl Exporter for XlsxExporter {
    fn export(&self, records: &[VlanRecord], destination: &Path) -> Result<(), ExportError> {
        ensure_not_empty(records)?;

        let mut workbook = Workbook::new();
        let header = Format::new().set_bold();
        let sheet = workbook.add_worksheet();
        sheet.set_name(SHEET_NAME)?;

        for (col, name) in (0..).zip(VlanRecord::COLUMNS) {
            sheet.write_string_with_format(0, col, name, &header)?;
        }

        for (row, record) in (1..).zip(records) {
            for (col, value) in (0..).zip(cells(record)) {
                if let Some(value) = value {
                    sheet.write_string(row, col, value.as_str())?;
                }
            }
        }
        sheet.autofit();

        workbook.save(destination)?;
        debug!("wrote {} rows to {}", records.len(), destination.display());
        Ok(())
    }
}
