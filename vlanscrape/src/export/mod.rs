//! Writing VLAN records to tabular files.
//!
//! Exporters refuse an empty record list with
//! [`ExportError::NothingToExport`] instead of writing a header-only file.

mod delimited;
mod json;
mod xlsx;

pub use delimited::CsvExporter;
pub use json::JsonExporter;
pub use xlsx::XlsxExporter;

use std::path::Path;

use crate::error::ExportError;
use crate::extract::VlanRecord;

/// Writes a sequence of records to a named destination.
pub trait Exporter {
    fn export(&self, records: &[VlanRecord], destination: &Path) -> Result<(), ExportError>;
}

fn ensure_not_empty(records: &[VlanRecord]) -> Result<(), ExportError> {
    if records.is_empty() {
        return Err(ExportError::NothingToExport);
    }
    Ok(())
}

/// Field values in [`VlanRecord::COLUMNS`] order, `None` where absent.
fn cells(record: &VlanRecord) -> [Option<String>; 7] {
    [
        Some(record.vlan_id().to_string()),
        record.ip_address().map(str::to_string),
        record.subnet_mask().map(str::to_string),
        record.standby_ip().map(str::to_string),
        record.priority().map(str::to_string),
        Some(record.preempt().to_string()),
        Some(record.status().to_string()),
    ]
}

/// One console line per record: `Vlan10: 192.168.10.1 - Active`.
pub fn summary_lines(records: &[VlanRecord]) -> Vec<String> {
    records
        .iter()
        .map(|r| {
            format!(
                "{}: {} - {}",
                r.vlan_id(),
                r.ip_address().unwrap_or("None"),
                r.status()
            )
        })
        .collect()
}
