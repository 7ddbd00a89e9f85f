//! CSV output.

use std::path::Path;

use log::debug;
use serde::Serialize;

use super::{Exporter, ensure_not_empty};
use crate::error::ExportError;
use crate::extract::VlanRecord;

/// Writes records as CSV with a header row.
///
/// Absent fields become empty cells.
#[derive(Debug, Clone, Copy, Default)]
pub struct CsvExporter;

/// Flat row with every column present, so all rows have the same width.
#[derive(Serialize)]
struct Row<'a> {
    #[serde(rename = "VLAN")]
    vlan_id: &'a str,
    #[serde(rename = "IP_Address")]
    ip_address: Option<&'a str>,
    #[serde(rename = "Subnet_Mask")]
    subnet_mask: Option<&'a str>,
    #[serde(rename = "Standby_IP")]
    standby_ip: Option<&'a str>,
    #[serde(rename = "Priority")]
    priority: Option<&'a str>,
    #[serde(rename = "Preempt")]
    preempt: String,
    #[serde(rename = "Status")]
    status: String,
}

impl<'a> From<&'a VlanRecord> for Row<'a> {
    fn from(record: &'a VlanRecord) -> Self {
        Self {
            vlan_id: record.vlan_id(),
            ip_address: record.ip_address(),
            subnet_mask: record.subnet_mask(),
            standby_ip: record.standby_ip(),
            priority: record.priority(),
            preempt: record.preempt().to_string(),
            status: record.status().to_string(),
        }
    }
}

impl Exporter for CsvExporter {
    fn export(&self, records: &[VlanRecord], destination: &Path) -> Result<(), ExportError> {
        ensure_not_empty(records)?;

        let mut writer = csv::Writer::from_path(destination)?;
        for record in records {
            writer.serialize(Row::from(record))?;
        }
        writer.flush()?;

        debug!("wrote {} rows to {}", records.len(), destination.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::{Preempt, Status};

    #[test]
    fn test_csv_layout() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("vlans.csv");
        let records = vec![
            VlanRecord::new("Vlan10")
                .with_address("192.168.10.1", "255.255.255.0")
                .with_standby_ip("192.168.10.254")
                .with_priority("110")
                .with_preempt(Preempt::Yes),
            VlanRecord::new("Vlan20").with_status(Status::Shutdown),
        ];

        CsvExporter.export(&records, &path).unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = written.lines().collect();
        assert_eq!(lines[0], VlanRecord::COLUMNS.join(","));
        assert_eq!(lines[1], "Vlan10,192.168.10.1,255.255.255.0,192.168.10.254,110,Yes,Active");
        assert_eq!(lines[2], "Vlan20,,,,,No,Shutdown");
        assert_eq!(lines.len(), 3);
    }

    #[test]
    fn test_empty_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("vlans.csv");

        let err = CsvExporter.export(&[], &path).unwrap_err();
        assert!(matches!(err, ExportError::NothingToExport));
        assert!(!path.exists());
    }
}
