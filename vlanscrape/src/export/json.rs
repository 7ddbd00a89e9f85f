//! JSON output.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use log::debug;

use super::{Exporter, ensure_not_empty};
use crate::error::ExportError;
use crate::extract::VlanRecord;

/// Writes records as a pretty-printed JSON array.
///
/// Absent fields are left out of each object rather than written as `null`.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonExporter;

impl Exporter for JsonExporter {
    fn export(&self, records: &[VlanRecord], destination: &Path) -> Result<(), ExportError> {
        ensure_not_empty(records)?;

        let mut writer = BufWriter::new(File::create(destination)?);
        serde_json::to_writer_pretty(&mut writer, records)?;
        writer.write_all(b"\n")?;
        writer.flush()?;

        debug!("wrote {} records to {}", records.len(), destination.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::Status;

    #[test]
    fn test_json_array_without_nulls() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("vlans.json");
        let records = vec![
            VlanRecord::new("Vlan10").with_address("10.0.10.1", "255.255.255.0"),
            VlanRecord::new("Vlan20").with_status(Status::Shutdown),
        ];

        JsonExporter.export(&records, &path).unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert!(!written.contains("null"));
        let parsed: serde_json::Value = serde_json::from_str(&written).unwrap();
        let rows = parsed.as_array().unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0]["IP_Address"], "10.0.10.1");
        assert!(rows[1].get("IP_Address").is_none());
        assert_eq!(rows[1]["Status"], "Shutdown");
    }

    #[test]
    fn test_empty_is_refused() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("vlans.json");
        assert!(matches!(
            JsonExporter.export(&[], &path),
            Err(ExportError::NothingToExport)
        ));
        assert!(!path.exists());
    }
}
