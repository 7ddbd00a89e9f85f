//! # vlanscrape
//!
//! Pull VLAN interface configuration off Cisco IOS switches over SSH and
//! turn it into flat records.
//!
//! ## Features
//!
//! - Async SSH sessions via russh, with prompt detection on a tail-searched buffer
//! - `enable` escalation through the platform's privilege graph
//! - Three-step fallback for reading the config when a command is refused or times out
//! - Tolerant parser: missing fields stay empty instead of failing the run
//! - Excel, CSV and JSON export
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use vlanscrape::{AcquisitionStrategy, Driver, DriverBuilder, extract_vlans};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut driver = DriverBuilder::new("192.168.1.1")
//!         .username("admin")
//!         .password("secret")
//!         .build()?;
//!
//!     driver.open().await?;
//!     let extraction = extract_vlans(&mut driver, &AcquisitionStrategy::default()).await;
//!     driver.close().await?;
//!
//!     for record in extraction?.records {
//!         println!("{}: {:?}", record.vlan_id(), record.ip_address());
//!     }
//!     Ok(())
//! }
//! ```

pub mod channel;
pub mod driver;
pub mod error;
pub mod export;
pub mod extract;
pub mod platform;
pub mod transport;

pub use driver::{Driver, DriverBuilder, GenericDriver, Response};
pub use error::{AcquisitionExhausted, CommandError, Error, ExportError};
pub use export::{CsvExporter, Exporter, JsonExporter, XlsxExporter, summary_lines};
pub use extract::{
    AcquisitionStrategy, DeviceSession, Extraction, Preempt, Status, Tier, VlanRecord,
    extract_vlans, parse_vlan_records,
};
pub use platform::{PlatformDefinition, PrivilegeLevel};
pub use transport::{AuthMethod, HostKeyVerification, SshConfig};
