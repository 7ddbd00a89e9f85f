//! VLAN extraction pipeline.
//!
//! [`AcquisitionStrategy`] gets configuration text off the device, falling
//! back through progressively broader commands; [`parse_vlan_records`] turns
//! that text into [`VlanRecord`]s. [`extract_vlans`] runs both.

mod acquisition;
mod parser;
mod record;
mod session;

pub use acquisition::{
    Acquired, AcquisitionStrategy, FULL_CONFIG_TIMEOUT, LineFilter, SCOPED_TIMEOUT, Tier,
    VLAN_LINE_MARKERS,
};
pub use parser::parse_vlan_records;
pub use record::{Preempt, Status, VlanRecord};
pub use session::DeviceSession;

use log::info;

use crate::error::AcquisitionExhausted;

/// Outcome of one extraction run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extraction {
    /// Name of the acquisition tier whose output was parsed.
    pub tier: String,

    /// Records in the order their blocks appeared.
    pub records: Vec<VlanRecord>,
}

impl Extraction {
    /// True when configuration was retrieved but held no VLAN interfaces.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }
}

/// Retrieve VLAN interface configuration from `session` and parse it.
///
/// `Err` means no tier produced any text. `Ok` with no records means the
/// device answered but has no VLAN interfaces configured.
pub async fn extract_vlans<S: DeviceSession>(
    session: &mut S,
    strategy: &AcquisitionStrategy,
) -> Result<Extraction, AcquisitionExhausted> {
    let acquired = strategy.acquire(session).await?;
    let records = parse_vlan_records(&acquired.text);
    info!(
        "parsed {} VLAN interface(s) from tier '{}'",
        records.len(),
        acquired.tier
    );

    Ok(Extraction {
        tier: acquired.tier,
        records,
    })
}
