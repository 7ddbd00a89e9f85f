//! Normalized VLAN interface record.

use std::fmt;

use serde::Serialize;

/// Whether HSRP/VRRP preemption is configured on the interface.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum Preempt {
    Yes,
    #[default]
    No,
}

/// Administrative state of the interface.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum Status {
    #[default]
    Active,
    Shutdown,
}

impl fmt::Display for Preempt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Preempt::Yes => "Yes",
            Preempt::No => "No",
        })
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Status::Active => "Active",
            Status::Shutdown => "Shutdown",
        })
    }
}

/// One VLAN interface as found in the device configuration.
///
/// Optional fields are `None` when the configuration has no matching line;
/// they are never filled with empty strings. Serialized field names are the
/// column names of the exported table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VlanRecord {
    #[serde(rename = "VLAN")]
    vlan_id: String,

    #[serde(rename = "IP_Address", skip_serializing_if = "Option::is_none")]
    ip_address: Option<String>,

    #[serde(rename = "Subnet_Mask", skip_serializing_if = "Option::is_none")]
    subnet_mask: Option<String>,

    #[serde(rename = "Standby_IP", skip_serializing_if = "Option::is_none")]
    standby_ip: Option<String>,

    #[serde(rename = "Priority", skip_serializing_if = "Option::is_none")]
    priority: Option<String>,

    #[serde(rename = "Preempt")]
    preempt: Preempt,

    #[serde(rename = "Status")]
    status: Status,
}

impl VlanRecord {
    /// Column names in export order.
    pub const COLUMNS: [&'static str; 7] = [
        "VLAN",
        "IP_Address",
        "Subnet_Mask",
        "Standby_IP",
        "Priority",
        "Preempt",
        "Status",
    ];

    /// A record with only the interface name set and default flags.
    pub fn new(vlan_id: impl Into<String>) -> Self {
        Self {
            vlan_id: vlan_id.into(),
            ip_address: None,
            subnet_mask: None,
            standby_ip: None,
            priority: None,
            preempt: Preempt::default(),
            status: Status::default(),
        }
    }

    /// Set the primary address; address and mask always travel together.
    pub fn with_address(mut self, ip_address: impl Into<String>, subnet_mask: impl Into<String>) -> Self {
        self.ip_address = Some(ip_address.into());
        self.subnet_mask = Some(subnet_mask.into());
        self
    }

    pub fn with_standby_ip(mut self, standby_ip: impl Into<String>) -> Self {
        self.standby_ip = Some(standby_ip.into());
        self
    }

    pub fn with_priority(mut self, priority: impl Into<String>) -> Self {
        self.priority = Some(priority.into());
        self
    }

    pub fn with_preempt(mut self, preempt: Preempt) -> Self {
        self.preempt = preempt;
        self
    }

    pub fn with_status(mut self, status: Status) -> Self {
        self.status = status;
        self
    }

    /// Interface name, e.g. `Vlan10`.
    pub fn vlan_id(&self) -> &str {
        &self.vlan_id
    }

    pub fn ip_address(&self) -> Option<&str> {
        self.ip_address.as_deref()
    }

    pub fn subnet_mask(&self) -> Option<&str> {
        self.subnet_mask.as_deref()
    }

    pub fn standby_ip(&self) -> Option<&str> {
        self.standby_ip.as_deref()
    }

    pub fn priority(&self) -> Option<&str> {
        self.priority.as_deref()
    }

    pub fn preempt(&self) -> Preempt {
        self.preempt
    }

    pub fn status(&self) -> Status {
        self.status
    }
}
