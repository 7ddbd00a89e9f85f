//! Turns VLAN interface configuration text into [`VlanRecord`]s.
//!
//! The text is cut into blocks at every `interface ` line. Each field is then
//! looked up in the block by its own matcher; matchers do not share state and
//! the first (leftmost) match wins. A block without a `Vlan<digits>` name
//! produces no record at all.

use once_cell::sync::Lazy;
use regex::Regex;

use super::record::{Preempt, Status, VlanRecord};

/// Separator between interface blocks.
const BLOCK_DELIMITER: &str = "\ninterface ";

static VLAN_ID: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"Vlan(\d+)").expect("vlan id pattern is valid"));

static IP_ADDRESS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"ip address (\S+) (\S+)").expect("ip address pattern is valid"));

static STANDBY_IP: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"standby \d+ ip (\S+)").expect("standby ip pattern is valid"));

static STANDBY_PRIORITY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"standby \d+ priority (\d+)").expect("standby priority pattern is valid")
});

/// Parse configuration text into records, in the order the blocks appear.
///
/// Empty or VLAN-free input yields an empty vector. Repeated blocks for the
/// same interface each produce their own record.
pub fn parse_vlan_records(text: &str) -> Vec<VlanRecord> {
    split_blocks(text)
        .filter(|block| is_vlan_block(block))
        .filter_map(parse_block)
        .collect()
}

/// Split at each `interface` declaration; text before the first one is a block too.
fn split_blocks(text: &str) -> impl Iterator<Item = &str> {
    text.split(BLOCK_DELIMITER)
}

/// A block is a candidate if `Vlan` appears anywhere in it.
///
/// This covers blocks that begin with the interface name as well as ones
/// where the name sits mid-text because the source was not cleanly split.
fn is_vlan_block(block: &str) -> bool {
    block.starts_with("Vlan") || block.contains("Vlan")
}

/// Build a record from one block, or `None` if it has no VLAN number.
fn parse_block(block: &str) -> Option<VlanRecord> {
    let mut record = VlanRecord::new(vlan_id(block)?);

    if let Some((ip_address, subnet_mask)) = ip_address(block) {
        record = record.with_address(ip_address, subnet_mask);
    }
    if let Some(standby_ip) = first_capture(&STANDBY_IP, block) {
        record = record.with_standby_ip(standby_ip);
    }
    if let Some(priority) = first_capture(&STANDBY_PRIORITY, block) {
        record = record.with_priority(priority);
    }

    Some(record.with_preempt(preempt(block)).with_status(status(block)))
}

fn vlan_id(block: &str) -> Option<String> {
    first_capture(&VLAN_ID, block).map(|digits| format!("Vlan{digits}"))
}

fn ip_address(block: &str) -> Option<(&str, &str)> {
    let caps = IP_ADDRESS.captures(block)?;
    Some((caps.get(1)?.as_str(), caps.get(2)?.as_str()))
}

fn preempt(block: &str) -> Preempt {
    if block.contains("preempt") {
        Preempt::Yes
    } else {
        Preempt::No
    }
}

fn status(block: &str) -> Status {
    if block.contains("shutdown") {
        Status::Shutdown
    } else {
        Status::Active
    }
}

fn first_capture<'a>(pattern: &Regex, block: &'a str) -> Option<&'a str> {
    pattern
        .captures(block)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "interface Vlan10
 ip address 192.168.10.1 255.255.255.0
 standby 1 ip 192.168.10.254
 standby 1 priority 110
 standby 1 preempt
interface Vlan20
 shutdown
";

    #[test]
    fn test_two_block_example() {
        let records = parse_vlan_records(SAMPLE);
        assert_eq!(
            records,
            vec![
                VlanRecord::new("Vlan10")
                    .with_address("192.168.10.1", "255.255.255.0")
                    .with_standby_ip("192.168.10.254")
                    .with_priority("110")
                    .with_preempt(Preempt::Yes),
                VlanRecord::new("Vlan20").with_status(Status::Shutdown),
            ]
        );
    }

    #[test]
    fn test_empty_input() {
        assert!(parse_vlan_records("").is_empty());
        assert!(parse_vlan_records("\n\n").is_empty());
    }

    #[test]
    fn test_vlan_without_digits_is_dropped() {
        let text = "interface Vlan\n ip address 10.0.0.1 255.255.255.0\n standby 1 preempt\n";
        assert!(parse_vlan_records(text).is_empty());
    }

    #[test]
    fn test_address_without_standby() {
        let records = parse_vlan_records("interface Vlan5\n ip address 10.0.0.1 255.255.255.0\n");
        assert_eq!(records.len(), 1);
        let record = &records[0];
        assert_eq!(record.ip_address(), Some("10.0.0.1"));
        assert_eq!(record.subnet_mask(), Some("255.255.255.0"));
        assert_eq!(record.standby_ip(), None);
        assert_eq!(record.priority(), None);
    }

    #[test]
    fn test_default_flags() {
        let records = parse_vlan_records("interface Vlan7\n description users\n");
        assert_eq!(records[0].preempt(), Preempt::No);
        assert_eq!(records[0].status(), Status::Active);
    }

    #[test]
    fn test_source_order_is_kept() {
        let text = "interface Vlan20\n shutdown\ninterface Vlan10\n ip address 10.0.10.1 255.255.255.0\n";
        let ids: Vec<_> = parse_vlan_records(text)
            .iter()
            .map(|r| r.vlan_id().to_string())
            .collect();
        assert_eq!(ids, ["Vlan20", "Vlan10"]);
    }

    #[test]
    fn test_first_address_wins() {
        let text = "interface Vlan100
 ip address 10.1.0.1 255.255.255.0
 ip address 10.2.0.1 255.255.255.0 secondary
";
        let records = parse_vlan_records(text);
        assert_eq!(records[0].ip_address(), Some("10.1.0.1"));
        assert_eq!(records[0].subnet_mask(), Some("255.255.255.0"));
    }

    #[test]
    fn test_non_vlan_interfaces_are_skipped() {
        let text = "Building configuration...
interface GigabitEthernet1/0/1
 switchport access vlan 10
 shutdown
interface Vlan10
 ip address 10.0.10.1 255.255.255.0
interface Loopback0
 ip address 10.255.0.1 255.255.255.255
";
        let records = parse_vlan_records(text);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].vlan_id(), "Vlan10");
        assert_eq!(records[0].status(), Status::Active);
    }

    #[test]
    fn test_duplicate_blocks_are_not_merged() {
        let text = "interface Vlan10\n ip address 10.0.0.1 255.255.255.0\ninterface Vlan10\n shutdown\n";
        let records = parse_vlan_records(text);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].status(), Status::Active);
        assert_eq!(records[1].status(), Status::Shutdown);
        assert_eq!(records[1].ip_address(), None);
    }

    #[test]
    fn test_values_are_not_validated() {
        let text = "interface Vlan300\n ip address not-an-ip 999.0.0.0\n standby 4 priority 99999\n";
        let records = parse_vlan_records(text);
        assert_eq!(records[0].ip_address(), Some("not-an-ip"));
        assert_eq!(records[0].subnet_mask(), Some("999.0.0.0"));
        assert_eq!(records[0].priority(), Some("99999"));
    }

    #[test]
    fn test_crlf_line_endings() {
        let text = "interface Vlan40\r\n ip address 172.16.40.1 255.255.255.0\r\n standby 2 ip 172.16.40.254\r\n";
        let records = parse_vlan_records(text);
        assert_eq!(records[0].subnet_mask(), Some("255.255.255.0"));
        assert_eq!(records[0].standby_ip(), Some("172.16.40.254"));
    }

    #[test]
    fn test_filtered_lines_fold_into_blocks() {
        // What `| include` output looks like: only marker lines survive
        let text = "interface Vlan1\n no ip address\n shutdown\ninterface Vlan50\n ip address 10.50.0.2 255.255.255.0\n standby 50 ip 10.50.0.1\n";
        let records = parse_vlan_records(text);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].vlan_id(), "Vlan1");
        assert_eq!(records[0].ip_address(), None);
        assert_eq!(records[0].status(), Status::Shutdown);
        assert_eq!(records[1].standby_ip(), Some("10.50.0.1"));
    }
}
