//! Cisco IOS / IOS-XE platform definition.
//!
//! Only the read-side privilege levels are modelled:
//! - `exec` - User EXEC mode with `>` prompt
//! - `privilege_exec` - Privileged EXEC mode with `#` prompt
//!
//! # Prompt Examples
//!
//! ```text
//! core-sw1>                 # exec mode
//! core-sw1#                 # privilege_exec mode
//! core-sw1(config)#         # configuration mode, never entered
//! ```
//!
//! `show running-config` needs `privilege_exec`; accounts that land in
//! `exec` have to escalate with `enable`.

use std::sync::Arc;

use crate::platform::{DefaultBehavior, PlatformDefinition, PrivilegeLevel};

/// Name the platform is registered under.
pub const NAME: &str = "cisco_ios";

/// Create the Cisco IOS platform definition.
pub fn platform() -> PlatformDefinition {
    let exec = PrivilegeLevel::new("exec", r"(?mi)^[\w.\-@()/: ]{1,63}>\s?$")
        .expect("exec prompt pattern is valid");

    let privilege_exec = PrivilegeLevel::new("privilege_exec", r"(?mi)^[\w.\-@/: ]{1,63}#\s?$")
        .expect("privilege_exec prompt pattern is valid")
        .with_parent("exec")
        .with_escalate("enable")
        .with_auth(r"(?mi)^password:\s?$")
        .expect("enable password pattern is valid")
        .with_not_contains("(config");

    PlatformDefinition::new(NAME)
        .with_privilege(exec)
        .with_privilege(privilege_exec)
        .with_default_privilege("privilege_exec")
        .with_failure_pattern("% Ambiguous command")
        .with_failure_pattern("% Incomplete command")
        .with_failure_pattern("% Invalid input")
        .with_failure_pattern("% Unknown command")
        .with_failure_pattern("% Error")
        .with_on_open_command("terminal length 0")
        .with_on_open_command("terminal width 511")
        .with_terminal_size(511, 24)
        .with_behavior(Arc::new(DefaultBehavior))
}
