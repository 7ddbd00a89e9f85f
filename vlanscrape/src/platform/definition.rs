//! Platform definition for device-specific configuration.

use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;

use super::VendorBehavior;
use super::privilege_level::PrivilegeLevel;
use crate::error::PlatformError;

/// Everything the driver needs to know about a device family.
#[derive(Clone)]
pub struct PlatformDefinition {
    /// Platform name (e.g., "cisco_ios").
    pub name: String,

    /// Privilege levels, in prompt-matching order.
    pub privilege_levels: IndexMap<String, PrivilegeLevel>,

    /// Privilege level commands should run at.
    pub default_privilege: String,

    /// Output substrings that mark a command as rejected.
    pub failed_when_contains: Vec<String>,

    /// Commands to run once the shell is up.
    pub on_open_commands: Vec<String>,

    /// Terminal width for the PTY.
    pub terminal_width: u32,

    /// Terminal height for the PTY.
    pub terminal_height: u32,

    /// Optional output-handling hooks.
    pub behavior: Option<Arc<dyn VendorBehavior>>,
}

impl PlatformDefinition {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            privilege_levels: IndexMap::new(),
            default_privilege: String::new(),
            failed_when_contains: vec![],
            on_open_commands: vec![],
            terminal_width: 511,
            terminal_height: 24,
            behavior: None,
        }
    }

    pub fn with_privilege(mut self, level: PrivilegeLevel) -> Self {
        self.privilege_levels.insert(level.name.clone(), level);
        self
    }

    pub fn with_default_privilege(mut self, name: impl Into<String>) -> Self {
        self.default_privilege = name.into();
        self
    }

    pub fn with_failure_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.failed_when_contains.push(pattern.into());
        self
    }

    pub fn with_on_open_command(mut self, command: impl Into<String>) -> Self {
        self.on_open_commands.push(command.into());
        self
    }

    pub fn with_terminal_size(mut self, width: u32, height: u32) -> Self {
        self.terminal_width = width;
        self.terminal_height = height;
        self
    }

    pub fn with_behavior(mut self, behavior: Arc<dyn VendorBehavior>) -> Self {
        self.behavior = Some(behavior);
        self
    }

    /// First failure marker found in `output`, if any.
    pub fn failure_in(&self, output: &str) -> Option<&str> {
        self.failed_when_contains
            .iter()
            .find(|marker| output.contains(marker.as_str()))
            .map(String::as_str)
    }

    /// Check that the privilege graph is usable: at least one level, a
    /// known default level, and parents that exist.
    pub fn validate(&self) -> Result<(), PlatformError> {
        let invalid = |message: String| PlatformError::InvalidDefinition { message };

        if self.privilege_levels.is_empty() {
            return Err(invalid(format!("{} defines no privilege levels", self.name)));
        }
        if !self.default_privilege.is_empty()
            && !self.privilege_levels.contains_key(&self.default_privilege)
        {
            return Err(invalid(format!(
                "default privilege '{}' is not defined",
                self.default_privilege
            )));
        }
        for level in self.privilege_levels.values() {
            if let Some(parent) = &level.previous_priv {
                if !self.privilege_levels.contains_key(parent) {
                    return Err(invalid(format!(
                        "level '{}' names unknown parent '{}'",
                        level.name, parent
                    )));
                }
            }
        }
        Ok(())
    }
}

impl fmt::Debug for PlatformDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PlatformDefinition")
            .field("name", &self.name)
            .field("privilege_levels", &self.privilege_levels)
            .field("default_privilege", &self.default_privilege)
            .field("failed_when_contains", &self.failed_when_contains)
            .field("on_open_commands", &self.on_open_commands)
            .field("terminal_width", &self.terminal_width)
            .field("terminal_height", &self.terminal_height)
            .field(
                "behavior",
                &self.behavior.as_ref().map(|_| "<VendorBehavior>"),
            )
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failure_in_returns_first_marker() {
        let platform = PlatformDefinition::new("test")
            .with_failure_pattern("% Invalid input")
            .with_failure_pattern("% Error");

        assert_eq!(
            platform.failure_in("          ^\n% Invalid input detected at '^' marker."),
            Some("% Invalid input")
        );
        assert_eq!(platform.failure_in("interface Vlan10\n shutdown"), None);
    }

    #[test]
    fn test_validate() {
        assert!(PlatformDefinition::new("empty").validate().is_err());

        let root = PrivilegeLevel::new("exec", r">$").unwrap();
        let orphan = PrivilegeLevel::new("enabled", r"#$").unwrap().with_parent("missing");
        let platform = PlatformDefinition::new("test")
            .with_privilege(root.clone())
            .with_privilege(orphan);
        assert!(platform.validate().is_err());

        let platform = PlatformDefinition::new("test")
            .with_privilege(root.clone())
            .with_default_privilege("nope");
        assert!(platform.validate().is_err());

        let platform = PlatformDefinition::new("test")
            .with_privilege(root)
            .with_default_privilege("exec");
        assert!(platform.validate().is_ok());
    }

    #[test]
    fn test_debug_hides_behavior() {
        let platform = PlatformDefinition::new("test")
            .with_behavior(Arc::new(super::super::DefaultBehavior));
        assert!(format!("{platform:?}").contains("<VendorBehavior>"));
    }
}
