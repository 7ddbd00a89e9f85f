//! Platform definitions: prompts, privilege levels and device quirks.

pub mod cisco_ios;
mod definition;
mod privilege_level;

pub use definition::PlatformDefinition;
pub use privilege_level::PrivilegeLevel;

/// Hooks for device-specific output handling.
pub trait VendorBehavior: Send + Sync {
    /// Strip the command echo and trailing prompt from raw shell output.
    fn normalize_output(&self, raw: &str, command: &str) -> String;

    /// Return a failure message if the output signals a rejected command.
    fn detect_failure(&self, output: &str) -> Option<String>;
}

/// Behavior shared by line-oriented CLIs that echo the command back.
pub struct DefaultBehavior;

impl VendorBehavior for DefaultBehavior {
    fn normalize_output(&self, raw: &str, command: &str) -> String {
        let unified = raw.replace("\r\n", "\n");

        // The echo is usually the first line; the prompt is the last one
        let output = match unified.split_once('\n') {
            Some((first, rest)) if first.trim_end().ends_with(command.trim()) => rest,
            _ => unified.as_str(),
        };

        match output.rfind('\n') {
            Some(pos) => output[..pos].to_string(),
            None => String::new(),
        }
    }

    fn detect_failure(&self, _output: &str) -> Option<String> {
        None
    }
}
