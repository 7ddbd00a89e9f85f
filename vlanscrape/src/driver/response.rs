//! Response type for command execution results.

use std::time::Duration;

/// Output of one command run on the device shell.
#[derive(Debug, Clone)]
pub struct Response {
    /// The command that was executed.
    pub command: String,

    /// Normalized output: command echo and trailing prompt removed, `\n` line ends.
    pub result: String,

    /// The prompt that ended the output.
    pub prompt: String,

    /// Time taken to execute the command.
    pub elapsed: Duration,

    /// Failure marker found in the output, if the device rejected the command.
    pub failure_message: Option<String>,
}

impl Response {
    pub fn new(
        command: impl Into<String>,
        result: impl Into<String>,
        prompt: impl Into<String>,
        elapsed: Duration,
    ) -> Self {
        Self {
            command: command.into(),
            result: result.into(),
            prompt: prompt.into(),
            elapsed,
            failure_message: None,
        }
    }

    /// Mark the response as failed with the given marker.
    pub fn with_failure(mut self, failure_message: impl Into<String>) -> Self {
        self.failure_message = Some(failure_message.into());
        self
    }

    pub fn is_success(&self) -> bool {
        self.failure_message.is_none()
    }

    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.result.lines()
    }
}

impl std::fmt::Display for Response {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_and_failure() {
        let ok = Response::new(
            "show running-config interface vlan",
            "interface Vlan10\n shutdown",
            "core-sw1#",
            Duration::from_millis(250),
        );
        assert!(ok.is_success());
        assert_eq!(ok.lines().count(), 2);
        assert_eq!(ok.to_string(), "interface Vlan10\n shutdown");

        let rejected = Response::new("show running-config interface vlan", "", "core-sw1#", Duration::ZERO)
            .with_failure("% Invalid input");
        assert!(!rejected.is_success());
        assert_eq!(rejected.failure_message.as_deref(), Some("% Invalid input"));
    }
}
