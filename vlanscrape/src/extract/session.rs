//! The remote-session seam the acquisition ladder runs commands through.

use std::future::Future;
use std::time::Duration;

use log::debug;

use crate::driver::{Driver, GenericDriver, Response};
use crate::error::CommandError;

/// A shell on a device that can run one command at a time.
pub trait DeviceSession: Send {
    /// Run `command` and return its output, or fail within `timeout`.
    ///
    /// Output the device flags as an error (bad syntax, unsupported command)
    /// is a [`CommandError::Rejected`], not text.
    fn run_command(
        &mut self,
        command: &str,
        timeout: Duration,
    ) -> impl Future<Output = Result<String, CommandError>> + Send;

    /// End the session.
    fn disconnect(&mut self) -> impl Future<Output = Result<(), CommandError>> + Send;
}

impl DeviceSession for GenericDriver {
    async fn run_command(&mut self, command: &str, timeout: Duration) -> Result<String, CommandError> {
        let response = self.send_command_with_timeout(command, timeout).await?;
        into_output(command, response)
    }

    async fn disconnect(&mut self) -> Result<(), CommandError> {
        Ok(self.close().await?)
    }
}

/// The output of a response, or `Rejected` if the device flagged the command.
fn into_output(command: &str, response: Response) -> Result<String, CommandError> {
    match response.failure_message {
        Some(message) => {
            debug!("'{}' rejected by device: {}", command, message);
            Err(CommandError::Rejected {
                command: command.to_string(),
                message,
            })
        }
        None => Ok(response.result),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const COMMAND: &str = "show running-config interface vlan";

    #[test]
    fn test_rejected_response_fails_the_command() {
        let response = Response::new(
            COMMAND,
            "              ^\n% Invalid input detected at '^' marker.",
            "core-sw1#",
            Duration::from_millis(40),
        )
        .with_failure("% Invalid input");

        match into_output(COMMAND, response) {
            Err(CommandError::Rejected { command, message }) => {
                assert_eq!(command, COMMAND);
                assert_eq!(message, "% Invalid input");
            }
            other => panic!("expected rejection, got {other:?}"),
        }
    }

    #[test]
    fn test_successful_response_yields_output() {
        let response = Response::new(
            COMMAND,
            "interface Vlan10\n ip address 10.0.10.1 255.255.255.0",
            "core-sw1#",
            Duration::from_millis(40),
        );

        assert_eq!(
            into_output(COMMAND, response).unwrap(),
            "interface Vlan10\n ip address 10.0.10.1 255.255.255.0"
        );
    }

    #[test]
    fn test_empty_output_is_not_a_rejection() {
        let response = Response::new(COMMAND, "", "core-sw1#", Duration::ZERO);
        assert_eq!(into_output(COMMAND, response).unwrap(), "");
    }
}
