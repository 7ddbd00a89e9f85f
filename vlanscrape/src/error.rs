//! Error types for vlanscrape.

use std::io;
use std::time::Duration;

use thiserror::Error;

/// Main error type for session and driver operations.
#[derive(Error, Debug)]
pub enum Error {
    /// SSH transport-level errors
    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    /// Channel operation errors
    #[error("Channel error: {0}")]
    Channel(#[from] ChannelError),

    /// Driver-level errors
    #[error("Driver error: {0}")]
    Driver(#[from] DriverError),

    /// Platform definition errors
    #[error("Platform error: {0}")]
    Platform(#[from] PlatformError),
}

/// Transport layer errors (SSH connection, authentication).
#[derive(Error, Debug)]
pub enum TransportError {
    /// SSH handshake or protocol error
    #[error("SSH error: {0}")]
    Ssh(#[from] russh::Error),

    /// Authentication failed
    #[error("Authentication failed for user '{user}'")]
    AuthenticationFailed { user: String },

    /// SSH key error
    #[error("SSH key error: {0}")]
    Key(String),

    /// The host key does not match the one recorded in known_hosts
    #[error("Host key for {host}:{port} changed (known_hosts line {line})")]
    HostKeyChanged { host: String, port: u16, line: usize },

    /// Strict verification is on and the host is not in known_hosts
    #[error("Host key for {host}:{port} is not in known_hosts")]
    HostKeyUnknown { host: String, port: u16 },

    /// Reading or writing known_hosts failed
    #[error("known_hosts error: {0}")]
    KnownHosts(String),

    /// Operation timed out
    #[error("Operation timed out after {0:?}")]
    Timeout(Duration),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Channel layer errors (pattern matching, PTY operations).
#[derive(Error, Debug)]
pub enum ChannelError {
    /// Pattern matching timed out
    #[error("Pattern not found within {0:?}")]
    PatternTimeout(Duration),

    /// Channel closed unexpectedly
    #[error("Channel closed")]
    Closed,

    /// SSH protocol error on the channel
    #[error("Channel SSH error: {0}")]
    Ssh(russh::Error),

    /// Invalid regex pattern
    #[error("Invalid regex pattern: {0}")]
    InvalidPattern(#[from] regex::Error),
}

/// Driver layer errors (command execution, privilege escalation).
#[derive(Error, Debug)]
pub enum DriverError {
    /// Driver not connected
    #[error("Driver not connected - call open() first")]
    NotConnected,

    /// Driver already connected
    #[error("Driver already connected")]
    AlreadyConnected,

    /// Failed to acquire target privilege level
    #[error("Failed to acquire privilege level '{target}'")]
    PrivilegeAcquisitionFailed { target: String },

    /// Invalid configuration in the driver builder or acquisition ladder
    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },

    /// Unknown privilege level detected
    #[error("Unknown privilege level from prompt: '{prompt}'")]
    UnknownPrivilege { prompt: String },

    /// No path found between privilege levels
    #[error("No path from privilege '{from}' to '{to}'")]
    NoPrivilegePath { from: String, to: String },
}

/// Platform definition errors.
#[derive(Error, Debug)]
pub enum PlatformError {
    /// Invalid platform definition
    #[error("Invalid platform definition: {message}")]
    InvalidDefinition { message: String },
}

/// Failure of a single remote command, as seen by the acquisition ladder.
///
/// Every variant is recoverable between tiers; only the last tier's error
/// is surfaced, wrapped in [`AcquisitionExhausted`].
#[derive(Error, Debug)]
pub enum CommandError {
    /// No prompt came back within the command timeout
    #[error("command timed out after {0:?}")]
    Timeout(Duration),

    /// The device answered with an error marker (e.g. `% Invalid input`)
    #[error("device rejected '{command}': {message}")]
    Rejected { command: String, message: String },

    /// Transport or channel fault while the command was running
    #[error("session fault: {0}")]
    Session(String),

    /// The session was not open
    #[error("session not connected")]
    NotConnected,
}

impl From<Error> for CommandError {
    fn from(err: Error) -> Self {
        match err {
            Error::Channel(ChannelError::PatternTimeout(after))
            | Error::Transport(TransportError::Timeout(after)) => CommandError::Timeout(after),
            Error::Driver(DriverError::NotConnected) => CommandError::NotConnected,
            other => CommandError::Session(other.to_string()),
        }
    }
}

/// Every tier of the acquisition ladder failed.
#[derive(Error, Debug)]
#[error("all {} acquisition tiers failed ({}); last error: {source}", .attempted.len(), .attempted.join(", "))]
pub struct AcquisitionExhausted {
    /// Names of the tiers that were tried, in order.
    pub attempted: Vec<String>,

    /// The error raised by the last tier.
    #[source]
    pub source: CommandError,
}

/// Errors raised while writing records to a tabular destination.
#[derive(Error, Debug)]
pub enum ExportError {
    /// The record sequence was empty; no file was written
    #[error("no VLAN records to export")]
    NothingToExport,

    /// I/O error on the destination
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// CSV serialization error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Workbook creation or save error
    #[error("Excel error: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),
}

/// Result type alias using vlanscrape's session [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pattern_timeout_maps_to_command_timeout() {
        let err: Error = ChannelError::PatternTimeout(Duration::from_secs(120)).into();
        let cmd: CommandError = err.into();
        assert!(matches!(cmd, CommandError::Timeout(d) if d == Duration::from_secs(120)));
    }

    #[test]
    fn test_not_connected_maps_through() {
        let err: Error = DriverError::NotConnected.into();
        assert!(matches!(CommandError::from(err), CommandError::NotConnected));
    }

    #[test]
    fn test_other_faults_become_session_errors() {
        let err: Error = ChannelError::Closed.into();
        match CommandError::from(err) {
            CommandError::Session(msg) => assert!(msg.contains("Channel closed")),
            other => panic!("unexpected mapping: {other:?}"),
        }
    }

    #[test]
    fn test_exhausted_message_lists_tiers() {
        let err = AcquisitionExhausted {
            attempted: vec!["precise".into(), "filtered".into(), "local-filter".into()],
            source: CommandError::Timeout(Duration::from_secs(180)),
        };
        let msg = err.to_string();
        assert!(msg.starts_with("all 3 acquisition tiers failed"));
        assert!(msg.contains("precise, filtered, local-filter"));
        assert!(msg.contains("timed out"));
    }
}
