//! SSH transport layer wrapping russh.
//!
//! Connection setup, authentication, host key checks and the PTY shell
//! channel the driver talks through.

pub mod config;
mod ssh;

pub use config::{AuthMethod, HostKeyVerification, SshConfig};
pub use ssh::SshTransport;
