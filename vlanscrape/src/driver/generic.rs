//! Generic driver implementation that works with any platform definition.

use std::sync::Arc;
use std::time::{Duration, Instant};

use log::{debug, info, warn};
use regex::bytes::Regex;
use secrecy::{ExposeSecret, SecretString};

use super::Driver;
use super::privilege::PrivilegeManager;
use super::response::Response;
use crate::channel::combine_prompt_patterns;
use crate::error::{ChannelError, DriverError, Result};
use crate::platform::{DefaultBehavior, PlatformDefinition, VendorBehavior};
use crate::transport::SshTransport;
use crate::transport::config::SshConfig;

/// Driver for a single device session.
///
/// Handles:
/// - SSH transport management
/// - Command execution with prompt detection and per-command timeouts
/// - Privilege level tracking and `enable` escalation
/// - Output normalization and failure marker detection
pub struct GenericDriver {
    ssh_config: SshConfig,

    platform: PlatformDefinition,

    behavior: Arc<dyn VendorBehavior>,

    /// SSH transport (None when disconnected).
    transport: Option<SshTransport>,

    privilege_manager: PrivilegeManager,

    /// Secret sent at the `enable` password prompt.
    enable_secret: Option<SecretString>,

    /// Default timeout for operations.
    timeout: Duration,

    /// Combined prompt pattern for all privilege levels.
    prompt_pattern: Regex,
}

impl GenericDriver {
    pub fn new(
        ssh_config: SshConfig,
        platform: PlatformDefinition,
        enable_secret: Option<SecretString>,
    ) -> Result<Self> {
        platform.validate()?;

        let timeout = ssh_config.timeout;
        let privilege_manager = PrivilegeManager::new(platform.privilege_levels.clone());

        let behavior = platform
            .behavior
            .clone()
            .unwrap_or_else(|| Arc::new(DefaultBehavior));

        let prompt_pattern = combine_prompt_patterns(
            platform.privilege_levels.values().map(|level| &level.pattern),
        )
        .map_err(ChannelError::from)?;

        Ok(Self {
            ssh_config,
            platform,
            behavior,
            transport: None,
            privilege_manager,
            enable_secret,
            timeout,
            prompt_pattern,
        })
    }

    pub fn platform(&self) -> &PlatformDefinition {
        &self.platform
    }

    pub fn ssh_config(&self) -> &SshConfig {
        &self.ssh_config
    }

    fn transport_mut(&mut self) -> Result<&mut SshTransport> {
        Ok(self.transport.as_mut().ok_or(DriverError::NotConnected)?)
    }

    /// Read until a prompt shows up; returns the raw text and the trimmed prompt.
    async fn read_until_prompt(&mut self, timeout: Duration) -> Result<(String, String)> {
        let transport = self.transport.as_mut().ok_or(DriverError::NotConnected)?;
        let data = transport
            .read_until_pattern(&self.prompt_pattern, timeout)
            .await?;

        let prompt = match last_match_start(&self.prompt_pattern, &data) {
            Some(start) => String::from_utf8_lossy(&data[start..]).trim().to_string(),
            None => String::new(),
        };
        Ok((String::from_utf8_lossy(&data).into_owned(), prompt))
    }

    /// Send a command and wait for the prompt, giving up after `timeout`.
    ///
    /// A command the device rejects (one of the platform's failure markers,
    /// or whatever the vendor behavior flags) comes back as a failed
    /// [`Response`] rather than an `Err`.
    pub async fn send_command_with_timeout(
        &mut self,
        command: &str,
        timeout: Duration,
    ) -> Result<Response> {
        let start = Instant::now();
        let transport = self.transport.as_mut().ok_or(DriverError::NotConnected)?;
        // Output of an abandoned command must not be read as this one's
        transport.resync(&self.prompt_pattern, timeout).await?;
        transport.discard_pending();
        transport.send(command).await?;

        let (raw, prompt) = self.read_until_prompt(timeout).await?;
        let elapsed = start.elapsed();
        self.privilege_manager.update_from_prompt(&prompt);

        let result = self.behavior.normalize_output(&raw, command);
        debug!(
            "'{}' returned {} bytes in {:?}",
            command,
            result.len(),
            elapsed
        );

        let failure = self
            .behavior
            .detect_failure(&result)
            .or_else(|| self.platform.failure_in(&result).map(str::to_string));

        let response = Response::new(command, result, prompt, elapsed);
        Ok(match failure {
            Some(message) => response.with_failure(message),
            None => response,
        })
    }

    /// Answer an escalation password prompt with the enable secret or login password.
    async fn answer_auth_prompt(&mut self, auth_prompt: &Regex) -> Result<()> {
        let timeout = self.timeout;
        let secret = self
            .enable_secret
            .as_ref()
            .or_else(|| self.ssh_config.password())
            .map(|s| s.expose_secret().to_string());

        let transport = self.transport.as_mut().ok_or(DriverError::NotConnected)?;
        transport.read_until_pattern(auth_prompt, timeout).await?;
        match secret {
            Some(secret) => transport.send(&secret).await,
            // Nothing to send; the device will reject the blank line and stay put
            None => transport.send("").await,
        }
    }

    async fn run_on_open_commands(&mut self) -> Result<()> {
        for cmd in self.platform.on_open_commands.clone() {
            let response = self.send_command(&cmd).await?;
            if !response.is_success() {
                debug!("on-open command '{}' rejected; continuing", cmd);
            }
        }
        Ok(())
    }
}

impl Driver for GenericDriver {
    async fn open(&mut self) -> Result<()> {
        if self.transport.is_some() {
            return Err(DriverError::AlreadyConnected.into());
        }

        let transport = SshTransport::connect(&self.ssh_config).await?;
        self.transport = Some(transport);

        let (_, prompt) = self.read_until_prompt(self.timeout).await?;
        self.privilege_manager.update_from_prompt(&prompt);
        info!(
            "connected to {} (prompt '{}')",
            self.ssh_config.socket_addr(),
            prompt
        );

        let target = self.platform.default_privilege.clone();
        let at_target = target.is_empty() || self.current_privilege() == Some(target.as_str());
        if !at_target {
            if self.enable_secret.is_some() || self.ssh_config.password().is_some() {
                self.acquire_privilege(&target).await?;
            } else {
                warn!(
                    "no enable secret or password; staying at '{}'",
                    self.current_privilege().unwrap_or("unknown")
                );
            }
        }

        self.run_on_open_commands().await
    }

    async fn close(&mut self) -> Result<()> {
        if let Some(transport) = self.transport.take() {
            transport.close().await?;
            debug!("disconnected from {}", self.ssh_config.socket_addr());
        }
        Ok(())
    }

    async fn send_command(&mut self, command: &str) -> Result<Response> {
        let timeout = self.timeout;
        self.send_command_with_timeout(command, timeout).await
    }

    async fn acquire_privilege(&mut self, target: &str) -> Result<()> {
        let current = self
            .privilege_manager
            .current()
            .map(|l| l.name.clone())
            .ok_or_else(|| DriverError::UnknownPrivilege {
                prompt: "(no prompt recognised yet)".to_string(),
            })?;

        if current == target {
            return Ok(());
        }

        let path = self.privilege_manager.find_path(&current, target)?;
        for step in path.windows(2) {
            let (from, to) = (&step[0], &step[1]);
            let transition = self
                .privilege_manager
                .get_transition(from, to)
                .ok_or_else(|| DriverError::NoPrivilegePath {
                    from: from.clone(),
                    to: to.clone(),
                })?;

            debug!("privilege {} -> {} via '{}'", from, to, transition.command);
            self.transport_mut()?.send(&transition.command).await?;

            if let Some(ref auth_prompt) = transition.auth_prompt {
                self.answer_auth_prompt(auth_prompt).await?;
            }

            let (_, prompt) = self.read_until_prompt(self.timeout).await?;
            self.privilege_manager.update_from_prompt(&prompt);

            let reached = self.privilege_manager.current().map(|l| l.name.as_str());
            if reached != Some(to.as_str()) {
                return Err(DriverError::PrivilegeAcquisitionFailed { target: to.clone() }.into());
            }
        }

        Ok(())
    }

    fn is_open(&self) -> bool {
        self.transport.is_some()
    }

    fn current_privilege(&self) -> Option<&str> {
        self.privilege_manager.current().map(|l| l.name.as_str())
    }
}

/// Start offset of the last prompt match in `data`.
fn last_match_start(pattern: &Regex, data: &[u8]) -> Option<usize> {
    pattern.find_iter(data).last().map(|m| m.start())
}
