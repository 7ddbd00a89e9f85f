//! Tiered retrieval of VLAN interface configuration.
//!
//! Three commands are tried in order, each broader than the last:
//!
//! ```text
//! precise       show running-config interface vlan                  120s
//! filtered      show running-config | include interface Vlan|...     120s
//! local-filter  show running-config  (filtered here, line by line)  180s
//! ```
//!
//! The first tier whose command succeeds wins. A failed tier is never
//! retried and there is no backoff between tiers.

use std::time::Duration;

use log::{debug, info, warn};

use super::session::DeviceSession;
use crate::error::{AcquisitionExhausted, CommandError, DriverError};

/// Timeout for the two device-side scoped commands.
pub const SCOPED_TIMEOUT: Duration = Duration::from_secs(120);

/// Timeout for the unfiltered running-config dump.
pub const FULL_CONFIG_TIMEOUT: Duration = Duration::from_secs(180);

/// Substrings that mark a configuration line as VLAN-relevant.
pub const VLAN_LINE_MARKERS: [&str; 4] = ["interface Vlan", "ip address", "standby", "shutdown"];

/// Keeps only the lines of a text that contain at least one marker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineFilter {
    markers: Vec<String>,
}

impl LineFilter {
    pub fn new<I, S>(markers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            markers: markers.into_iter().map(Into::into).collect(),
        }
    }

    /// The filter for VLAN interface lines.
    pub fn vlan_lines() -> Self {
        Self::new(VLAN_LINE_MARKERS)
    }

    /// Matching lines, joined with `\n`.
    pub fn apply(&self, text: &str) -> String {
        text.lines()
            .filter(|line| self.markers.iter().any(|m| line.contains(m.as_str())))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// One rung of the acquisition ladder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tier {
    /// Short name used in logs and errors.
    pub name: String,

    /// Command sent to the device.
    pub command: String,

    /// How long the command may run.
    pub timeout: Duration,

    /// Applied to the output on this side of the connection, if set.
    pub filter: Option<LineFilter>,
}

impl Tier {
    pub fn new(name: impl Into<String>, command: impl Into<String>, timeout: Duration) -> Self {
        Self {
            name: name.into(),
            command: command.into(),
            timeout,
            filter: None,
        }
    }

    pub fn with_filter(mut self, filter: LineFilter) -> Self {
        self.filter = Some(filter);
        self
    }

    /// `show running-config interface vlan`
    pub fn precise() -> Self {
        Self::new("precise", "show running-config interface vlan", SCOPED_TIMEOUT)
    }

    /// Running config filtered on the device with `| include`.
    pub fn filtered() -> Self {
        let pattern = VLAN_LINE_MARKERS.join("|");
        Self::new(
            "filtered",
            format!("show running-config | include {pattern}"),
            SCOPED_TIMEOUT,
        )
    }

    /// Whole running config, filtered locally.
    pub fn local_filter() -> Self {
        Self::new("local-filter", "show running-config", FULL_CONFIG_TIMEOUT)
            .with_filter(LineFilter::vlan_lines())
    }
}

/// Text produced by the first tier that succeeded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Acquired {
    /// Name of the tier that produced `text`.
    pub tier: String,

    /// Configuration text; may be empty.
    pub text: String,
}

/// Ordered fallback ladder of retrieval commands.
#[derive(Debug, Clone)]
pub struct AcquisitionStrategy {
    tiers: Vec<Tier>,
}

impl AcquisitionStrategy {
    /// Build a custom ladder. At least one tier is required.
    pub fn new(tiers: Vec<Tier>) -> Result<Self, DriverError> {
        if tiers.is_empty() {
            return Err(DriverError::InvalidConfig {
                message: "acquisition ladder needs at least one tier".to_string(),
            });
        }
        Ok(Self { tiers })
    }

    /// Override the timeouts of the default ladder.
    ///
    /// `scoped` applies to the precise and filtered tiers, `full_config` to
    /// the local-filter tier.
    pub fn with_timeouts(scoped: Duration, full_config: Duration) -> Self {
        let mut strategy = Self::default();
        for tier in &mut strategy.tiers {
            tier.timeout = if tier.filter.is_some() {
                full_config
            } else {
                scoped
            };
        }
        strategy
    }

    pub fn tiers(&self) -> &[Tier] {
        &self.tiers
    }

    /// Walk the ladder until a tier returns text.
    ///
    /// Every tier is tried at most once, strictly in order. If all of them
    /// fail, the last tier's error is returned inside [`AcquisitionExhausted`].
    pub async fn acquire<S: DeviceSession>(
        &self,
        session: &mut S,
    ) -> Result<Acquired, AcquisitionExhausted> {
        let mut attempted = Vec::with_capacity(self.tiers.len());
        let mut last_error: Option<CommandError> = None;

        for tier in &self.tiers {
            attempted.push(tier.name.clone());
            debug!("tier '{}': {}", tier.name, tier.command);

            match session.run_command(&tier.command, tier.timeout).await {
                Ok(output) => {
                    let text = match &tier.filter {
                        Some(filter) => filter.apply(&output),
                        None => output,
                    };
                    info!("configuration retrieved by tier '{}' ({} bytes)", tier.name, text.len());
                    return Ok(Acquired {
                        tier: tier.name.clone(),
                        text,
                    });
                }
                Err(err) => {
                    warn!("tier '{}' failed: {}", tier.name, err);
                    last_error = Some(err);
                }
            }
        }

        Err(AcquisitionExhausted {
            attempted,
            source: last_error.expect("acquisition ladder is never empty"),
        })
    }
}

impl Default for AcquisitionStrategy {
    fn default() -> Self {
        Self {
            tiers: vec![Tier::precise(), Tier::filtered(), Tier::local_filter()],
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use std::collections::VecDeque;

    use super::*;

    /// Session stub that replays canned results and records every command.
    pub(crate) struct ScriptedSession {
        replies: VecDeque<Result<String, CommandError>>,
        pub(crate) commands: Vec<(String, Duration)>,
        pub(crate) disconnected: bool,
    }

    impl ScriptedSession {
        pub(crate) fn new(replies: Vec<Result<String, CommandError>>) -> Self {
            Self {
                replies: replies.into(),
                commands: Vec::new(),
                disconnected: false,
            }
        }

        pub(crate) fn sent(&self) -> Vec<&str> {
            self.commands.iter().map(|(c, _)| c.as_str()).collect()
        }
    }

    impl DeviceSession for ScriptedSession {
        async fn run_command(&mut self, command: &str, timeout: Duration) -> Result<String, CommandError> {
            self.commands.push((command.to_string(), timeout));
            self.replies
                .pop_front()
                .unwrap_or_else(|| Err(CommandError::Session("script exhausted".into())))
        }

        async fn disconnect(&mut self) -> Result<(), CommandError> {
            self.disconnected = true;
            Ok(())
        }
    }

    fn rejected(command: &str) -> Result<String, CommandError> {
        Err(CommandError::Rejected {
            command: command.to_string(),
            message: "% Invalid input".to_string(),
        })
    }

    #[test]
    fn test_default_ladder() {
        let strategy = AcquisitionStrategy::default();
        let tiers = strategy.tiers();
        assert_eq!(tiers.len(), 3);
        assert_eq!(tiers[0].command, "show running-config interface vlan");
        assert_eq!(
            tiers[1].command,
            "show running-config | include interface Vlan|ip address|standby|shutdown"
        );
        assert_eq!(tiers[2].command, "show running-config");
        assert_eq!(tiers[0].timeout, Duration::from_secs(120));
        assert_eq!(tiers[1].timeout, Duration::from_secs(120));
        assert_eq!(tiers[2].timeout, Duration::from_secs(180));
        assert!(tiers[2].filter.is_some());
    }

    #[test]
    fn test_empty_ladder_rejected() {
        assert!(AcquisitionStrategy::new(vec![]).is_err());
        assert!(AcquisitionStrategy::new(vec![Tier::precise()]).is_ok());
    }

    #[test]
    fn test_with_timeouts() {
        let strategy =
            AcquisitionStrategy::with_timeouts(Duration::from_secs(30), Duration::from_secs(300));
        let timeouts: Vec<_> = strategy.tiers().iter().map(|t| t.timeout.as_secs()).collect();
        assert_eq!(timeouts, [30, 30, 300]);
    }

    #[test]
    fn test_line_filter_keeps_marker_lines() {
        let config = "hostname core-sw1
!
interface GigabitEthernet1/0/1
 switchport mode trunk
interface Vlan10
 description users
 ip address 10.0.10.1 255.255.255.0
 standby 1 ip 10.0.10.254
 no shutdown
!
end";
        let filtered = LineFilter::vlan_lines().apply(config);
        assert_eq!(
            filtered,
            "interface Vlan10\n ip address 10.0.10.1 255.255.255.0\n standby 1 ip 10.0.10.254\n no shutdown"
        );
    }

    #[tokio::test]
    async fn test_first_tier_success_stops_ladder() {
        let mut session = ScriptedSession::new(vec![Ok("interface Vlan10\n".into())]);
        let acquired = AcquisitionStrategy::default().acquire(&mut session).await.unwrap();

        assert_eq!(acquired.tier, "precise");
        assert_eq!(acquired.text, "interface Vlan10\n");
        assert_eq!(session.sent(), ["show running-config interface vlan"]);
    }

    #[tokio::test]
    async fn test_falls_back_to_second_tier_only() {
        let mut session = ScriptedSession::new(vec![
            rejected("show running-config interface vlan"),
            Ok("interface Vlan20\n shutdown".into()),
            Ok("never used".into()),
        ]);
        let acquired = AcquisitionStrategy::default().acquire(&mut session).await.unwrap();

        assert_eq!(acquired.tier, "filtered");
        assert_eq!(session.commands.len(), 2);
        assert_eq!(
            session.sent(),
            [
                "show running-config interface vlan",
                "show running-config | include interface Vlan|ip address|standby|shutdown",
            ]
        );
    }

    #[tokio::test]
    async fn test_third_tier_filters_locally() {
        let mut session = ScriptedSession::new(vec![
            Err(CommandError::Timeout(SCOPED_TIMEOUT)),
            Err(CommandError::Timeout(SCOPED_TIMEOUT)),
            Ok("hostname sw\r\ninterface Vlan30\r\n ip address 10.3.0.1 255.255.255.0\r\n mtu 9000\r\n".into()),
        ]);
        let acquired = AcquisitionStrategy::default().acquire(&mut session).await.unwrap();

        assert_eq!(acquired.tier, "local-filter");
        assert_eq!(
            acquired.text,
            "interface Vlan30\n ip address 10.3.0.1 255.255.255.0"
        );
        assert_eq!(session.commands[2], ("show running-config".to_string(), FULL_CONFIG_TIMEOUT));
    }

    #[tokio::test]
    async fn test_exhaustion_reports_last_error() {
        let mut session = ScriptedSession::new(vec![
            rejected("show running-config interface vlan"),
            rejected("show running-config | include ..."),
            Err(CommandError::Timeout(FULL_CONFIG_TIMEOUT)),
            Ok("must not be requested".into()),
        ]);
        let err = AcquisitionStrategy::default()
            .acquire(&mut session)
            .await
            .unwrap_err();

        assert_eq!(session.commands.len(), 3);
        assert_eq!(err.attempted, ["precise", "filtered", "local-filter"]);
        assert!(matches!(err.source, CommandError::Timeout(d) if d == FULL_CONFIG_TIMEOUT));
    }

    #[test]
    fn test_empty_output_is_success() {
        let mut session = ScriptedSession::new(vec![Ok(String::new())]);
        let acquired = tokio_test::block_on(AcquisitionStrategy::default().acquire(&mut session)).unwrap();
        assert_eq!(acquired.text, "");
        assert_eq!(session.commands.len(), 1);
    }
}
