use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use vlanscrape::HostKeyVerification;

#[derive(Parser, Debug)]
#[command(name = "vlanscrape")]
#[command(about = "Export VLAN interface configuration from a Cisco IOS switch")]
pub struct Cli {
    /// Switch hostname or IP address.
    #[arg(long)]
    pub host: String,

    #[arg(long, default_value_t = 22)]
    pub port: u16,

    #[arg(short, long)]
    pub user: String,

    /// Login password.
    #[arg(long, env = "VLANSCRAPE_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,

    /// Private key to authenticate with instead of a password.
    #[arg(long, conflicts_with = "password")]
    pub key: Option<PathBuf>,

    #[arg(long, requires = "key")]
    pub key_passphrase: Option<String>,

    /// Secret for `enable`; defaults to the login password.
    #[arg(long, env = "VLANSCRAPE_ENABLE_SECRET", hide_env_values = true)]
    pub enable_secret: Option<String>,

    /// Output file; defaults to `vlan_data.<format>`.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Xlsx)]
    pub format: OutputFormat,

    /// Seconds allowed for connecting and logging in.
    #[arg(long, default_value_t = 120)]
    pub connect_timeout: u64,

    /// Seconds allowed for each scoped `show` command.
    #[arg(long, default_value_t = 120)]
    pub command_timeout: u64,

    /// Seconds allowed for the full running-config dump.
    #[arg(long, default_value_t = 180)]
    pub full_config_timeout: u64,

    #[arg(long, value_enum, default_value_t = HostKeyChecking::AcceptNew)]
    pub host_key_checking: HostKeyChecking,
}

impl Cli {
    pub fn output_path(&self) -> PathBuf {
        self.output
            .clone()
            .unwrap_or_else(|| PathBuf::from(format!("vlan_data.{}", self.format.extension())))
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
pub enum OutputFormat {
    Xlsx,
    Csv,
    Json,
}

impl OutputFormat {
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Xlsx => "xlsx",
            OutputFormat::Csv => "csv",
            OutputFormat::Json => "json",
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
pub enum HostKeyChecking {
    Strict,
    AcceptNew,
    Disabled,
}

impl From<HostKeyChecking> for HostKeyVerification {
    fn from(mode: HostKeyChecking) -> Self {
        match mode {
            HostKeyChecking::Strict => HostKeyVerification::Strict,
            HostKeyChecking::AcceptNew => HostKeyVerification::AcceptNew,
            HostKeyChecking::Disabled => HostKeyVerification::Disabled,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["vlanscrape", "--host", "10.0.0.1", "--user", "admin"]).unwrap();
        assert_eq!(cli.port, 22);
        assert_eq!(cli.format, OutputFormat::Xlsx);
        assert_eq!(cli.output_path(), PathBuf::from("vlan_data.xlsx"));
        assert_eq!(cli.command_timeout, 120);
        assert_eq!(cli.full_config_timeout, 180);
        assert_eq!(cli.host_key_checking, HostKeyChecking::AcceptNew);
    }

    #[test]
    fn test_key_and_password_conflict() {
        let parsed = Cli::try_parse_from([
            "vlanscrape", "--host", "sw1", "--user", "admin", "--password", "x", "--key", "id_ed25519",
        ]);
        assert!(parsed.is_err());
    }

    #[test]
    fn test_default_name_follows_format() {
        let cli = Cli::try_parse_from(["vlanscrape", "--host", "sw1", "--user", "admin", "--format", "csv"])
            .unwrap();
        assert_eq!(cli.output_path(), PathBuf::from("vlan_data.csv"));
    }

    #[test]
    fn test_json_format() {
        let cli = Cli::try_parse_from([
            "vlanscrape", "--host", "sw1", "--user", "admin", "--format", "json", "-o", "out.json",
        ])
        .unwrap();
        assert_eq!(cli.format, OutputFormat::Json);
        assert_eq!(cli.output_path(), PathBuf::from("out.json"));
        assert_eq!(HostKeyVerification::from(cli.host_key_checking), HostKeyVerification::AcceptNew);
    }
}
