//! `vlanscrape` command line entry point.
//!
//! ```bash
//! VLANSCRAPE_PASSWORD=secret vlanscrape --host 10.0.0.1 --user admin
//! vlanscrape --host sw1 --user admin --key ~/.ssh/id_ed25519 --format json -o vlans.json
//! ```
//!
//! Set `RUST_LOG=debug` to see each command and the prompt handling.

use std::process::ExitCode;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use clap::Parser;
use log::warn;
use vlanscrape::{
    AcquisitionExhausted, AcquisitionStrategy, CsvExporter, Driver, DriverBuilder, Exporter,
    GenericDriver, JsonExporter, XlsxExporter, extract_vlans, summary_lines,
};

mod cli;

use cli::{Cli, OutputFormat};

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err:#}");
            for line in guidance(&err) {
                eprintln!("{line}");
            }
            ExitCode::FAILURE
        }
    }
}

/// Advice printed after a failed run.
fn guidance(err: &anyhow::Error) -> &'static [&'static str] {
    if err.downcast_ref::<AcquisitionExhausted>().is_some() {
        &[
            "No command returned the VLAN configuration.",
            "Check connectivity to the switch and that the credentials are still valid,",
            "that the account has privilege 15 or a working enable secret,",
            "and raise --command-timeout / --full-config-timeout on slow devices.",
        ]
    } else {
        &["Please check your connection details (host, port, credentials, host key)."]
    }
}

/// Disconnect, logging rather than returning any error.
async fn close_session(driver: &mut GenericDriver) {
    if let Err(err) = driver.close().await {
        warn!("error while closing session: {}", err);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let mut builder = DriverBuilder::new(&cli.host)
        .port(cli.port)
        .username(&cli.user)
        .timeout(Duration::from_secs(cli.connect_timeout))
        .host_key_verification(cli.host_key_checking.into());

    builder = match (&cli.password, &cli.key) {
        (_, Some(key)) => match &cli.key_passphrase {
            Some(passphrase) => builder.private_key_with_passphrase(key, passphrase),
            None => builder.private_key(key),
        },
        (Some(password), None) => builder.password(password),
        (None, None) => bail!("either --password (or VLANSCRAPE_PASSWORD) or --key is required"),
    };
    if let Some(secret) = &cli.enable_secret {
        builder = builder.enable_secret(secret);
    }

    let mut driver = builder.build()?;

    println!("Connecting to {}:{}...", cli.host, cli.port);
    if let Err(err) = driver.open().await {
        // A half-open session may still hold the socket
        close_session(&mut driver).await;
        return Err(err).with_context(|| format!("failed to open session to {}", cli.host));
    }

    let strategy = AcquisitionStrategy::with_timeouts(
        Duration::from_secs(cli.command_timeout),
        Duration::from_secs(cli.full_config_timeout),
    );
    let extraction = extract_vlans(&mut driver, &strategy).await;

    close_session(&mut driver).await;

    let extraction = extraction?;

    println!("Found {} VLAN interface(s)", extraction.len());
    for line in summary_lines(&extraction.records) {
        println!("  {line}");
    }

    if extraction.is_empty() {
        println!("No VLAN data found. The switch may have no VLAN interfaces configured,");
        println!("or the account may lack permission to read the running configuration.");
        return Ok(());
    }

    let output = cli.output_path();
    match cli.format {
        OutputFormat::Xlsx => XlsxExporter.export(&extraction.records, &output)?,
        OutputFormat::Csv => CsvExporter.export(&extraction.records, &output)?,
        OutputFormat::Json => JsonExporter.export(&extraction.records, &output)?,
    }
    println!("Wrote {}", output.display());

    Ok(())
}
