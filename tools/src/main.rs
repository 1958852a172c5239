use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use codec::ProtocolVersion;
use gbeam_tools::{
    format_inspect_pretty, format_simulation_pretty, inspect_capture, parse_hex, simulate,
    Scenario,
};
use tracing::Level;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(
    name = "gbeam-tools",
    version,
    about = "Guardian beam packet inspection and simulation tools"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Decode a capture of one or more framed packets.
    Inspect {
        /// Path to the capture.
        packet_path: PathBuf,
        /// Treat the file as hex text instead of raw bytes.
        #[arg(long)]
        hex: bool,
        /// Protocol version the packets were encoded for.
        #[arg(long, default_value_t = ProtocolVersion::V1_8)]
        protocol: ProtocolVersion,
        /// Output format.
        #[arg(long, value_enum, default_value_t = OutputFormat::Pretty)]
        format: OutputFormat,
    },
    /// Replay a scenario JSON file against a beam.
    Simulate {
        /// Path to the scenario JSON.
        scenario: PathBuf,
        /// Output format.
        #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
        format: OutputFormat,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum OutputFormat {
    Json,
    Pretty,
}

fn main() -> Result<()> {
    init_tracing()?;
    let cli = Cli::parse();
    match cli.command {
        Command::Inspect {
            packet_path,
            hex,
            protocol,
            format,
        } => {
            let bytes = read_capture(&packet_path, hex)?;
            let reports = inspect_capture(&bytes, protocol, &wire::Limits::default())?;
            match format {
                OutputFormat::Json => {
                    let json = serde_json::to_string_pretty(&reports).context("serialize json")?;
                    println!("{json}");
                }
                OutputFormat::Pretty => {
                    for report in &reports {
                        println!("{}", format_inspect_pretty(report));
                    }
                }
            }
        }
        Command::Simulate { scenario, format } => {
            let scenario = load_scenario(&scenario)?;
            let report = simulate(&scenario)?;
            match format {
                OutputFormat::Json => {
                    let json = serde_json::to_string_pretty(&report).context("serialize json")?;
                    println!("{json}");
                }
                OutputFormat::Pretty => println!("{}", format_simulation_pretty(&report)),
            }
        }
    }
    Ok(())
}

fn init_tracing() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            EnvFilter::builder()
                // defaults to INFO if RUST_LOG not set
                .with_default_directive(Level::INFO.into())
                .from_env_lossy(),
        )
        .with(fmt::layer().with_writer(std::io::stderr))
        .try_init()
        .context("install tracing subscriber")
}

fn read_capture(path: &Path, hex: bool) -> Result<Vec<u8>> {
    if hex {
        let text =
            fs::read_to_string(path).with_context(|| format!("read packet {}", path.display()))?;
        parse_hex(&text).with_context(|| format!("parse hex {}", path.display()))
    } else {
        fs::read(path).with_context(|| format!("read packet {}", path.display()))
    }
}

fn load_scenario(path: &Path) -> Result<Scenario> {
    let contents =
        fs::read_to_string(path).with_context(|| format!("read scenario {}", path.display()))?;
    let scenario: Scenario = serde_json::from_str(&contents).context("parse scenario json")?;
    scenario
        .config
        .validate()
        .map_err(|err| anyhow::anyhow!("scenario config invalid: {err}"))?;
    Ok(scenario)
}
