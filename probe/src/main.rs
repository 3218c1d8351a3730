use std::process::ExitCode;

use clap::error::ErrorKind;
use clap::Parser;
use tracing::{error, info};

use memprobe::collectors::{CommandSwapSource, SystemMemory};
use memprobe::config::ProbeConfig;
use memprobe::error::ProbeError;

/// Prints physical and swap memory metrics once and exits.
#[derive(Parser, Debug)]
#[command(name = "memprobe", version, about)]
struct Cli {
    /// Comma-separated 0/1 flags enabling each metric, in order:
    /// physical usage %, physical used, physical free, swap usage %,
    /// swap used, swap free. All metrics are enabled when omitted.
    #[arg(allow_hyphen_values = true)]
    metric_state: Option<String>,

    /// Path to an optional configuration file.
    #[arg(short, long)]
    config: Option<String>,
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "memprobe=warn".into()),
        )
        .init();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            e.exit()
        }
        Err(e) => return fail(argument_error(&e)),
    };

    match probe(&cli).await {
        Ok(written) => {
            info!(metrics = written, "Probe finished");
            ExitCode::SUCCESS
        }
        Err(e) => fail(e),
    }
}

/// Log the failure, print its message and map it to an exit status.
fn fail(e: ProbeError) -> ExitCode {
    error!(exit_code = e.exit_code(), "Probe failed: {e}");
    eprintln!("{e}");
    ExitCode::from(e.exit_code())
}

/// Rejected command-line arguments are a configuration error (exit 3).
fn argument_error(e: &clap::Error) -> ProbeError {
    let rendered = e.to_string();
    let first = rendered.lines().next().unwrap_or_default();
    let msg = first.trim_start_matches("error: ").trim();
    ProbeError::Configuration(format!("invalid arguments: {msg}"))
}

async fn probe(cli: &Cli) -> Result<usize, ProbeError> {
    let cfg = match &cli.config {
        Some(path) => ProbeConfig::from_file(path)
            .map_err(|e| ProbeError::Configuration(format!("{e:#}")))?,
        None => ProbeConfig::default(),
    };
    info!(
        command = %cfg.swap.command,
        args = ?cfg.swap.args,
        "Configuration loaded"
    );

    let swap = CommandSwapSource::new(&cfg.swap);
    let mut stdout = std::io::stdout();

    memprobe::run(cli.metric_state.as_deref(), &swap, &SystemMemory, &mut stdout).await
}
