// File: crates/hubchart/src/main.rs
// Summary: Host CLI: render every configured chart device once, or print cleaned device props.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use hubchart::{build_job, clean_device_props, Driver, HostConfig};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "hubchart", version, about = "Render home-automation charts from CSV observations")]
struct Cli {
    /// Debug-level host logging
    #[arg(long, global = true)]
    debug: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render every chart device once, each in its own worker
    Run {
        #[arg(short, long, default_value = "hubchart.toml")]
        config: PathBuf,
        /// Worker binary; defaults to hubchart-worker beside this executable
        #[arg(long)]
        worker: Option<PathBuf>,
        /// Only render devices with these names
        #[arg(long)]
        device: Vec<String>,
    },
    /// Print the sanitized props of every device as JSON
    Clean {
        #[arg(short, long, default_value = "hubchart.toml")]
        config: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let level = if cli.debug { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)))
        .init();

    match cli.command {
        Commands::Run { config, worker, device } => {
            let cfg = HostConfig::load(&config).with_context(|| format!("loading {}", config.display()))?;
            let mut jobs = Vec::new();
            for dev in cfg.devices.iter().filter(|d| device.is_empty() || device.contains(&d.name)) {
                match build_job(&cfg.prefs, dev) {
                    Ok(Some(job)) => jobs.push(job),
                    Ok(None) => tracing::debug!(device = %dev.name, "skipping non-chart device"),
                    Err(e) => tracing::error!(device = %dev.name, "cannot build chart job: {e}"),
                }
            }
            let mut driver = Driver::new(worker.unwrap_or_else(Driver::default_worker_path));
            driver.verbose = cfg.prefs.verbose_logging;
            driver.log_each_chart = cfg.prefs.log_each_chart_completed;
            tracing::info!(charts = jobs.len(), worker = %driver.worker().display(), "refreshing charts");

            let reports = driver.run_all(&jobs);
            let failed = reports.iter().filter(|r| !r.as_ref().is_ok_and(|r| r.succeeded())).count();
            for r in reports.iter().filter_map(|r| r.as_ref().err()) {
                tracing::error!("{r:#}");
            }
            if failed > 0 {
                tracing::warn!(failed, total = jobs.len(), "some charts did not refresh cleanly");
            }
        }
        Commands::Clean { config } => {
            let cfg = HostConfig::load(&config).with_context(|| format!("loading {}", config.display()))?;
            for dev in &cfg.devices {
                let cleaned = clean_device_props(&dev.device_type_id, dev.props.clone());
                println!("# {} ({})", dev.name, dev.device_type_id);
                println!("{}", serde_json::to_string_pretty(&cleaned)?);
            }
        }
    }
    Ok(())
}
