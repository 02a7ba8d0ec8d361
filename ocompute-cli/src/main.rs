//! ocompute CLI
//!
//! Command-line interface for managing servers and orchestrations on the
//! Oracle Compute Cloud.

mod commands;
mod config;
mod error;
mod output;
mod service;

use std::time::Duration;

use clap::Parser;
use colored::*;
use commands::{Commands, handle_command};
use config::{Config, DEFAULT_REFRESH_RATE_SECS, DEFAULT_WAIT_TIME_SECS};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "ocompute")]
#[command(about = "Oracle Compute Cloud CLI", long_about = None)]
struct Cli {
    /// URL of the compute API endpoint
    #[arg(long, global = true, env = "ORACLECLOUD_API_URL")]
    api_url: Option<String>,

    /// User name
    #[arg(long, global = true, env = "ORACLECLOUD_USERNAME")]
    username: Option<String>,

    /// Password
    #[arg(long, global = true, env = "ORACLECLOUD_PASSWORD", hide_env_values = true)]
    password: Option<String>,

    /// Identity domain
    #[arg(long, global = true, env = "ORACLECLOUD_DOMAIN")]
    domain: Option<String>,

    /// Do not verify TLS certificates
    #[arg(long, global = true, env = "ORACLECLOUD_DISABLE_SSL_VERIFY")]
    disable_ssl_verify: bool,

    /// The endpoint is a private cloud installation
    #[arg(long, global = true, env = "ORACLECLOUD_PRIVATE_CLOUD")]
    private_cloud: bool,

    /// Seconds to wait for an orchestration to change state
    #[arg(long, global = true, env = "ORACLECLOUD_WAIT_TIME", default_value_t = DEFAULT_WAIT_TIME_SECS)]
    wait_time: u64,

    /// Seconds between status checks while waiting
    #[arg(long, global = true, env = "ORACLECLOUD_REFRESH_RATE", default_value_t = DEFAULT_REFRESH_RATE_SECS)]
    request_refresh_rate: u64,

    /// Log API traffic and workflow steps to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    fn config(&self) -> Config {
        Config {
            api_url: self.api_url.clone(),
            username: self.username.clone(),
            password: self.password.clone(),
            domain: self.domain.clone(),
            verify_ssl: !self.disable_ssl_verify,
            private_cloud: self.private_cloud,
            wait_time: Duration::from_secs(self.wait_time),
            refresh_rate: Duration::from_secs(self.request_refresh_rate),
        }
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose {
        "ocompute=debug,ocompute_client=debug"
    } else {
        "ocompute=warn,ocompute_client=warn"
    };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default.into()))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .init();
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = cli.config();
    config.validate()?;

    handle_command(cli.command, &config).await
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(cli).await {
        eprintln!("{} {:#}", "ERROR:".red().bold(), e);
        std::process::exit(1);
    }
}
