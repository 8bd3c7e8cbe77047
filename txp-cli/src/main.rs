//! Command-line smoke driver for the transaction server.
//!
//! Each iteration is an independent exchange over a fresh connection; the
//! first failure stops the run with a diagnostic on stderr and exit status 1.

use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use txp_client::{exchange, DEFAULT_TIMEOUT};

#[derive(Debug, Parser)]
#[command(
    name = "txp",
    about = "Send commands to a transaction server over its line protocol"
)]
struct Cli {
    /// Server hostname or address.
    #[arg(long, default_value = "127.0.0.1")]
    host: String,

    /// Server TCP port.
    #[arg(long, default_value_t = 8080)]
    port: u16,

    /// Seconds to wait for the connection and for the reply.
    #[arg(long, default_value_t = DEFAULT_TIMEOUT.as_secs())]
    timeout: u64,

    /// Number of sequential exchanges to run.
    #[arg(long, default_value_t = 1)]
    repeat: u32,

    /// Command to send, e.g. "PING" or "BALANCE 1".
    #[arg(default_value = "PING")]
    command: String,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let cli = Cli::parse();
    let timeout = Duration::from_secs(cli.timeout);

    for iteration in 1..=cli.repeat {
        debug!(iteration, host = %cli.host, port = cli.port, command = %cli.command, "sending");
        let reply = exchange(&cli.host, cli.port, &cli.command, timeout)
            .with_context(|| format!("exchange with {}:{} failed", cli.host, cli.port))?;
        println!("{reply}");
    }

    Ok(())
}
