use std::process::ExitCode;

use clap::Parser;
use stable_bridgegen::cli::{Cli, execute};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init();
}

fn main() -> ExitCode {
    init_tracing();
    execute(Cli::parse(), &mut std::io::stdout())
}
