//! `parquet-mirror` — continuous one-way directory mirror.
//!
//! Watches the raw drop directory and resyncs its top-level contents into
//! the final directory on every change notification. Runs until SIGINT or
//! SIGTERM; exits 0 on graceful shutdown, 1 on missing directories at
//! startup or any resync failure.

use std::process;

use anyhow::Context;
use clap::Parser;

use millstream_cli::{print_debug_paths, VerbosityArg};
use millstream_core::{logging, shutdown, Settings, ShutdownSignal, Verbosity};
use millstream_mirror::{service, SyncPair};

#[derive(Parser, Debug)]
#[command(
    name = "parquet-mirror",
    version,
    about = "Mirror the raw Parquet drop directory into the final directory",
    long_about = None,
)]
struct Cli {
    /// Log detail level; `debug` also mirrors records to stderr.
    #[arg(long, default_value_t = VerbosityArg::default())]
    verbosity: VerbosityArg,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let verbosity = Verbosity::from(cli.verbosity);

    dotenvy::dotenv().ok();
    let settings = Settings::from_env();

    let log_path = match logging::init(verbosity, "parquet-mirror.log", settings.log_dir()) {
        Ok(path) => path,
        Err(err) => {
            eprintln!("parquet-mirror: failed to set up logging: {err}");
            process::exit(1);
        }
    };
    if verbosity == Verbosity::Debug {
        print_debug_paths(&settings, &log_path);
    }

    let shutdown_signal = ShutdownSignal::new();
    let _signal_listener = shutdown::spawn_signal_listener(&shutdown_signal);

    let pair = SyncPair::from_settings(&settings);
    let result = service::run(pair, &shutdown_signal)
        .await
        .context("mirror service failed");
    if let Err(err) = result {
        tracing::error!("{err:#}");
        process::exit(1);
    }
}
