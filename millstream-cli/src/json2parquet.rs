//! `json2parquet` — one-shot JSON to Parquet conversion.
//!
//! Reads the configured JSON input file, writes a Parquet file into the
//! raw drop directory, and exits. Exit 0 on success; any I/O, parse, or
//! shape failure is logged and exits 1.

use std::process;

use anyhow::Context;
use clap::Parser;

use millstream_cli::{print_debug_paths, VerbosityArg};
use millstream_core::{logging, Settings, Verbosity};

#[derive(Parser, Debug)]
#[command(
    name = "json2parquet",
    version,
    about = "Convert a JSON dataset drop into a Parquet file",
    long_about = None,
)]
struct Cli {
    /// Log detail level; `debug` also mirrors records to stderr.
    #[arg(long, default_value_t = VerbosityArg::default())]
    verbosity: VerbosityArg,
}

fn main() {
    let cli = Cli::parse();
    let verbosity = Verbosity::from(cli.verbosity);

    dotenvy::dotenv().ok();
    let settings = Settings::from_env();

    let log_path = match logging::init(verbosity, "json2parquet.log", settings.log_dir()) {
        Ok(path) => path,
        Err(err) => {
            eprintln!("json2parquet: failed to set up logging: {err}");
            process::exit(1);
        }
    };
    if verbosity == Verbosity::Debug {
        print_debug_paths(&settings, &log_path);
    }

    let result = millstream_convert::convert_file(settings.json_input_file(), settings.raw_dir())
        .context("JSON to Parquet conversion failed");
    if let Err(err) = result {
        tracing::error!("{err:#}");
        process::exit(1);
    }
}
