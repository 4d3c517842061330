use anyhow::{Context, Result};
use clap::Parser;

use bakht_isa::config::Config;
use bakht_isa::driver;
use bakht_isa::table::Table;

use std::io::{stdout, BufWriter};

/// Prints the generated Bakht instruction set to stdout. The table is compiled in, there
/// is nothing to configure.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter("info")
        .with_target(false)
        .with_ansi(false)
        .with_writer(std::io::stderr)
        .init();

    Cli::parse();

    let out = BufWriter::new(stdout().lock());
    driver::run(Table::bakht(), &Config::default(), out).context("generating the instruction set")
}
