use std::{env, fs::File, io::BufWriter, path::Path};

use anyhow::{Context, Result};
use bakht_isa::{config::Config, driver, table::Table};

fn main() -> Result<()> {
    println!("cargo:rerun-if-changed=build.rs");

    let out_dir = env::var("OUT_DIR")?;
    let dest_path = Path::new(&out_dir).join("bin.rs");
    let f = File::create(&dest_path)
        .with_context(|| format!("creating {}", dest_path.display()))?;
    driver::run(Table::bakht(), &Config::default(), BufWriter::new(f))
        .context("generating the instruction set")
}
