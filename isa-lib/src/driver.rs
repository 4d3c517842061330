//! Runs the emitters in their fixed order and writes the result

use std::io::Write;

use thiserror::Error;

use crate::config::{Config, ConfigError};
use crate::emit;
use crate::format;
use crate::opcode::{AllocationError, OpcodeMap};
use crate::table::{Table, TableError};

#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("Invalid instruction table: {0}")]
    Table(#[from] TableError),

    #[error("Can't assign opcodes: {0}")]
    Allocation(#[from] AllocationError),

    #[error("Generated code doesn't parse, this is a bug: {0}")]
    Syntax(#[from] syn::Error),

    #[error("Writing the output failed: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Generates the prelude, the opcode constants, the tagged union, the rendering function and
/// the encoding-metadata function, in that order. Nothing about the table is checked.
pub fn generate(table: &Table, opcodes: &OpcodeMap, config: &Config) -> Result<String> {
    let fragments = [
        emit::prelude(config)?,
        emit::constants(table, opcodes, config),
        emit::union(table, config),
        emit::render(table, config),
        emit::metadata(table, opcodes, config),
    ];

    let mut out = String::new();
    for fragment in &fragments {
        tracing::debug!(%fragment, "emitting");
        if !out.is_empty() {
            out.push('\n');
        }
        out.push_str(&format::unparse(fragment)?);
    }
    Ok(out)
}

/// Validates the configuration and the table, assigns opcodes, generates everything and writes it to `out` in one
/// go. If anything fails, nothing is written.
pub fn run<W: Write>(table: &Table, config: &Config, mut out: W) -> Result<()> {
    config.validate()?;
    table.validate(config)?;
    let opcodes = OpcodeMap::allocate(table)?;
    let text = generate(table, &opcodes, config)?;

    out.write_all(text.as_bytes())?;
    out.flush()?;
    tracing::info!(
        instructions = table.len(),
        bytes = text.len(),
        "wrote instruction set"
    );
    Ok(())
}
