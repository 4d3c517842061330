//! Generates the instruction set of the Bakht VM from a single table.
//!
//! What you need to do to get the generated source is the following:
//! 1. get a [`table::Table`], usually [`table::Table::bakht`]
//! 1. optionally check it with [`table::Table::validate`]
//! 1. assign opcodes with [`opcode::OpcodeMap::allocate`], or [`opcode::OpcodeMap::derive`] if you
//!    trust the table
//! 1. call [`driver::generate`] with a [`config::Config`]
//!
//! [`driver::run`] does all of that and writes the result:
//!
//! ```
//! use bakht_isa::{config::Config, driver, table::Table};
//!
//! let mut out = vec![];
//! driver::run(Table::bakht(), &Config::default(), &mut out).unwrap();
//! assert!(String::from_utf8(out).unwrap().contains("pub const IPOP: u8 = 45;"));
//! ```
//!
//! The output consists of five parts: the prelude, one opcode constant per instruction, the
//! `Instruction` enum whose discriminants are those constants, a `Display` impl and
//! `Instruction::encode_params`. The emitters in [`emit`] build an intermediate
//! representation ([`ir`]), which [`format`] renders.
pub mod config;
pub mod driver;
pub mod emit;
pub mod encoding;
pub mod format;
pub mod ir;
pub mod opcode;
pub mod table;
pub mod utils;
