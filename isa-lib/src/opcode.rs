//! Derives the opcode byte of every instruction.
//!
//! An opcode is the table index of the instruction, with [`RESERVED_BIT`] set if the
//! instruction carries an operand. That way a decoder can tell the arity of an instruction
//! by masking the byte, without a side table. The price is that only indices 0-31 are
//! usable, and the assembler uses bits 6 and 7 to store the size of the operand, so
//! those must stay clear as well.

use derive_more::Deref;
use thiserror::Error;

use crate::table::{OperandKind, Table};

/// set in the opcode of every instruction that carries an operand
pub const RESERVED_BIT: u8 = 0b0010_0000;

/// table indices must stay below this, or they run into the reserved bit
pub const MAX_INDEX: usize = RESERVED_BIT as usize - 1;

/// The opcode of the instruction at `index`. Nothing is checked, an index past
/// [`MAX_INDEX`] silently produces a colliding opcode.
pub fn opcode(index: usize, operand: OperandKind) -> u8 {
    let flag = if operand.has_operand() { RESERVED_BIT } else { 0 };
    index as u8 | flag
}

/// whether the instruction behind this opcode carries an operand
pub fn has_operand(opcode: u8) -> bool {
    opcode & RESERVED_BIT != 0
}

/// recovers the table index from an opcode
pub fn table_index(opcode: u8) -> usize {
    (opcode & MAX_INDEX as u8) as usize
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum AllocationError {
    #[error("Instruction {name:?} sits at index {index}, opcodes only have room for {max} indices")]
    IndexOutOfRange {
        name: String,
        index: usize,
        max: usize,
    },

    #[error("Opcode {opcode:#04x} is claimed by both {first:?} and {second:?}")]
    Collision {
        opcode: u8,
        first: String,
        second: String,
    },
}

/// The opcode of every row of a table, indexed like the table. The emitters read opcodes
/// from here instead of recomputing them, so all artifacts agree on one assignment.
#[derive(Debug, Clone, PartialEq, Eq, Deref)]
pub struct OpcodeMap(Vec<u8>);

impl OpcodeMap {
    /// applies [`opcode`] to every row, without any checks
    pub fn derive(table: &Table) -> Self {
        OpcodeMap(
            table
                .iter()
                .enumerate()
                .map(|(i, def)| opcode(i, def.operand))
                .collect(),
        )
    }

    /// Like [`OpcodeMap::derive`], but every opcode has to claim a free slot, and no index
    /// may reach into the reserved bit.
    pub fn allocate(table: &Table) -> Result<Self, AllocationError> {
        let mut slots: [Option<usize>; 256] = [None; 256];
        let mut opcodes = Vec::with_capacity(table.len());

        for (index, def) in table.iter().enumerate() {
            if index > MAX_INDEX {
                return Err(AllocationError::IndexOutOfRange {
                    name: def.name.clone(),
                    index,
                    max: MAX_INDEX + 1,
                });
            }
            let op = opcode(index, def.operand);
            let slot = &mut slots[op as usize];
            if let Some(owner) = *slot {
                return Err(AllocationError::Collision {
                    opcode: op,
                    first: table[owner].name.clone(),
                    second: def.name.clone(),
                });
            }
            *slot = Some(index);
            opcodes.push(op);
        }

        tracing::debug!(count = opcodes.len(), "allocated opcodes");
        Ok(OpcodeMap(opcodes))
    }
}
