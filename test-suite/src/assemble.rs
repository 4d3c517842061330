//! Turns instructions into bytecode and back, using the metadata from
//! `Instruction::encode_params`.
//!
//! The first byte of an encoded instruction is its opcode. Bits 6 and 7 hold the size of
//! the operand (1, 2, 4 or 8 bytes), the operand follows in little endian.

use bakht_isa::opcode;
use thiserror::Error;

use crate::bin::Instruction;

/// How the operand of an instruction is serialized
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Encoding {
    Fixed(u8),
    Variadic,
    None,
}

const SIZE_SHIFT: u8 = 6;
const SIZE_MASK: u8 = 0b1100_0000;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum Error {
    #[error("Operands can't be {0} bytes wide")]
    UnsupportedWidth(u8),

    #[error("Operand {operand} doesn't fit into {size} bytes")]
    OperandTooLarge { operand: usize, size: u8 },

    #[error("Bytecode ended in the middle of an instruction")]
    UnexpectedEnd,

    #[error("Operand {0} doesn't fit into usize on this platform")]
    OperandOverflow(u64),
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Bytecode {
    pub bytes: [u8; 9],
    pub len: u8,
}

impl Bytecode {
    pub fn as_slice(&self) -> &[u8] {
        &self.bytes[..self.len as usize]
    }
}

fn size_code(size: u8) -> Result<u8, Error> {
    match size {
        8 => Ok(3),
        4 => Ok(2),
        2 => Ok(1),
        1 => Ok(0),
        other => Err(Error::UnsupportedWidth(other)),
    }
}

pub fn encode_with_size(opcode: u8, operand: usize, size: u8) -> Result<Bytecode, Error> {
    let code = size_code(size)?;
    let wide = operand as u64;
    if size < 8 && wide >> (size as u32 * 8) != 0 {
        return Err(Error::OperandTooLarge { operand, size });
    }

    let mut bytecode = Bytecode {
        len: size + 1,
        ..Bytecode::default()
    };
    bytecode.bytes[0] = opcode | (code << SIZE_SHIFT);
    bytecode.bytes[1..=size as usize].copy_from_slice(&wide.to_le_bytes()[..size as usize]);
    Ok(bytecode)
}

/// the smallest size a variadic operand fits into
fn variadic_size(operand: usize) -> u8 {
    match operand as u64 {
        0..=0xff => 1,
        0x100..=0xffff => 2,
        0x1_0000..=0xffff_ffff => 4,
        _ => 8,
    }
}

pub fn encode(instruction: &Instruction) -> Result<Bytecode, Error> {
    let (opcode, operand, encoding) = instruction.encode_params();
    match encoding {
        Encoding::Fixed(size) => encode_with_size(opcode, operand, size),
        Encoding::Variadic => encode_with_size(opcode, operand, variadic_size(operand)),
        Encoding::None => {
            let mut bytecode = Bytecode {
                len: 1,
                ..Bytecode::default()
            };
            bytecode.bytes[0] = opcode;
            Ok(bytecode)
        }
    }
}

/// An instruction as read from bytecode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Decoded {
    pub opcode: u8,
    pub operand: Option<usize>,
    /// how many bytes the instruction took up
    pub len: usize,
}

/// Reads the instruction at the start of `bytes`. The arity comes from the opcode alone.
pub fn decode(bytes: &[u8]) -> Result<Decoded, Error> {
    let (&first, rest) = bytes.split_first().ok_or(Error::UnexpectedEnd)?;
    let op = first & !SIZE_MASK;
    if !opcode::has_operand(op) {
        return Ok(Decoded {
            opcode: op,
            operand: None,
            len: 1,
        });
    }

    let size = 1usize << ((first & SIZE_MASK) >> SIZE_SHIFT);
    let operand_bytes = rest.get(..size).ok_or(Error::UnexpectedEnd)?;
    let mut buf = [0u8; 8];
    buf[..size].copy_from_slice(operand_bytes);
    let wide = u64::from_le_bytes(buf);
    let operand = usize::try_from(wide).map_err(|_| Error::OperandOverflow(wide))?;
    Ok(Decoded {
        opcode: op,
        operand: Some(operand),
        len: size + 1,
    })
}
