//! Classifies operands by how the assembler serializes them

use strum_macros::Display;

use crate::table::OperandKind;

/// The serialization strategy for an operand
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum Width {
    /// no operand bytes
    None,
    /// always exactly this many bytes
    Fixed(u8),
    /// as few bytes as the value needs, 1, 2, 4 or 8
    Variadic,
}

pub fn classify(operand: OperandKind) -> Width {
    match operand {
        OperandKind::None => Width::None,
        OperandKind::Variadic => Width::Variadic,
        OperandKind::Fixed2 => Width::Fixed(2),
    }
}

/// What the generated encoding-metadata function returns for one instruction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncodingDescriptor {
    pub opcode: u8,
    /// the operand widened to usize, 0 if there is none
    pub operand: usize,
    pub width: Width,
}

impl EncodingDescriptor {
    pub fn new(opcode: u8, kind: OperandKind, operand: Option<usize>) -> Self {
        EncodingDescriptor {
            opcode,
            operand: if kind.has_operand() {
                operand.unwrap_or(0)
            } else {
                0
            },
            width: classify(kind),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify() {
        assert_eq!(classify(OperandKind::Fixed2), Width::Fixed(2));
        assert_eq!(classify(OperandKind::Variadic), Width::Variadic);
        assert_eq!(classify(OperandKind::None), Width::None);
    }

    #[test]
    fn test_width_names() {
        // these end up in the debug log of the metadata emitter
        assert_eq!(Width::Fixed(2).to_string(), "Fixed");
        assert_eq!(Width::Variadic.to_string(), "Variadic");
        assert_eq!(Width::None.to_string(), "None");
    }

    #[test]
    fn test_descriptor_placeholder() {
        let plain = EncodingDescriptor::new(1, OperandKind::None, Some(12));
        assert_eq!(plain.operand, 0);
        assert_eq!(plain.width, Width::None);

        let jump = EncodingDescriptor::new(56, OperandKind::Fixed2, Some(300));
        assert_eq!(
            jump,
            EncodingDescriptor {
                opcode: 56,
                operand: 300,
                width: Width::Fixed(2)
            }
        );
    }
}
