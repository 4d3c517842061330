//! The intermediate representation the emitters produce. Every fragment of the output is
//! a list of declaration or case records, [`crate::format`] turns them into source text.

use proc_macro2::Ident;
use strum_macros::Display;

use crate::encoding::{EncodingDescriptor, Width};
use crate::table::OperandKind;

/// `use` declarations the other fragments depend on
#[derive(Debug, Clone)]
pub struct Prelude {
    pub imports: Vec<syn::Path>,
}

/// `pub const <name>: u8 = <opcode>;`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConstDecl {
    pub name: Ident,
    pub opcode: u8,
}

#[derive(Debug, Clone)]
pub struct UnionDef {
    pub name: Ident,
    pub variants: Vec<VariantDef>,
}

/// A variant of the tagged union, its discriminant is the opcode constant
#[derive(Debug, Clone)]
pub struct VariantDef {
    pub name: Ident,
    pub payload: Option<syn::Type>,
    pub discriminant: Ident,
}

#[derive(Debug, Clone)]
pub struct RenderFn {
    pub union: Ident,
    pub cases: Vec<RenderCase>,
}

/// renders `mnemonic` or `mnemonic(operand)`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderCase {
    pub variant: Ident,
    pub mnemonic: String,
    pub has_operand: bool,
}

#[derive(Debug, Clone)]
pub struct EncodeFn {
    pub union: Ident,
    pub name: Ident,
    pub encoding: Ident,
    pub cases: Vec<EncodeCase>,
}

/// returns `(constant, operand or 0, width)`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodeCase {
    pub variant: Ident,
    pub constant: Ident,
    /// the value of `constant`
    pub opcode: u8,
    pub operand: OperandKind,
    pub width: Width,
}

impl EncodeCase {
    /// what the generated function returns for this case, given the runtime operand
    pub fn descriptor(&self, operand: Option<usize>) -> EncodingDescriptor {
        EncodingDescriptor::new(self.opcode, self.operand, operand)
    }
}

/// One of the five parts of the output, in the order the driver writes them
#[derive(Debug, Clone, Display)]
pub enum Fragment {
    #[strum(serialize = "prelude")]
    Prelude(Prelude),
    #[strum(serialize = "constants")]
    Constants(Vec<ConstDecl>),
    #[strum(serialize = "union")]
    Union(UnionDef),
    #[strum(serialize = "render")]
    Render(RenderFn),
    #[strum(serialize = "encode")]
    Encode(EncodeFn),
}
