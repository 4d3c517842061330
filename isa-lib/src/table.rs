//! The instruction table, the single source of truth for every generated artifact.
//!
//! The order of the rows matters: an instruction's opcode is derived from its index,
//! so reordering the table renumbers every opcode.

use derive_more::Deref;
use itertools::Itertools;
use once_cell::sync::Lazy;
use strum_macros::Display;
use thiserror::Error;

use crate::config::Config;

/// How the operand of an instruction is stored and encoded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[strum(serialize_all = "snake_case")]
pub enum OperandKind {
    /// no operand at all
    None,
    /// a usize, encoded in as few bytes as possible
    Variadic,
    /// a u16, always encoded in two bytes. Used for jump targets
    Fixed2,
}

impl OperandKind {
    pub fn has_operand(self) -> bool {
        self != OperandKind::None
    }
}

/// One row of the table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstructionDef {
    pub name: String,
    pub operand: OperandKind,
}

impl InstructionDef {
    pub fn new(name: impl Into<String>, operand: OperandKind) -> Self {
        InstructionDef {
            name: name.into(),
            operand,
        }
    }
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum TableError {
    #[error("The instruction table is empty")]
    Empty,

    #[error("Instruction {index} has an empty name")]
    EmptyName { index: usize },

    #[error("Invalid instruction name {name:?}: {reason}")]
    InvalidName { name: String, reason: &'static str },

    #[error("Instruction {name:?} is defined twice, at {first} and {second}")]
    DuplicateName {
        name: String,
        first: usize,
        second: usize,
    },
}

/// An ordered sequence of instruction definitions. Nothing is checked on construction,
/// call [`Table::validate`] for that.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deref)]
pub struct Table(Vec<InstructionDef>);

const BAKHT_ROWS: &[(&str, OperandKind)] = {
    use OperandKind::*;
    &[
        ("nop", None),
        ("add", None),
        ("sub", None),
        ("mult", None),
        ("div", None),
        ("eq", None),
        ("ne", None),
        ("ge", None),
        ("le", None),
        ("gt", None),
        ("lt", None),
        ("set", None),
        ("get", None),
        ("pop", Variadic),
        ("ret", None),
        ("load", Variadic),
        ("store", Variadic),
        ("call", Variadic),
        ("konst", Variadic),
        ("nil", None),
        ("true", None),
        ("false", None),
        ("anew", Variadic),
        ("mod", None),
        ("jmp", Fixed2),
        ("jf", Fixed2),
    ]
};

static BAKHT: Lazy<Table> = Lazy::new(|| Table::from_rows(BAKHT_ROWS));

impl Table {
    pub fn new(defs: Vec<InstructionDef>) -> Self {
        Table(defs)
    }

    pub fn from_rows(rows: &[(&str, OperandKind)]) -> Self {
        Table(
            rows.iter()
                .map(|(name, operand)| InstructionDef::new(*name, *operand))
                .collect(),
        )
    }

    /// The instruction set of the Bakht VM
    pub fn bakht() -> &'static Table {
        &BAKHT
    }

    /// Checks the invariants the generated code relies on: the table is not empty, and
    /// every name is unique, lowercase and yields valid identifiers under `config`.
    /// Opcode collisions are found by [`crate::opcode::OpcodeMap::allocate`].
    pub fn validate(&self, config: &Config) -> Result<(), TableError> {
        if self.is_empty() {
            return Err(TableError::Empty);
        }

        for (index, def) in self.iter().enumerate() {
            check_name(index, &def.name, config)?;
        }

        let duplicate = self
            .iter()
            .enumerate()
            .tuple_combinations()
            .find(|((_, a), (_, b))| a.name == b.name);
        if let Some(((first, def), (second, _))) = duplicate {
            return Err(TableError::DuplicateName {
                name: def.name.clone(),
                first,
                second,
            });
        }

        Ok(())
    }
}

fn check_name(index: usize, name: &str, config: &Config) -> Result<(), TableError> {
    let invalid = |reason| {
        Err(TableError::InvalidName {
            name: name.to_owned(),
            reason,
        })
    };

    let Some(first) = name.chars().next() else {
        return Err(TableError::EmptyName { index });
    };
    if !first.is_ascii_lowercase() {
        return invalid("must start with a lowercase letter");
    }
    if !name
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
    {
        return invalid("may only contain lowercase letters and digits");
    }
    if syn::parse_str::<syn::Ident>(&config.variant_name(name)).is_err() {
        return invalid("the variant name is not a valid identifier");
    }
    if syn::parse_str::<syn::Ident>(&config.const_name(name)).is_err() {
        return invalid("the constant name is not a valid identifier");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use OperandKind::*;

    #[test]
    fn test_bakht_table_is_valid() {
        let table = Table::bakht();
        assert_eq!(table.len(), 26);
        assert_eq!(table.validate(&Config::default()), Ok(()));
    }

    #[test]
    fn test_order_is_kept() {
        let table = Table::bakht();
        assert_eq!(table[0], InstructionDef::new("nop", None));
        assert_eq!(table[13], InstructionDef::new("pop", Variadic));
        assert_eq!(table[25], InstructionDef::new("jf", Fixed2));
    }

    #[test]
    fn test_duplicate_names() {
        let table = Table::from_rows(&[("add", None), ("load", Variadic), ("add", None)]);
        assert_eq!(
            table.validate(&Config::default()),
            Err(TableError::DuplicateName {
                name: "add".into(),
                first: 0,
                second: 2
            })
        );
    }

    #[test]
    fn test_empty_table() {
        assert_eq!(
            Table::default().validate(&Config::default()),
            Err(TableError::Empty)
        );
    }

    #[test]
    fn test_invalid_names() {
        let config = Config::default();
        let check = |name: &str| Table::from_rows(&[(name, None)]).validate(&config);

        assert_eq!(check(""), Err(TableError::EmptyName { index: 0 }));
        assert!(matches!(check("Add"), Err(TableError::InvalidName { .. })));
        assert!(matches!(check("jump_if"), Err(TableError::InvalidName { .. })));
        assert!(matches!(check("9lives"), Err(TableError::InvalidName { .. })));
        // `Self` can't be a variant name
        assert!(matches!(check("self"), Err(TableError::InvalidName { .. })));
        assert_eq!(check("add2"), Ok(()));
    }

    #[test]
    fn test_operand_kind_display() {
        assert_eq!(Fixed2.to_string(), "fixed2");
        assert_eq!(Variadic.to_string(), "variadic");
        assert!(!None.has_operand());
        assert!(Fixed2.has_operand());
    }
}
