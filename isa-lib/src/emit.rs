//! The emitters. Each one derives one fragment of the output from the table and the opcode
//! map. They don't depend on each other, consistency comes from reading the same inputs
//! in the same order.

use proc_macro2::{Ident, Span};
use syn::parse_quote;

use crate::config::Config;
use crate::encoding;
use crate::ir::*;
use crate::opcode::OpcodeMap;
use crate::table::{OperandKind, Table};

fn ident(name: &str) -> Ident {
    Ident::new(name, Span::call_site())
}

/// the rust type that holds an operand of this kind
fn payload_type(operand: OperandKind) -> Option<syn::Type> {
    match operand {
        OperandKind::None => None,
        OperandKind::Variadic => Some(parse_quote!(usize)),
        OperandKind::Fixed2 => Some(parse_quote!(u16)),
    }
}

pub fn prelude(config: &Config) -> syn::Result<Fragment> {
    let encoding: syn::Path = syn::parse_str(&config.encoding_path)?;
    Ok(Fragment::Prelude(Prelude {
        imports: vec![encoding],
    }))
}

pub fn constants(table: &Table, opcodes: &OpcodeMap, config: &Config) -> Fragment {
    Fragment::Constants(
        table
            .iter()
            .zip(opcodes.iter())
            .map(|(def, &opcode)| ConstDecl {
                name: ident(&config.const_name(&def.name)),
                opcode,
            })
            .collect(),
    )
}

pub fn union(table: &Table, config: &Config) -> Fragment {
    let variants = table
        .iter()
        .map(|def| VariantDef {
            name: ident(&config.variant_name(&def.name)),
            payload: payload_type(def.operand),
            discriminant: ident(&config.const_name(&def.name)),
        })
        .collect();
    Fragment::Union(UnionDef {
        name: ident(&config.union_name),
        variants,
    })
}

pub fn render(table: &Table, config: &Config) -> Fragment {
    let cases = table
        .iter()
        .map(|def| RenderCase {
            variant: ident(&config.variant_name(&def.name)),
            mnemonic: def.name.clone(),
            has_operand: def.operand.has_operand(),
        })
        .collect();
    Fragment::Render(RenderFn {
        union: ident(&config.union_name),
        cases,
    })
}

pub fn metadata(table: &Table, opcodes: &OpcodeMap, config: &Config) -> Fragment {
    let cases = table
        .iter()
        .zip(opcodes.iter())
        .map(|(def, &opcode)| {
            let width = encoding::classify(def.operand);
            tracing::debug!(instruction = %def.name, operand = %def.operand, %width, "classified");
            EncodeCase {
                variant: ident(&config.variant_name(&def.name)),
                constant: ident(&config.const_name(&def.name)),
                opcode,
                operand: def.operand,
                width,
            }
        })
        .collect();
    Fragment::Encode(EncodeFn {
        union: ident(&config.union_name),
        name: ident(&config.encode_fn),
        encoding: ident(config.encoding_name()),
        cases,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoding::{EncodingDescriptor, Width};

    fn bakht() -> (&'static Table, OpcodeMap, Config) {
        let table = Table::bakht();
        (table, OpcodeMap::derive(table), Config::default())
    }

    #[test]
    fn test_one_entry_per_instruction() {
        let (table, opcodes, config) = bakht();
        let Fragment::Constants(consts) = constants(table, &opcodes, &config) else {
            panic!("expected constants");
        };
        let Fragment::Union(def) = union(table, &config) else {
            panic!("expected a union");
        };
        let Fragment::Render(render_fn) = render(table, &config) else {
            panic!("expected a render fn");
        };
        let Fragment::Encode(encode_fn) = metadata(table, &opcodes, &config) else {
            panic!("expected an encode fn");
        };

        assert_eq!(consts.len(), table.len());
        assert_eq!(def.variants.len(), table.len());
        assert_eq!(render_fn.cases.len(), table.len());
        assert_eq!(encode_fn.cases.len(), table.len());

        for (i, instr) in table.iter().enumerate() {
            let variant = config.variant_name(&instr.name);
            assert_eq!(def.variants[i].name, variant);
            assert_eq!(render_fn.cases[i].variant, variant);
            assert_eq!(encode_fn.cases[i].variant, variant);
            assert_eq!(render_fn.cases[i].mnemonic, instr.name);
        }
    }

    #[test]
    fn test_constants_and_metadata_agree() {
        let (table, opcodes, config) = bakht();
        let Fragment::Constants(consts) = constants(table, &opcodes, &config) else {
            panic!("expected constants");
        };
        let Fragment::Encode(encode_fn) = metadata(table, &opcodes, &config) else {
            panic!("expected an encode fn");
        };
        let Fragment::Union(def) = union(table, &config) else {
            panic!("expected a union");
        };

        for ((decl, case), variant) in consts.iter().zip(&encode_fn.cases).zip(&def.variants) {
            assert_eq!(decl.name, case.constant);
            assert_eq!(decl.opcode, case.opcode);
            assert_eq!(decl.name, variant.discriminant);
        }
    }

    #[test]
    fn test_payloads_and_widths() {
        let table = Table::from_rows(&[
            ("add", OperandKind::None),
            ("load", OperandKind::Variadic),
            ("jmp", OperandKind::Fixed2),
        ]);
        let opcodes = OpcodeMap::derive(&table);
        let config = Config::default();

        let Fragment::Union(def) = union(&table, &config) else {
            panic!("expected a union");
        };
        let usize_t: syn::Type = parse_quote!(usize);
        let u16_t: syn::Type = parse_quote!(u16);
        assert_eq!(def.variants[0].payload, None);
        assert_eq!(def.variants[1].payload, Some(usize_t));
        assert_eq!(def.variants[2].payload, Some(u16_t));

        let Fragment::Encode(encode_fn) = metadata(&table, &opcodes, &config) else {
            panic!("expected an encode fn");
        };
        let widths: Vec<_> = encode_fn.cases.iter().map(|c| c.width).collect();
        assert_eq!(widths, [Width::None, Width::Variadic, Width::Fixed(2)]);
        assert_eq!(
            encode_fn.cases[0].descriptor(None),
            EncodingDescriptor {
                opcode: 0,
                operand: 0,
                width: Width::None
            }
        );
        assert_eq!(encode_fn.cases[2].descriptor(Some(7)).opcode, 0b0010_0010);
        assert_eq!(encode_fn.encoding, "Encoding");
    }

    #[test]
    fn test_prelude_rejects_bad_paths() {
        let config = Config {
            encoding_path: "crate::assemble::".into(),
            ..Config::default()
        };
        assert!(prelude(&config).is_err());
        assert!(prelude(&Config::default()).is_ok());
    }
}
