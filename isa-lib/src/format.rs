//! Turns the intermediate representation into source text.
//!
//! Every ir node knows how to write itself as tokens, a whole fragment is then parsed into a
//! [`syn::File`] and pretty printed. Parsing doubles as a check that the tokens form valid
//! items.

use proc_macro2::{Literal, Span, TokenStream};
use quote::{quote, ToTokens};
use syn::LitStr;

use crate::encoding::Width;
use crate::ir::*;
use crate::table::OperandKind;

impl ToTokens for Prelude {
    fn to_tokens(&self, tokens: &mut TokenStream) {
        for path in &self.imports {
            tokens.extend(quote! { use #path; });
        }
    }
}

impl ToTokens for ConstDecl {
    fn to_tokens(&self, tokens: &mut TokenStream) {
        let name = &self.name;
        // unsuffixed, quote would print `45u8`
        let opcode = Literal::u8_unsuffixed(self.opcode);
        tokens.extend(quote! { pub const #name: u8 = #opcode; });
    }
}

impl ToTokens for VariantDef {
    fn to_tokens(&self, tokens: &mut TokenStream) {
        let name = &self.name;
        let disc = &self.discriminant;
        tokens.extend(match &self.payload {
            Some(ty) => quote! { #name(#ty) = #disc },
            None => quote! { #name = #disc },
        });
    }
}

impl ToTokens for UnionDef {
    fn to_tokens(&self, tokens: &mut TokenStream) {
        let name = &self.name;
        let variants = &self.variants;
        tokens.extend(quote! {
            #[derive(Debug, Clone, Copy, PartialEq, Eq)]
            #[repr(u8)]
            pub enum #name {
                #(#variants,)*
            }
        });
    }
}

impl ToTokens for RenderFn {
    fn to_tokens(&self, tokens: &mut TokenStream) {
        let union = &self.union;
        let arms = self.cases.iter().map(|case| {
            let variant = &case.variant;
            if case.has_operand {
                let fmt = LitStr::new(&format!("{}({{}})", case.mnemonic), Span::call_site());
                quote! { #union::#variant(operand) => write!(f, #fmt, operand), }
            } else {
                let mnemonic = &case.mnemonic;
                quote! { #union::#variant => f.write_str(#mnemonic), }
            }
        });
        tokens.extend(quote! {
            impl std::fmt::Display for #union {
                fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                    match self {
                        #(#arms)*
                    }
                }
            }
        });
    }
}

fn width_tokens(encoding: &syn::Ident, width: Width) -> TokenStream {
    match width {
        Width::None => quote! { #encoding::None },
        Width::Variadic => quote! { #encoding::Variadic },
        Width::Fixed(size) => {
            let size = Literal::u8_unsuffixed(size);
            quote! { #encoding::Fixed(#size) }
        }
    }
}

impl ToTokens for EncodeFn {
    fn to_tokens(&self, tokens: &mut TokenStream) {
        let union = &self.union;
        let encoding = &self.encoding;
        let arms = self.cases.iter().map(|case| {
            let variant = &case.variant;
            let constant = &case.constant;
            let width = width_tokens(encoding, case.width);
            match case.operand {
                OperandKind::None => quote! { #union::#variant => (#constant, 0, #width), },
                OperandKind::Variadic => {
                    quote! { #union::#variant(operand) => (#constant, *operand, #width), }
                }
                OperandKind::Fixed2 => quote! {
                    #union::#variant(operand) => (#constant, usize::from(*operand), #width),
                },
            }
        });
        let name = &self.name;
        tokens.extend(quote! {
            impl #union {
                pub fn #name(&self) -> (u8, usize, #encoding) {
                    match self {
                        #(#arms)*
                    }
                }
            }
        });
    }
}

impl ToTokens for Fragment {
    fn to_tokens(&self, tokens: &mut TokenStream) {
        match self {
            Fragment::Prelude(p) => p.to_tokens(tokens),
            Fragment::Constants(consts) => {
                for c in consts {
                    c.to_tokens(tokens);
                }
            }
            Fragment::Union(u) => u.to_tokens(tokens),
            Fragment::Render(r) => r.to_tokens(tokens),
            Fragment::Encode(e) => e.to_tokens(tokens),
        }
    }
}

/// pretty prints a single fragment
pub fn unparse(fragment: &Fragment) -> syn::Result<String> {
    let file: syn::File = syn::parse2(fragment.to_token_stream())?;
    Ok(prettyplease::unparse(&file))
}
