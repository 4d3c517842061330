//! Naming choices for the generated artifacts. These are compiled in, there is no
//! way to change them from the outside, but tests and other consumers of the library
//! can pass their own.

use thiserror::Error;

use crate::utils;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{field} {value:?} is not a valid identifier")]
    InvalidIdent { field: &'static str, value: String },

    #[error("encoding_path {0:?} is not a plain path")]
    InvalidPath(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// name of the generated tagged union
    pub union_name: String,
    /// prefix of every opcode constant
    pub const_prefix: String,
    /// path of the encoding-width type, imported by the prelude. Its last segment is
    /// the name used in the generated code.
    pub encoding_path: String,
    /// name of the encoding-metadata function
    pub encode_fn: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            union_name: "Instruction".into(),
            const_prefix: "I".into(),
            encoding_path: "crate::assemble::Encoding".into(),
            encode_fn: "encode_params".into(),
        }
    }
}

impl Config {
    pub fn const_name(&self, instruction: &str) -> String {
        utils::const_name(&self.const_prefix, instruction)
    }

    pub fn variant_name(&self, instruction: &str) -> String {
        utils::capitalize(instruction)
    }

    /// the last segment of [`Config::encoding_path`]
    pub fn encoding_name(&self) -> &str {
        self.encoding_path
            .rsplit("::")
            .next()
            .unwrap_or(&self.encoding_path)
    }

    /// Checks that every name ends up as a valid identifier in the generated code. Constant
    /// names depend on the instructions and are checked by [`crate::table::Table::validate`].
    pub fn validate(&self) -> Result<(), ConfigError> {
        let path: syn::Path = syn::parse_str(&self.encoding_path)
            .map_err(|_| ConfigError::InvalidPath(self.encoding_path.clone()))?;
        if path
            .segments
            .iter()
            .any(|seg| !matches!(seg.arguments, syn::PathArguments::None))
        {
            return Err(ConfigError::InvalidPath(self.encoding_path.clone()));
        }

        for (field, value) in [
            ("union_name", self.union_name.as_str()),
            ("encode_fn", self.encode_fn.as_str()),
            ("encoding_path", self.encoding_name()),
        ] {
            if syn::parse_str::<syn::Ident>(value).is_err() {
                return Err(ConfigError::InvalidIdent {
                    field,
                    value: value.to_owned(),
                });
            }
        }
        Ok(())
    }
}
