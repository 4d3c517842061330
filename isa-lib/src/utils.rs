//! contains small naming helpers that have nowhere else to go

/// upper-cases the first character, `konst` becomes `Konst`
pub fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// the name of the opcode constant for an instruction, `pop` with prefix `I` becomes `IPOP`
pub fn const_name(prefix: &str, name: &str) -> String {
    format!("{}{}", prefix, name.to_uppercase())
}
