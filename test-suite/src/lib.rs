//! Compiles the generated instruction set the same way the Bakht VM does: the build script
//! writes it into `OUT_DIR`, and [`bin`] includes it next to the [`assemble`] module it
//! imports from.

pub mod assemble;

pub mod bin {
    include!(concat!(env!("OUT_DIR"), "/bin.rs"));
}
