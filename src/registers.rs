use crate::error::AsmError;

/// Canonical MIPS register names, indexed by register number.
pub static REGISTER_NAMES: [&str; 32] = [
    "$zero", "$at", "$v0", "$v1", "$a0", "$a1", "$a2", "$a3", "$t0", "$t1", "$t2", "$t3",
    "$t4", "$t5", "$t6", "$t7", "$s0", "$s1", "$s2", "$s3", "$s4", "$s5", "$s6", "$s7",
    "$t8", "$t9", "$k0", "$k1", "$gp", "$sp", "$fp", "$ra",
];

pub const REG_ZERO: u8 = 0;
/// Link register written by `jal`
pub const REG_RA: u8 = 31;

/// Resolve a register name such as `$t0` to its index.
pub fn resolve(name: &str) -> Result<u8, AsmError> {
    REGISTER_NAMES
        .iter()
        .position(|&n| n == name)
        .map(|i| i as u8)
        .ok_or_else(|| AsmError::UnknownRegister { name: name.to_string() })
}

pub fn name(index: u8) -> Option<&'static str> {
    REGISTER_NAMES.get(index as usize).copied()
}
