//! Fixed-width binary strings.
//!
//! Fields are rendered MSB first as `0`/`1` text. Negative values are
//! stored as their two's-complement pattern modulo `2^width`, and values
//! too wide for their field wrap without error. Decoding always yields the
//! unsigned pattern, so `-1` at width 5 comes back as 31.

/// A value together with the number of bits it occupies in a word.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BitField {
    pub value: i64,
    pub width: usize,
}

impl BitField {
    pub const fn new(value: i64, width: usize) -> Self {
        Self { value, width }
    }

    pub fn encode(&self) -> String {
        encode_field(self.value, self.width)
    }
}

/// Encode `value` as exactly `width` binary digits.
pub fn encode_field(value: i64, width: usize) -> String {
    debug_assert!(width <= 64, "field wider than 64 bits");
    // i128 keeps 2^64 representable for the modulus
    let modulus = 1i128 << width;
    let pattern = (value as i128).rem_euclid(modulus) as u64;
    format!("{pattern:0width$b}")
}

/// Reconstruct the unsigned value of a binary string. Characters other
/// than `1` count as clear bits.
pub fn decode_bits(bits: &str) -> u64 {
    let mut num = 0u64;
    let mut pow = 1u64;
    for b in bits.bytes().rev() {
        if b == b'1' {
            num = num.wrapping_add(pow);
        }
        pow = pow.wrapping_shl(1);
    }
    num
}

/// Concatenate fields in order, first field ending up most significant.
pub fn concat(fields: &[BitField]) -> String {
    fields.iter().map(BitField::encode).collect()
}

pub fn total_width(fields: &[BitField]) -> usize {
    fields.iter().map(|f| f.width).sum()
}
