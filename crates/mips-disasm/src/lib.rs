pub mod model;

pub use model::{load_words, parse_words, Listing};

use mips_asm::decoder::{Decoder, Mips32Decoder};
use mips_asm::disasm::fmt_decoded;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct InsnOut {
    pub addr: u32,
    pub word: u32,
    pub text: String,
}

/// Disassemble every word of a listing; unknown encodings become `.word`.
pub fn disassemble(listing: &Listing) -> Vec<InsnOut> {
    let dec = Mips32Decoder::new();
    listing
        .words
        .iter()
        .enumerate()
        .map(|(i, &word)| {
            let text = match dec.decode(word) {
                Some(d) => fmt_decoded(&d),
                None => format!(".word {word:#010x}"),
            };
            InsnOut { addr: listing.addr_of(i), word, text }
        })
        .collect()
}
