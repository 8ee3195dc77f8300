use anyhow::{Context, Result};
use std::path::Path;

pub use mips_asm::memory::parse_words;

/// Words as written by `mips-asm`, placed at consecutive addresses.
#[derive(Debug, Clone)]
pub struct Listing {
    pub base: u32,
    pub words: Vec<u32>,
}

impl Listing {
    pub fn addr_of(&self, index: usize) -> u32 {
        self.base.wrapping_add((index as u32).wrapping_mul(4))
    }
}

pub fn load_words(path: &Path, base: u32) -> Result<Listing> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))?;
    anyhow::ensure!(base % 4 == 0, "--base must be word aligned");
    Ok(Listing { base, words: parse_words(&text)? })
}
