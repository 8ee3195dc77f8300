use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

use crate::encoder::Word;

pub trait Bus {
    fn read_u32(&mut self, addr: u32) -> Result<u32>;
    fn write_u32(&mut self, addr: u32, val: u32) -> Result<()>;
}

/// Word-addressed data memory. Byte address `a` maps to word `a / 4`.
#[derive(Clone, Serialize, Deserialize)]
pub struct WordMemory {
    pub words: Vec<u32>,
}

impl WordMemory {
    pub fn new(words: usize) -> Self {
        Self { words: vec![0; words] }
    }

    /// Apply `index-value` lines, e.g. `3-42` or `7--1`. Blank lines are skipped.
    pub fn load_init(&mut self, text: &str) -> Result<()> {
        for (i, line) in text.lines().enumerate() {
            let t = line.trim();
            if t.is_empty() {
                continue;
            }
            let (index, value) = t
                .split_once('-')
                .with_context(|| format!("line {}: expected index-value, got `{}`", i + 1, t))?;
            let index: usize = index
                .parse()
                .with_context(|| format!("line {}: bad index `{}`", i + 1, index))?;
            let value: i64 = value
                .parse()
                .with_context(|| format!("line {}: bad value `{}`", i + 1, value))?;
            let len = self.words.len();
            let slot = self
                .words
                .get_mut(index)
                .with_context(|| format!("line {}: index {} outside {} words", i + 1, index, len))?;
            *slot = value as u32;
        }
        Ok(())
    }

    fn slot(&self, addr: u32) -> Result<usize> {
        let index = (addr / 4) as usize;
        if index >= self.words.len() {
            bail!("address {addr:#x} outside {} words of data memory", self.words.len());
        }
        Ok(index)
    }
}

impl Bus for WordMemory {
    fn read_u32(&mut self, addr: u32) -> Result<u32> {
        let i = self.slot(addr)?;
        Ok(self.words[i])
    }
    fn write_u32(&mut self, addr: u32, val: u32) -> Result<()> {
        let i = self.slot(addr)?;
        self.words[i] = val;
        Ok(())
    }
}

/// Read-only program store. Fetches past the end read as 0, which the
/// pipeline treats as a bubble.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InstructionMemory {
    pub words: Vec<Word>,
}

impl InstructionMemory {
    pub fn new(words: Vec<Word>, capacity: usize) -> Result<Self> {
        if words.len() > capacity {
            bail!("program has {} words, instruction memory holds {}", words.len(), capacity);
        }
        Ok(Self { words })
    }

    pub fn fetch(&self, pc: u32) -> Word {
        self.words.get((pc / 4) as usize).copied().unwrap_or(0)
    }
}

/// Parse a listing of unsigned decimal words, one per line, as written by
/// [`crate::Program::write_to`]. Blank lines are skipped.
pub fn parse_words(text: &str) -> Result<Vec<Word>> {
    let mut words = Vec::new();
    for (i, line) in text.lines().enumerate() {
        let t = line.trim();
        if t.is_empty() {
            continue;
        }
        let w = t
            .parse::<Word>()
            .with_context(|| format!("line {}: bad word `{}`", i + 1, t))?;
        words.push(w);
    }
    Ok(words)
}
