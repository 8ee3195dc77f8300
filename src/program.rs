use std::fmt;
use std::io::{self, Write};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::encoder::{encode_tokens, tokenize, Word};
use crate::error::{AsmError, LineError};

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct AsmConfig {
    pub capacity: usize, // lines, including ones that never produce output
}

impl Default for AsmConfig {
    fn default() -> Self {
        Self { capacity: 4096 }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum State {
    Accumulating,
    /// An unsupported instruction was seen; no further words are emitted.
    Halted,
}

/// An unsupported instruction the run recovered from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub line: usize,
    pub mnemonic: String,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}: invalid instruction `{}`", self.line, self.mnemonic)
    }
}

/// Words assembled so far, in input order.
///
/// The first unsupported mnemonic halts output: every line after it is
/// still encoded, and still aborts the run on a fatal error, but its word
/// is dropped.
#[derive(Debug, Clone)]
pub struct Program {
    cfg: AsmConfig,
    words: Vec<Word>,
    lines: usize,
    state: State,
    diagnostics: Vec<Diagnostic>,
}

impl Program {
    pub fn new(cfg: AsmConfig) -> Self {
        Self {
            cfg,
            words: Vec::new(),
            lines: 0,
            state: State::Accumulating,
            diagnostics: Vec::new(),
        }
    }

    /// Consume one source line.
    pub fn push_line(&mut self, line: &str) -> Result<(), LineError> {
        let lineno = self.lines + 1;
        if self.lines >= self.cfg.capacity {
            return Err(LineError {
                line: lineno,
                kind: AsmError::CapacityExceeded { capacity: self.cfg.capacity },
            });
        }
        self.lines = lineno;

        match encode_tokens(&tokenize(line)) {
            Ok(word) => match self.state {
                State::Accumulating => self.words.push(word),
                State::Halted => debug!(line = lineno, word, "dropped after halt"),
            },
            Err(AsmError::UnsupportedInstruction { mnemonic }) => {
                warn!(line = lineno, %mnemonic, "invalid instruction");
                self.diagnostics.push(Diagnostic { line: lineno, mnemonic });
                self.state = State::Halted;
            }
            Err(kind) => return Err(LineError { line: lineno, kind }),
        }
        Ok(())
    }

    pub fn words(&self) -> &[Word] {
        &self.words
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn state(&self) -> State {
        self.state
    }

    pub fn lines(&self) -> usize {
        self.lines
    }

    /// Render one unsigned decimal word per line.
    pub fn write_to<W: Write>(&self, mut out: W) -> io::Result<()> {
        for w in &self.words {
            writeln!(out, "{w}")?;
        }
        out.flush()
    }

    pub fn render(&self) -> String {
        self.words.iter().map(|w| format!("{w}\n")).collect()
    }
}

/// Assemble a whole source text.
pub fn assemble_str(src: &str, cfg: AsmConfig) -> Result<Program, LineError> {
    let mut prog = Program::new(cfg);
    for line in src.lines() {
        prog.push_line(line)?;
    }
    Ok(prog)
}
