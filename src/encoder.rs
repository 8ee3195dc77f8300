use tracing::debug;

use crate::bits::{concat, decode_bits, total_width, BitField};
use crate::error::AsmError;
use crate::instructions::{
    lookup, Format, IOperands, InstrDesc, ROperands, ADDR_BITS, FUNCT_BITS, IMM_BITS,
    OPCODE_BITS, REG_BITS, SHAMT_BITS,
};
use crate::registers;

pub type Word = u32;

/// Split a source line into mnemonic and operands. Commas separate
/// tokens just like whitespace, so `add $t0,$t1,$t2` and
/// `add $t0 $t1 $t2` are the same instruction.
pub fn tokenize(line: &str) -> Vec<&str> {
    line.split(|c: char| c.is_whitespace() || c == ',')
        .filter(|t| !t.is_empty())
        .collect()
}

pub fn encode_line(line: &str) -> Result<Word, AsmError> {
    encode_tokens(&tokenize(line))
}

pub fn encode_tokens(tokens: &[&str]) -> Result<Word, AsmError> {
    let mnemonic = tokens.first().copied().unwrap_or("");
    let desc = lookup(mnemonic).ok_or_else(|| AsmError::UnsupportedInstruction {
        mnemonic: mnemonic.to_string(),
    })?;
    let fields = layout(desc, &Operands { mnemonic, tokens })?;
    debug_assert_eq!(total_width(&fields), 32, "{mnemonic} layout is not 32 bits");
    let word = decode_bits(&concat(&fields)) as Word;
    debug!(mnemonic, word, "encoded");
    Ok(word)
}

/// Build the bit fields of one instruction, most significant first.
pub fn layout(desc: &InstrDesc, ops: &Operands<'_>) -> Result<Vec<BitField>, AsmError> {
    let opcode = BitField::new(desc.opcode as i64, OPCODE_BITS);
    let reg = |v: u8| BitField::new(v as i64, REG_BITS);

    let fields = match desc.format {
        Format::R { funct, operands } => {
            let (rs, rt, rd, shamt) = match operands {
                ROperands::RdRsRt => (ops.reg(2)?, ops.reg(3)?, ops.reg(1)?, 0),
                ROperands::RdRtShamt => (0, ops.reg(2)?, ops.reg(1)?, ops.literal(3)?),
                ROperands::Rs => (ops.reg(1)?, 0, 0, 0),
            };
            vec![
                opcode,
                reg(rs),
                reg(rt),
                reg(rd),
                BitField::new(shamt, SHAMT_BITS),
                BitField::new(funct as i64, FUNCT_BITS),
            ]
        }
        Format::I { operands } => {
            let (rs, rt, imm) = match operands {
                IOperands::RtMem => {
                    let (offset, base) = ops.memory(2)?;
                    (base, ops.reg(1)?, offset)
                }
                IOperands::RsRtOffset => (ops.reg(1)?, ops.reg(2)?, ops.literal(3)?),
                IOperands::RtImm => (0, ops.reg(1)?, ops.literal(2)?),
                IOperands::RtRsImm => (ops.reg(2)?, ops.reg(1)?, ops.literal(3)?),
            };
            vec![opcode, reg(rs), reg(rt), BitField::new(imm, IMM_BITS)]
        }
        Format::J => vec![opcode, BitField::new(ops.literal(1)?, ADDR_BITS)],
    };
    Ok(fields)
}

/// Operand tokens of one line, indexed as written (token 0 is the mnemonic).
pub struct Operands<'a> {
    pub mnemonic: &'a str,
    pub tokens: &'a [&'a str],
}

impl<'a> Operands<'a> {
    fn token(&self, index: usize) -> Result<&'a str, AsmError> {
        self.tokens.get(index).copied().ok_or_else(|| AsmError::MissingOperand {
            mnemonic: self.mnemonic.to_string(),
            index,
        })
    }

    fn reg(&self, index: usize) -> Result<u8, AsmError> {
        registers::resolve(self.token(index)?)
    }

    fn literal(&self, index: usize) -> Result<i64, AsmError> {
        parse_literal(self.token(index)?)
    }

    /// `offset(base)`, returned as (offset, base register).
    fn memory(&self, index: usize) -> Result<(i64, u8), AsmError> {
        let text = self.token(index)?;
        let malformed = || AsmError::MalformedMemoryOperand { text: text.to_string() };
        let (offset, rest) = text.split_once('(').ok_or_else(malformed)?;
        let base = rest.strip_suffix(')').ok_or_else(malformed)?;
        let offset = parse_literal(offset)?;
        Ok((offset, registers::resolve(base)?))
    }
}

pub fn parse_literal(text: &str) -> Result<i64, AsmError> {
    text.parse::<i64>()
        .map_err(|_| AsmError::MalformedLiteral { text: text.to_string() })
}
