use bitvec::prelude::*;

use crate::encoder::Word;
use crate::instructions::{lookup_encoding, InstrDesc, Op};
use crate::registers::REG_ZERO;

/// Every field of a 32-bit word, whichever format it turns out to be.
#[derive(Debug, Clone, Copy)]
pub struct Decoded {
    pub desc: &'static InstrDesc,
    pub raw: Word,
    pub rs: u8,
    pub rt: u8,
    pub rd: u8,
    pub shamt: u8,
    pub imm: u16,
    pub target: u32, // J-type address
}

impl Decoded {
    pub fn is_nop(&self) -> bool {
        self.raw == 0
    }

    /// The 16-bit immediate read as a signed offset.
    pub fn offset(&self) -> i16 {
        self.imm as i16
    }

    pub fn op(&self) -> Op {
        self.desc.op
    }

    pub fn is_branch(&self) -> bool {
        matches!(self.op(), Op::Beq | Op::Bne | Op::Blez | Op::Bgtz)
    }

    /// Registers read in the decode stage.
    pub fn reads(&self) -> [Option<u8>; 2] {
        match self.op() {
            Op::Sll | Op::Srl => [Some(self.rt), None],
            Op::Add | Op::Sub | Op::And | Op::Or | Op::Slt => [Some(self.rs), Some(self.rt)],
            Op::Sw | Op::Beq | Op::Bne | Op::Blez | Op::Bgtz => [Some(self.rs), Some(self.rt)],
            Op::Lw | Op::Jr | Op::Ori => [Some(self.rs), None],
            Op::Lui | Op::J | Op::Jal => [None, None],
        }
    }

    /// Register written back at the end of the pipeline. `$zero` never is.
    pub fn writes(&self) -> Option<u8> {
        let reg = match self.op() {
            Op::Add | Op::Sub | Op::And | Op::Or | Op::Slt | Op::Sll | Op::Srl => self.rd,
            Op::Lw | Op::Lui | Op::Ori => self.rt,
            _ => return None,
        };
        (reg != REG_ZERO).then_some(reg)
    }

    /// True when `self` reads a register `producer` has yet to write back.
    pub fn depends_on(&self, producer: &Decoded) -> bool {
        match producer.writes() {
            Some(w) => self.reads().contains(&Some(w)),
            None => false,
        }
    }
}

pub trait Decoder {
    fn decode(&self, raw32: Word) -> Option<Decoded>;
}

pub struct Mips32Decoder;

impl Mips32Decoder {
    pub fn new() -> Self {
        Self
    }
}

impl Default for Mips32Decoder {
    fn default() -> Self {
        Self::new()
    }
}

impl Decoder for Mips32Decoder {
    fn decode(&self, raw32: Word) -> Option<Decoded> {
        // bit 0 here is the MSB of the word
        let bits = raw32.view_bits::<Msb0>();
        let opcode = bits[0..6].load_be::<u8>();
        let funct = bits[26..32].load_be::<u8>();
        let desc = lookup_encoding(opcode, funct)?;
        Some(Decoded {
            desc,
            raw: raw32,
            rs: bits[6..11].load_be::<u8>(),
            rt: bits[11..16].load_be::<u8>(),
            rd: bits[16..21].load_be::<u8>(),
            shamt: bits[21..26].load_be::<u8>(),
            imm: bits[16..32].load_be::<u16>(),
            target: bits[6..32].load_be::<u32>(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_word_is_sll_nop() {
        let d = Mips32Decoder::new().decode(0).unwrap();
        assert_eq!(d.desc.mnemonic, "sll");
        assert!(d.is_nop());
    }

    #[test]
    fn read_and_write_sets() {
        let dec = Mips32Decoder::new();
        // sll $t0, $t1, 2
        let sll = dec.decode(0x0009_4080).unwrap();
        assert_eq!(sll.reads(), [Some(9), None]);
        assert_eq!(sll.writes(), Some(8));
        // sw $t0, 4($sp)
        let sw = dec.decode(0xAFA8_0004).unwrap();
        assert_eq!(sw.writes(), None);
        assert!(!sw.depends_on(&sw));
        assert!(sw.depends_on(&sll));
        // add $zero, $t1, $t2
        let add_zero = dec.decode(0x012A_0020).unwrap();
        assert_eq!(add_zero.writes(), None);
    }

    #[test]
    fn unknown_opcode_and_funct_are_rejected() {
        let dec = Mips32Decoder::new();
        // opcode 0x3F
        assert!(dec.decode(0xFC00_0000).is_none());
        // R-type funct 0x3F
        assert!(dec.decode(0x0000_003F).is_none());
    }
}
