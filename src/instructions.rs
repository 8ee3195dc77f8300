/// How the operand tokens of an R-type instruction map onto its fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ROperands {
    /// `op rd rs rt`
    RdRsRt,
    /// `op rd rt shamt`, rs fixed to 0
    RdRtShamt,
    /// `op rs`, everything else 0
    Rs,
}

/// How the operand tokens of an I-type instruction map onto its fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IOperands {
    /// `op rt offset(base)`
    RtMem,
    /// `op rs rt offset`
    RsRtOffset,
    /// `op rt imm`, rs fixed to 0
    RtImm,
    /// `op rt rs imm`
    RtRsImm,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    R { funct: u8, operands: ROperands },
    I { operands: IOperands },
    J,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
    Add,
    Sub,
    And,
    Or,
    Slt,
    Sll,
    Srl,
    Jr,
    Lw,
    Sw,
    Beq,
    Bne,
    Blez,
    Bgtz,
    Lui,
    Ori,
    J,
    Jal,
}

#[derive(Debug, Clone, Copy)]
pub struct InstrDesc {
    pub op: Op,
    pub mnemonic: &'static str,
    pub opcode: u8,
    pub format: Format,
}

// Field widths, MSB to LSB.
pub const OPCODE_BITS: usize = 6;
pub const REG_BITS: usize = 5;
pub const SHAMT_BITS: usize = 5;
pub const FUNCT_BITS: usize = 6;
pub const IMM_BITS: usize = 16;
pub const ADDR_BITS: usize = 26;

pub const OP_R_TYPE: u8 = 0x00;

const fn r(op: Op, mnemonic: &'static str, funct: u8, operands: ROperands) -> InstrDesc {
    InstrDesc { op, mnemonic, opcode: OP_R_TYPE, format: Format::R { funct, operands } }
}

const fn i(op: Op, mnemonic: &'static str, opcode: u8, operands: IOperands) -> InstrDesc {
    InstrDesc { op, mnemonic, opcode, format: Format::I { operands } }
}

const fn j(op: Op, mnemonic: &'static str, opcode: u8) -> InstrDesc {
    InstrDesc { op, mnemonic, opcode, format: Format::J }
}

pub const TABLE: &[InstrDesc] = &[
    r(Op::Add, "add", 0b100000, ROperands::RdRsRt),
    r(Op::Sub, "sub", 0b100010, ROperands::RdRsRt),
    r(Op::And, "and", 0b100100, ROperands::RdRsRt),
    r(Op::Or, "or", 0b100101, ROperands::RdRsRt),
    r(Op::Slt, "slt", 0b101010, ROperands::RdRsRt),
    r(Op::Sll, "sll", 0b000000, ROperands::RdRtShamt),
    r(Op::Srl, "srl", 0b000010, ROperands::RdRtShamt),
    r(Op::Jr, "jr", 0b001000, ROperands::Rs),
    i(Op::Lw, "lw", 0b100011, IOperands::RtMem),
    i(Op::Sw, "sw", 0b101011, IOperands::RtMem),
    i(Op::Beq, "beq", 0b000100, IOperands::RsRtOffset),
    i(Op::Bne, "bne", 0b000101, IOperands::RsRtOffset),
    i(Op::Blez, "blez", 0b000110, IOperands::RsRtOffset),
    i(Op::Bgtz, "bgtz", 0b000111, IOperands::RsRtOffset),
    i(Op::Lui, "lui", 0b001111, IOperands::RtImm),
    i(Op::Ori, "ori", 0b001101, IOperands::RtRsImm),
    j(Op::J, "j", 0b000010),
    j(Op::Jal, "jal", 0b000011),
];

pub fn lookup(mnemonic: &str) -> Option<&'static InstrDesc> {
    TABLE.iter().find(|d| d.mnemonic == mnemonic)
}

/// Find the entry an encoded word belongs to. `funct` only matters for
/// opcode 0.
pub fn lookup_encoding(opcode: u8, funct: u8) -> Option<&'static InstrDesc> {
    TABLE.iter().find(|d| {
        d.opcode == opcode
            && match d.format {
                Format::R { funct: f, .. } => f == funct,
                _ => true,
            }
    })
}
