use crate::decoder::Decoded;
use crate::instructions::{Format, IOperands, ROperands};
use crate::registers;

/// Render a decoded word in the syntax the encoder reads back.
pub fn fmt_decoded(d: &Decoded) -> String {
    let mn = d.desc.mnemonic;
    match d.desc.format {
        Format::R { operands, .. } => match operands {
            ROperands::RdRsRt => format!("{} {}, {}, {}", mn, reg(d.rd), reg(d.rs), reg(d.rt)),
            ROperands::RdRtShamt => format!("{} {}, {}, {}", mn, reg(d.rd), reg(d.rt), d.shamt),
            ROperands::Rs => format!("{} {}", mn, reg(d.rs)),
        },
        Format::I { operands } => match operands {
            IOperands::RtMem => format!("{} {}, {}({})", mn, reg(d.rt), d.offset(), reg(d.rs)),
            IOperands::RsRtOffset => format!("{} {}, {}, {}", mn, reg(d.rs), reg(d.rt), d.offset()),
            IOperands::RtImm => format!("{} {}, {}", mn, reg(d.rt), d.imm),
            IOperands::RtRsImm => format!("{} {}, {}, {}", mn, reg(d.rt), reg(d.rs), d.imm),
        },
        Format::J => format!("{} {}", mn, d.target),
    }
}

fn reg(index: u8) -> &'static str {
    // fields are 5 bits wide, always in range
    registers::name(index).unwrap_or("$?")
}
