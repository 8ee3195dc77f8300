use crate::cpu::{ExMem, IdEx};
use crate::instructions::Op;

/// The execute stage: turns the operands latched in ID/EX into an EX/MEM latch.
pub trait Executor {
    fn exec(&self, id: &IdEx) -> ExMem;
}

pub struct IntExecutor;
impl Executor for IntExecutor {
    fn exec(&self, id: &IdEx) -> ExMem {
        let mut out = ExMem { pc: id.pc, insn: id.insn, ..ExMem::default() };
        let Some(d) = id.insn else {
            return out;
        };
        let (a, b) = (id.r1, id.r2);
        let offset = d.offset() as i32 as u32;
        match d.op() {
            Op::Add => out.alu = a.wrapping_add(b),
            Op::Sub => out.alu = a.wrapping_sub(b),
            Op::And => out.alu = a & b,
            Op::Or => out.alu = a | b,
            Op::Slt => out.alu = ((a as i32) < (b as i32)) as u32,
            Op::Sll => out.alu = b << d.shamt,
            Op::Srl => out.alu = b >> d.shamt,
            Op::Ori => out.alu = a | d.imm as u32,
            Op::Lui => out.alu = (d.imm as u32) << 16,
            Op::Lw => out.mem_addr = a.wrapping_add(offset),
            Op::Sw => {
                out.mem_addr = a.wrapping_add(offset);
                out.store = b;
            }
            Op::Beq | Op::Bne | Op::Blez | Op::Bgtz => {
                out.taken = match d.op() {
                    Op::Beq => a == b,
                    Op::Bne => a != b,
                    Op::Blez => (a as i32) <= 0,
                    _ => (a as i32) > 0,
                };
                out.branch_pc = id.pc.wrapping_add(4).wrapping_add(offset << 2);
            }
            // resolved in decode
            Op::Jr | Op::J | Op::Jal => {}
        }
        out
    }
}
