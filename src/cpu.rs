use std::fmt;

use anyhow::Error;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::decoder::{Decoded, Decoder};
use crate::encoder::Word;
use crate::exec::Executor;
use crate::instructions::Op;
use crate::memory::{Bus, InstructionMemory, WordMemory};
use crate::registers::REG_RA;

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct CpuConfig {
    /// Forward EX/MEM and MEM/WB results into decode instead of stalling.
    /// Only a load followed by a dependent instruction still stalls.
    pub forwarding: bool,
    pub imem_words: usize,
    pub dmem_words: usize,
    pub max_cycles: u64,
}

impl Default for CpuConfig {
    fn default() -> Self {
        Self {
            forwarding: false,
            imem_words: 4096,
            dmem_words: 100_000,
            max_cycles: 10_000_000,
        }
    }
}

// Pipeline latches. `insn: None` is a bubble.

#[derive(Debug, Clone, Copy, Default)]
pub struct IfId {
    pub pc: u32,
    pub insn: Option<Decoded>,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct IdEx {
    pub pc: u32,
    pub insn: Option<Decoded>,
    pub r1: u32,
    pub r2: u32,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ExMem {
    pub pc: u32,
    pub insn: Option<Decoded>,
    pub alu: u32,
    pub mem_addr: u32,
    pub store: u32,
    pub taken: bool,
    pub branch_pc: u32,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct MemWb {
    pub pc: u32,
    pub insn: Option<Decoded>,
    pub write: Option<(u8, u32)>,
}

#[derive(thiserror::Error, Debug)]
pub enum Trap {
    #[error("Invalid instruction {word:#010x} at {pc:#010x}")]
    InvalidInstruction { pc: u32, word: Word },
    #[error("Bus error at {addr:#010x}")]
    Bus { addr: u32, #[source] source: Error },
    #[error("pipeline still busy after {cycles} cycles")]
    CycleLimit { cycles: u64 },
}

/// Five-stage in-order pipeline. One [`Cpu::step`] is one clock cycle:
/// register file and memory writes land in the first half, every latch
/// advances in the second.
#[derive(Debug, Clone)]
pub struct Cpu {
    pub pc: u32,
    pub gpr: [u32; 32],
    pub ifid: IfId,
    pub idex: IdEx,
    pub exmem: ExMem,
    pub memwb: MemWb,
    pub cycles: u64,
    pub retired: u64,
    pub stalls: u64,
    pub cfg: CpuConfig,
}

impl Cpu {
    pub fn new(cfg: CpuConfig) -> Self {
        Self {
            pc: 0,
            gpr: [0; 32],
            ifid: IfId::default(),
            idex: IdEx::default(),
            exmem: ExMem::default(),
            memwb: MemWb::default(),
            cycles: 0,
            retired: 0,
            stalls: 0,
            cfg,
        }
    }

    pub fn reset(&mut self, reset_pc: u32) {
        *self = Self::new(self.cfg);
        self.pc = reset_pc;
    }

    /// True once every latch holds a bubble.
    pub fn is_drained(&self) -> bool {
        self.ifid.insn.is_none()
            && self.idex.insn.is_none()
            && self.exmem.insn.is_none()
            && self.memwb.insn.is_none()
    }

    pub fn step<B: Bus, D: Decoder, X: Executor>(
        &mut self,
        imem: &InstructionMemory,
        bus: &mut B,
        dec: &D,
        exec: &X,
    ) -> Result<(), Trap> {
        self.write_back(bus)?;

        let fetched = self.ifid.insn;
        let branch_stall = fetched.is_some_and(|d| d.is_branch())
            || self.idex.insn.is_some_and(|d| d.is_branch());
        let hazard = fetched.is_some_and(|d| self.hazard(&d));
        let pc = self.pc;

        self.memwb = self.mem_access(bus)?;
        self.exmem = exec.exec(&self.idex);
        self.idex = match fetched {
            Some(d) if !hazard => IdEx {
                pc: self.ifid.pc,
                insn: fetched,
                r1: self.operand(d.rs),
                r2: self.operand(d.rt),
            },
            _ => IdEx::default(),
        };

        if hazard {
            // IF/ID holds, PC holds
            self.stalls += 1;
        } else if branch_stall {
            self.ifid = IfId::default();
            self.stalls += 1;
        } else {
            match fetched.map(|d| d.op()) {
                Some(Op::J) | Some(Op::Jal) | Some(Op::Jr) => {
                    self.ifid = IfId::default();
                    self.stalls += 1;
                }
                _ => self.ifid = self.fetch(imem, dec, pc)?,
            }
        }

        if branch_stall {
            if self.exmem.insn.is_some_and(|d| d.is_branch()) && self.exmem.taken {
                debug!(from = self.exmem.pc, to = self.exmem.branch_pc, "branch taken");
                self.pc = self.exmem.branch_pc;
            }
        } else if !hazard {
            self.pc = match fetched {
                Some(d) if d.op() == Op::Jal => {
                    self.gpr[REG_RA as usize] = pc;
                    d.target << 2
                }
                Some(d) if d.op() == Op::J => d.target << 2,
                Some(d) if d.op() == Op::Jr => self.gpr[d.rs as usize],
                _ => pc.wrapping_add(4),
            };
        }

        self.cycles += 1;
        if self.memwb.insn.is_some() {
            self.retired += 1;
        }
        trace!(cycle = self.cycles, pc = self.pc, hazard, branch_stall, "clock");
        Ok(())
    }

    /// Step until the pipeline drains.
    pub fn run<B: Bus, D: Decoder, X: Executor>(
        &mut self,
        imem: &InstructionMemory,
        bus: &mut B,
        dec: &D,
        exec: &X,
    ) -> Result<(), Trap> {
        loop {
            self.step(imem, bus, dec, exec)?;
            if self.is_drained() {
                debug!(cycles = self.cycles, retired = self.retired, stalls = self.stalls, "drained");
                return Ok(());
            }
            if self.cycles >= self.cfg.max_cycles {
                return Err(Trap::CycleLimit { cycles: self.cycles });
            }
        }
    }

    pub fn report(&self, mem: &WordMemory) -> Report {
        Report {
            cycles: self.cycles,
            instructions: self.retired,
            registers: self.gpr,
            memory: mem.words.clone(),
        }
    }

    fn write_back<B: Bus>(&mut self, bus: &mut B) -> Result<(), Trap> {
        if let Some((reg, val)) = self.memwb.write {
            self.gpr[reg as usize] = val;
        }
        if self.exmem.insn.is_some_and(|d| d.op() == Op::Sw) {
            let addr = self.exmem.mem_addr;
            bus.write_u32(addr, self.exmem.store)
                .map_err(|source| Trap::Bus { addr, source })?;
        }
        Ok(())
    }

    fn mem_access<B: Bus>(&self, bus: &mut B) -> Result<MemWb, Trap> {
        let ex = &self.exmem;
        let mut out = MemWb { pc: ex.pc, insn: ex.insn, write: None };
        if let Some(d) = ex.insn {
            if let Some(reg) = d.writes() {
                let val = if d.op() == Op::Lw {
                    bus.read_u32(ex.mem_addr)
                        .map_err(|source| Trap::Bus { addr: ex.mem_addr, source })?
                } else {
                    ex.alu
                };
                out.write = Some((reg, val));
            }
        }
        Ok(out)
    }

    fn hazard(&self, d: &Decoded) -> bool {
        let on = |latch: Option<Decoded>| latch.is_some_and(|p| d.depends_on(&p));
        if !self.cfg.forwarding || d.op() == Op::Jr {
            // jr reads its register as it leaves IF/ID, past any forwarding path
            return on(self.exmem.insn) || on(self.idex.insn);
        }
        self.idex.insn.is_some_and(|p| p.op() == Op::Lw) && on(self.idex.insn)
    }

    /// Decode-stage register read. Called once EX/MEM and MEM/WB have latched
    /// this cycle's results.
    fn operand(&self, reg: u8) -> u32 {
        if self.cfg.forwarding {
            if let Some(d) = self.exmem.insn {
                if d.op() != Op::Lw && d.writes() == Some(reg) {
                    return self.exmem.alu;
                }
            }
            if let Some((r, val)) = self.memwb.write {
                if r == reg {
                    return val;
                }
            }
        }
        self.gpr[reg as usize]
    }

    fn fetch<D: Decoder>(&self, imem: &InstructionMemory, dec: &D, pc: u32) -> Result<IfId, Trap> {
        let word = imem.fetch(pc);
        let d = dec
            .decode(word)
            .ok_or(Trap::InvalidInstruction { pc, word })?;
        Ok(IfId { pc, insn: (!d.is_nop()).then_some(d) })
    }
}

/// Final machine state in the simulator's log layout.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub cycles: u64,
    pub instructions: u64,
    pub registers: [u32; 32],
    pub memory: Vec<u32>,
}

const MEMORY_ROW: usize = 5000;

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Cycles: {}", self.cycles)?;
        writeln!(f, "Instructions: {}", self.instructions)?;
        writeln!(f)?;
        writeln!(f, "Register file: ")?;
        for row in self.registers.chunks(8) {
            for r in row {
                write!(f, "{} ", *r as i32)?;
            }
            writeln!(f)?;
        }
        writeln!(f)?;
        writeln!(f, "Memory: ")?;
        for row in self.memory.chunks(MEMORY_ROW) {
            for w in row {
                write!(f, "{} ", *w as i32)?;
            }
            writeln!(f)?;
        }
        writeln!(f)
    }
}
