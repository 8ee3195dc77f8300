pub mod bits;
pub mod cpu;
pub mod decoder;
pub mod disasm;
pub mod encoder;
pub mod error;
pub mod exec;
pub mod instructions;
pub mod memory;
pub mod program;
pub mod registers;

pub use cpu::{Cpu, CpuConfig, Report, Trap};
pub use memory::{Bus, InstructionMemory, WordMemory};

pub use encoder::{encode_line, Word};
pub use error::{AsmError, LineError};
pub use program::{assemble_str, AsmConfig, Diagnostic, Program, State};
