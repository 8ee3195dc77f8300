use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use mips_asm::decoder::Mips32Decoder;
use mips_asm::exec::IntExecutor;
use mips_asm::memory::parse_words;
use mips_asm::{Cpu, CpuConfig, InstructionMemory, WordMemory};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Run assembled MIPS words on a five-stage pipeline and print the final state"
)]
struct Opts {
    /// Program listing written by mips-asm
    #[arg(value_name = "PROGRAM")]
    program: PathBuf,
    /// Initial data memory, one `index-value` pair per line
    #[arg(value_name = "MEMORY")]
    memory: PathBuf,
    /// Forward results between stages instead of stalling on every dependency
    #[arg(long)]
    forwarding: bool,
    #[arg(long, default_value_t = CpuConfig::default().max_cycles)]
    max_cycles: u64,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let opts = Opts::parse();
    let cfg = CpuConfig {
        forwarding: opts.forwarding,
        max_cycles: opts.max_cycles,
        ..CpuConfig::default()
    };

    let text = std::fs::read_to_string(&opts.program)
        .with_context(|| format!("reading {}", opts.program.display()))?;
    let imem = InstructionMemory::new(parse_words(&text)?, cfg.imem_words)?;

    let mut mem = WordMemory::new(cfg.dmem_words);
    let init = std::fs::read_to_string(&opts.memory)
        .with_context(|| format!("reading {}", opts.memory.display()))?;
    mem.load_init(&init)
        .with_context(|| format!("loading {}", opts.memory.display()))?;

    let mut cpu = Cpu::new(cfg);
    cpu.reset(0);
    cpu.run(&imem, &mut mem, &Mips32Decoder::new(), &IntExecutor)?;

    print!("{}", cpu.report(&mem));
    Ok(())
}
