use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use mips_asm::{AsmConfig, Program};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Assemble MIPS instructions into decimal machine words"
)]
struct Opts {
    /// Assembly source, one instruction per line
    #[arg(value_name = "INPUT")]
    input: PathBuf,
    /// Destination for the words, one unsigned decimal per line
    #[arg(value_name = "OUTPUT")]
    output: PathBuf,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let opts = Opts::parse();
    let mut prog = Program::new(AsmConfig::default());

    {
        let input = File::open(&opts.input)
            .with_context(|| format!("opening {}", opts.input.display()))?;
        for line in BufReader::new(input).lines() {
            let line = line.with_context(|| format!("reading {}", opts.input.display()))?;
            let seen = prog.diagnostics().len();
            prog.push_line(&line)?;
            for diag in &prog.diagnostics()[seen..] {
                eprintln!("{diag}");
            }
        }
    }

    // Only create the output once the whole input assembled.
    let output = File::create(&opts.output)
        .with_context(|| format!("creating {}", opts.output.display()))?;
    prog.write_to(BufWriter::new(output))
        .with_context(|| format!("writing {}", opts.output.display()))?;

    Ok(())
}
