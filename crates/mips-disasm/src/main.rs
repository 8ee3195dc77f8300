use anyhow::Result;
use clap::{Parser, ValueEnum};

use std::fmt::Write as _;
use std::path::Path;

use mips_disasm::{disassemble, load_words};

#[derive(Parser, Debug)]
#[command(author, version, about = "Disassemble mips-asm word listings", long_about=None)]
struct Cli {
    /// Address of the first word
    #[arg(long, default_value = "0")]
    base: String,
    /// Input listing, one unsigned decimal word per line
    #[arg(value_name = "WORDS")]
    input: String,
    /// Output format: text or json
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
    /// Write output to file instead of stdout
    #[arg(long, value_name = "FILE")]
    out: Option<String>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat { Text, Json }

fn parse_u32(s: &str) -> Result<u32> {
    let s = s.trim();
    if let Some(hex) = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        Ok(u32::from_str_radix(hex, 16)?)
    } else {
        Ok(s.parse::<u32>()?)
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let base = parse_u32(&cli.base)?;
    let listing = load_words(Path::new(&cli.input), base)?;
    let insns = disassemble(&listing);

    let buf = match cli.format {
        OutputFormat::Json => serde_json::to_string_pretty(&insns)? + "\n",
        OutputFormat::Text => {
            let mut buf = String::new();
            for i in &insns {
                let _ = writeln!(buf, "{:#010x}: {:#010x}  {}", i.addr, i.word, i.text);
            }
            buf
        }
    };
    if let Some(path) = cli.out { std::fs::write(path, buf)?; } else { print!("{}", buf); }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_u32_hex_and_dec() {
        assert_eq!(parse_u32("0x10").unwrap(), 0x10);
        assert_eq!(parse_u32("16").unwrap(), 16);
        assert!(parse_u32("zz").is_err());
    }
}
