use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use serde::Serialize;
use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use watlex::wat::{scan, LexError, TokenKind};

/// Print the tokens of a WebAssembly text file.
#[derive(Parser, Debug)]
#[command(name = "watlex", version, about)]
struct Cli {
    /// Input .wat file, or `-` for stdin
    input: PathBuf,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = Format::Text)]
    format: Format,

    /// Enable debug logging (RUST_LOG takes precedence)
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Format {
    /// One `line:column kind text` line per token
    Text,
    /// A JSON array of token objects
    Json,
}

#[derive(Serialize)]
struct TokenRecord<'a> {
    kind: TokenKind,
    line: u32,
    column: u32,
    start: usize,
    end: usize,
    text: std::borrow::Cow<'a, str>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level)).init();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<()> {
    let source = read_input(&cli.input)?;
    log::info!("lexing {:?} ({} bytes)", cli.input, source.len());

    let mut records = Vec::new();
    scan(&source, |_, kind, line, column, start, end| {
        records.push(TokenRecord {
            kind,
            line,
            column,
            start,
            end,
            text: String::from_utf8_lossy(&source[start..end]),
        });
        Ok::<_, LexError>(())
    })
    .with_context(|| format!("lexing {}", cli.input.display()))?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    match cli.format {
        Format::Text => {
            for r in &records {
                writeln!(out, "{}:{} {} {}", r.line, r.column, r.kind, r.text)?;
            }
        }
        Format::Json => {
            serde_json::to_writer_pretty(&mut out, &records)?;
            writeln!(out)?;
        }
    }
    Ok(())
}

fn read_input(path: &Path) -> Result<Vec<u8>> {
    if path.as_os_str() == "-" {
        let mut buf = Vec::new();
        io::stdin().read_to_end(&mut buf).context("reading stdin")?;
        return Ok(buf);
    }
    fs::read(path).with_context(|| format!("reading {}", path.display()))
}
