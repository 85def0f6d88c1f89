//! Command-line driver for the Gong front end
//!
//! Usage:
//!   gong program.gong        scan and parse a file
//!   cat program.gong | gong  scan and parse stdin
//!   gong                     interactive REPL

use anyhow::{Context, Result};
use clap::Parser as ClapParser;
use gong::{Expression, Parser, Scanner, Token};
use serde::Serialize;
use std::io::{self, BufRead, IsTerminal, Read, Write};
use std::path::PathBuf;
use std::process;
use tracing_subscriber::EnvFilter;

#[derive(ClapParser, Debug)]
#[command(name = "gong", version, about = "Scan and parse Gong S-expressions")]
struct Cli {
    /// Source file to read (stdin or REPL when omitted)
    file: Option<PathBuf>,

    /// Print the token stream before the parsed forms
    #[arg(short, long)]
    tokens: bool,

    /// Emit tokens and forms as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Serialize)]
struct Report<'a> {
    tokens: &'a [Token],
    forms: &'a [Expression],
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let mut stdout = io::stdout().lock();

    let outcome = if let Some(path) = &cli.file {
        match std::fs::read_to_string(path) {
            Ok(source) => show(&cli, &source, &mut stdout),
            Err(err) => {
                eprintln!("Error reading file {}: {}", path.display(), err);
                process::exit(2);
            }
        }
    } else if !io::stdin().is_terminal() {
        read_stdin().and_then(|source| show(&cli, &source, &mut stdout))
    } else {
        repl(&cli, io::stdin().lock(), &mut stdout, &mut io::stderr())
    };

    if let Err(err) = outcome {
        eprintln!("Error: {:#}", err);
        process::exit(1);
    }
}

fn read_stdin() -> Result<String> {
    let mut source = String::new();
    io::stdin()
        .read_to_string(&mut source)
        .context("failed to read stdin")?;
    Ok(source)
}

/// Line-by-line session until end of input, `exit` or `quit`
fn repl(
    cli: &Cli,
    input: impl BufRead,
    out: &mut impl Write,
    err: &mut impl Write,
) -> Result<()> {
    let mut lines = input.lines();

    loop {
        write!(out, "> ")?;
        out.flush()?;

        let Some(line) = lines.next() else {
            break;
        };
        let line = line.context("failed to read line")?;

        match line.trim() {
            "" => continue,
            "exit" | "quit" => break,
            input => {
                // Syntax errors end the line, not the session
                if let Err(e) = show(cli, input, out) {
                    writeln!(err, "Error: {:#}", e)?;
                }
            }
        }
    }

    Ok(())
}

/// Scans and parses `source`, writing tokens and forms as text or JSON
///
/// Tokens are written before a syntax error is returned, in both output modes.
fn show(cli: &Cli, source: &str, out: &mut impl Write) -> Result<()> {
    let tokens = Scanner::new(source.trim()).scan_tokens();

    for token in gong::lexer::diagnostics(&tokens) {
        tracing::warn!(offset = token.offset, token = %token, "malformed token");
    }

    let parsed = Parser::new(tokens.clone()).parse();

    if cli.json {
        let report = Report {
            tokens: if cli.tokens { &tokens[..] } else { &[] },
            forms: parsed.as_deref().unwrap_or(&[]),
            error: parsed.as_ref().err().map(|e| e.to_string()),
        };
        writeln!(out, "{}", serde_json::to_string_pretty(&report)?)?;
    } else {
        if cli.tokens {
            writeln!(out, "\n  Tokens:\n")?;
            for token in &tokens {
                writeln!(out, "    - {}", token)?;
            }
            writeln!(out)?;
        }

        if let Ok(forms) = &parsed {
            for form in forms {
                writeln!(out, "{}", form)?;
            }
        }
    }

    parsed?;
    Ok(())
}
