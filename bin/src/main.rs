use std::{
    io::{stdin, stdout, Write},
    path::PathBuf,
    process::ExitCode,
};

use anyhow::Context;
use clap::Parser;

use diagnostics::Diagnostics;
use parser::AstPrinter;

/// Parses a Lox expression and prints its syntax tree.
#[derive(clap::Parser)]
struct Args {
    /// File to parse. Starts a prompt if omitted.
    file: Option<PathBuf>,
}

// EX_DATAERR from sysexits.h
const EXIT_DATA_ERR: u8 = 65;

fn run_file(path: PathBuf) -> anyhow::Result<ExitCode> {
    let source = std::fs::read_to_string(&path)
        .with_context(|| format!("Could not read {}", path.display()))?;

    let mut diagnostics = Diagnostics::new();
    run(&source, &mut diagnostics, &mut stdout())?;

    Ok(if diagnostics.had_error() { ExitCode::from(EXIT_DATA_ERR) } else { ExitCode::SUCCESS })
}

fn run_prompt() -> anyhow::Result<ExitCode> {
    let mut diagnostics = Diagnostics::new();
    loop {
        print!("> ");
        stdout().flush()?;
        let mut line = String::new();
        if stdin().read_line(&mut line)? == 0 {
            return Ok(ExitCode::SUCCESS);
        }
        run(line.trim_end_matches(['\r', '\n']), &mut diagnostics, &mut stdout())?;

        // A bad line shouldn't taint the next one
        diagnostics.reset();
    }
}

fn run(source: &str, diagnostics: &mut Diagnostics, output: &mut impl Write) -> anyhow::Result<()> {
    let expr = parser::parse_source(source, diagnostics);

    for diagnostic in diagnostics.iter() {
        eprintln!("{diagnostic}");
    }

    if let Some(expr) = expr {
        log::debug!("Parsed {:?}", expr);
        writeln!(output, "{}", AstPrinter.print(&expr))?;
    }
    Ok(())
}

fn main() -> anyhow::Result<ExitCode> {
    env_logger::init();
    let args = Args::parse();

    match args.file {
        Some(file) => run_file(file),
        None => run_prompt(),
    }
}
