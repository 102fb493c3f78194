use std::io::{BufRead, IsTerminal};
use std::path::PathBuf;
use std::process;

use clap::Parser;
use rollbook_core::Rollbook;
use rustyline::DefaultEditor;
use tracing_subscriber::EnvFilter;

mod commands;
mod display;
mod executor;
mod parser;

use display::OutputMode;

/// Rollbook Console — interactive and scriptable CLI for the rollbook
/// student records store.
#[derive(Parser, Debug)]
#[command(name = "rollbook", version)]
struct Cli {
    /// Data directory holding the record files
    /// (default: ~/.local/share/rollbook).
    #[arg(short, long)]
    data_dir: Option<PathBuf>,

    /// Execute a command non-interactively (can be repeated).
    #[arg(short, long = "exec")]
    exec: Vec<String>,

    /// Output results as machine-parseable JSON.
    #[arg(short, long)]
    json: bool,
}

fn default_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("rollbook")
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let data_dir = cli.data_dir.clone().unwrap_or_else(default_data_dir);
    let book = match Rollbook::open(&data_dir) {
        Ok(b) => b,
        Err(e) => {
            eprintln!("Cannot open data directory {}: {e}", data_dir.display());
            process::exit(1);
        }
    };

    if !cli.exec.is_empty() {
        let code = run_exec_mode(&book, &cli.exec, cli.json);
        process::exit(code);
    } else if !std::io::stdin().is_terminal() {
        let code = run_pipe_mode(&book, cli.json);
        process::exit(code);
    } else {
        run_repl(&book);
    }
}

/// Execute one or more commands non-interactively (--exec mode).
///
/// Returns exit code: 0 = all succeeded, 1 = first error stops execution.
fn run_exec_mode(book: &Rollbook, commands: &[String], json_mode: bool) -> i32 {
    let mode = if json_mode {
        OutputMode::Json
    } else {
        OutputMode::Pretty
    };

    for cmd_str in commands {
        let cmd = match parser::parse(cmd_str) {
            Ok(cmd) => cmd,
            Err(e) => {
                display::render_error(&e, &mode);
                return 1;
            }
        };

        match executor::execute(book, cmd) {
            Ok(result) => {
                display::render(&result, &mode);
            }
            Err(e) => {
                display::render_error(&e, &mode);
                return 1;
            }
        }
    }

    0
}

/// Read commands from stdin (pipe mode).
///
/// Returns exit code: 0 = all succeeded, 1 = first error.
fn run_pipe_mode(book: &Rollbook, json_mode: bool) -> i32 {
    let mode = if json_mode {
        OutputMode::Json
    } else {
        OutputMode::Pretty
    };

    let stdin = std::io::stdin();
    for line in stdin.lock().lines() {
        let line = match line {
            Ok(l) => l,
            Err(e) => {
                display::render_error(&e, &mode);
                return 1;
            }
        };

        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        let cmd = match parser::parse(trimmed) {
            Ok(cmd) => cmd,
            Err(e) => {
                display::render_error(&e, &mode);
                return 1;
            }
        };

        match executor::execute(book, cmd) {
            Ok(result) => {
                if !display::render(&result, &mode) {
                    return 0; // EXIT command
                }
            }
            Err(e) => {
                display::render_error(&e, &mode);
                return 1;
            }
        }
    }

    0
}

/// Interactive REPL mode.
fn run_repl(book: &Rollbook) {
    println!("Rollbook Console v0.1.0");
    println!("Type HELP for available commands.\n");

    let mut rl = DefaultEditor::new().expect("failed to initialize line editor");

    loop {
        match rl.readline("rollbook> ") {
            Ok(line) => {
                let trimmed = line.trim();
                if trimmed.is_empty() {
                    continue;
                }
                let _ = rl.add_history_entry(trimmed);

                let cmd = match parser::parse(trimmed) {
                    Ok(cmd) => cmd,
                    Err(e) => {
                        display::print_error(&e);
                        continue;
                    }
                };

                match executor::execute(book, cmd) {
                    Ok(result) => {
                        if !display::render(&result, &OutputMode::Pretty) {
                            break; // EXIT command
                        }
                    }
                    Err(e) => display::print_error(&e),
                }
            }
            Err(rustyline::error::ReadlineError::Interrupted) => {
                println!();
            }
            Err(rustyline::error::ReadlineError::Eof) => {
                println!("Bye!");
                break;
            }
            Err(e) => {
                eprintln!("Readline error: {e}");
                break;
            }
        }
    }
}
