use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

use saw_lexer::Scanner;

#[derive(Parser)]
#[command(name = "sawhl")]
#[command(about = "sawhl — SAWScript highlighter for documentation pages")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Render a .saw file as a standalone highlighted HTML page
    Render {
        /// Input .saw file
        path: String,

        /// Output path (defaults to the input path with `.html` appended)
        #[arg(short, long)]
        out: Option<String>,
    },

    /// Dump the token stream for a .saw file
    Tokens {
        /// Input .saw file
        path: String,

        /// Emit a JSON array instead of one token per line
        #[arg(long)]
        json: bool,
    },

    /// Verify that a .saw file contains no unrecognized input
    Check {
        /// Input .saw file
        path: String,
    },
}

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Command::Render { path, out } => cmd_render(&path, out.as_deref()),
        Command::Tokens { path, json } => cmd_tokens(&path, json),
        Command::Check { path } => cmd_check(&path),
    }
}

fn read_source(path: &str) -> String {
    let p = Path::new(path);
    if !p.exists() {
        eprintln!("Error: file not found: {path}");
        std::process::exit(1);
    }
    match std::fs::read_to_string(p) {
        Ok(source) => source,
        Err(e) => {
            eprintln!("Error reading {path}: {e}");
            std::process::exit(1);
        }
    }
}

fn cmd_render(path: &str, out: Option<&str>) {
    let source = read_source(path);

    let title = Path::new(path)
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or(path);
    let page = saw_highlight::render_page(title, &source);

    let out_path = match out {
        Some(p) => PathBuf::from(p),
        None => PathBuf::from(format!("{path}.html")),
    };

    if let Err(e) = std::fs::write(&out_path, &page) {
        eprintln!("Error writing {}: {e}", out_path.display());
        std::process::exit(1);
    }

    eprintln!("Rendered: {}", out_path.display());
}

fn cmd_tokens(path: &str, json: bool) {
    let source = read_source(path);
    let tokens = Scanner::tokenize(&source);

    if json {
        match serde_json::to_string_pretty(&tokens) {
            Ok(encoded) => println!("{encoded}"),
            Err(e) => {
                eprintln!("Error encoding tokens: {e}");
                std::process::exit(1);
            }
        }
    } else {
        for tok in tokens {
            println!(
                "{:>5}..{:<5} {:?} {:?}",
                tok.span.start, tok.span.end, tok.kind, tok.text
            );
        }
    }
}

fn cmd_check(path: &str) {
    let source = read_source(path);

    let mut unrecognized = 0;
    for tok in Scanner::new(&source) {
        if tok.kind.is_error() {
            let (line, column) = tok.span.line_col(&source);
            eprintln!("{path}:{line}:{column}: unrecognized input {:?}", tok.text);
            unrecognized += 1;
        }
    }

    if unrecognized > 0 {
        eprintln!("{unrecognized} unrecognized span(s) in {path}");
        std::process::exit(1);
    }

    eprintln!("OK: {path}");
}
