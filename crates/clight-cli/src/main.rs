use std::io::Write;
use std::sync::Once;

use clap::builder::RangedU64ValueParser;
use clap::{Parser, Subcommand};
use clight_highlight::{load_lines, AnsiPalette, CustomColor, Highlighter, Palette};
use clight_lexer::{Scanner, Token, TokenizerOptions};
use tracing::debug;

#[derive(Parser)]
#[command(name = "clight")]
#[command(about = "clight — syntax highlighting for C-like source in the terminal")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print a file with syntax highlighting
    Show {
        /// Input source file
        path: String,

        /// Recolor one pair from RGB components (0-1000), e.g. `blue:1000,500,0@16`
        #[arg(long, value_name = "PAIR:R,G,B[@SLOT]")]
        custom_color: Option<CustomColor>,

        /// Classify identifiers by at most this many bytes (1 or more)
        #[arg(long, value_name = "N", value_parser = ident_limit_parser())]
        max_ident_len: Option<usize>,

        /// Prefix each line with its number
        #[arg(short = 'n', long)]
        line_numbers: bool,
    },

    /// List the tokens of every line
    Tokens {
        /// Input source file
        path: String,

        /// Classify identifiers by at most this many bytes (1 or more)
        #[arg(long, value_name = "N", value_parser = ident_limit_parser())]
        max_ident_len: Option<usize>,
    },
}

/// Identifier limits start at 1; a limit of 0 would drop every word.
fn ident_limit_parser() -> RangedU64ValueParser<usize> {
    RangedU64ValueParser::<usize>::new().range(1..)
}

static TRACING_INIT: Once = Once::new();

/// Install the log subscriber. Logging stays off unless `RUST_LOG` is set,
/// e.g. `RUST_LOG=clight_lexer=trace`.
fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            tracing_subscriber::registry()
                .with(
                    fmt::layer()
                        .with_writer(std::io::stderr)
                        .with_target(true)
                        .with_level(true),
                )
                .with(EnvFilter::from_default_env())
                .init();
        }
    });
}

fn main() {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Command::Show {
            path,
            custom_color,
            max_ident_len,
            line_numbers,
        } => cmd_show(&path, custom_color, max_ident_len, line_numbers),
        Command::Tokens {
            path,
            max_ident_len,
        } => cmd_tokens(&path, max_ident_len),
    }
}

fn read_lines(path: &str) -> Vec<Vec<u8>> {
    match load_lines(path) {
        Ok(lines) => lines,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }
}

fn write_out(out: &[u8]) {
    let stdout = std::io::stdout();
    let mut lock = stdout.lock();
    if let Err(e) = lock.write_all(out).and_then(|()| lock.flush()) {
        // A closed pipe (`clight show f.c | head`) is not worth reporting.
        if e.kind() != std::io::ErrorKind::BrokenPipe {
            eprintln!("Error writing output: {e}");
            std::process::exit(1);
        }
    }
}

fn cmd_show(
    path: &str,
    custom_color: Option<CustomColor>,
    max_ident_len: Option<usize>,
    line_numbers: bool,
) {
    let lines = read_lines(path);
    debug!(path, lines = lines.len(), ?max_ident_len, "highlighting");

    let mut hl = Highlighter::new(AnsiPalette::with_base_pairs())
        .with_options(TokenizerOptions { max_ident_len });
    if let Some(custom) = custom_color {
        hl = hl.with_custom_color(custom);
    }

    write_out(&render_lines(&lines, &mut hl, line_numbers));
}

/// Paint every line, optionally prefixed with a right-aligned line number.
fn render_lines<P: Palette>(
    lines: &[Vec<u8>],
    hl: &mut Highlighter<P>,
    line_numbers: bool,
) -> Vec<u8> {
    let width = lines.len().to_string().len();
    let mut out = Vec::new();
    for (i, line) in lines.iter().enumerate() {
        if line_numbers {
            out.extend_from_slice(format!("{:>width$} ", i + 1).as_bytes());
        }
        hl.paint(line, &mut out);
        out.push(b'\n');
    }
    debug!(bytes = out.len(), "rendered");
    out
}

fn cmd_tokens(path: &str, max_ident_len: Option<usize>) {
    let lines = read_lines(path);
    debug!(path, lines = lines.len(), ?max_ident_len, "listing tokens");
    let scanner = Scanner::with_options(TokenizerOptions { max_ident_len });
    write_out(dump_tokens(&lines, &scanner).as_bytes());
}

/// One `format_token` line per token, across all lines.
fn dump_tokens(lines: &[Vec<u8>], scanner: &Scanner) -> String {
    let mut out = String::new();
    let mut tokens = Vec::new();
    let mut total = 0;
    for (i, line) in lines.iter().enumerate() {
        total += scanner.tokenize_into(line, &mut tokens);
        for token in &tokens {
            out.push_str(&format_token(i + 1, line, token));
            out.push('\n');
        }
    }
    debug!(tokens = total, "listed tokens");
    out
}

/// Render a token as `line:offset+length kind text`.
fn format_token(line_no: usize, line: &[u8], token: &Token) -> String {
    format!(
        "{line_no}:{}+{} {} {}",
        token.offset,
        token.length,
        token.kind.name(),
        String::from_utf8_lossy(token.text(line))
    )
}
