//! lintpad - highlight a source file and report live diagnostics
//!
//! Runs the editor core once over a file: the buffer is printed with
//! syntax colors and diagnostic backgrounds, followed by the findings.

mod terminal;

use std::borrow::Cow;
use std::env;
use std::fs;
use std::process;

use tracing_subscriber::EnvFilter;

use lintpad::diagnostics::LineIndex;
use lintpad::{detect_language, Config, Language, LintpadError, Result, Severity, SyntaxManager};
use terminal::Terminal;

/// Parsed command line
#[derive(Debug, Default)]
struct Options {
    path: Option<String>,
    language: Option<Language>,
    check: bool,
    verbose: bool,
    no_color: bool,
}

fn main() {
    match run() {
        Ok(code) => process::exit(code),
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    }
}

fn run() -> Result<i32> {
    let Some(options) = parse_args()? else {
        return Ok(0);
    };

    init_logging(options.verbose);

    let Some(path) = options.path else {
        print_usage();
        return Err(LintpadError::Message("no input file".to_string()));
    };

    let config = Config::load();
    let text = decode_source(&path, &fs::read(&path)?);
    let language = options
        .language
        .unwrap_or_else(|| detect_language(&path, &text));
    tracing::debug!(%language, path = %path, "highlighting");

    let mut manager = SyntaxManager::from_config(&config);
    if options.check {
        manager.diagnostics_enabled = true;
    }
    let spans = manager.highlight(&text, language);

    let color = !options.no_color && env::var_os("NO_COLOR").is_none();
    let mut term = Terminal::stdout(color);
    if !options.check {
        term.print_buffer(&text, &spans, &manager.diagnostic_overlays())?;
    }

    let diagnostics = manager.last_diagnostics();
    if manager.diagnostics_enabled {
        if !options.check && !diagnostics.is_empty() {
            println!();
        }
        let index = LineIndex::new(&text);
        for diagnostic in diagnostics {
            term.print_diagnostic(&path, &text, &index, diagnostic)?;
        }
        term.print_summary(diagnostics)?;
    }
    term.flush()?;

    let failed = diagnostics.iter().any(|d| d.severity == Severity::Error);
    Ok(if options.check && failed { 1 } else { 0 })
}

/// Returns `None` when the command was fully handled (help, version)
fn parse_args() -> Result<Option<Options>> {
    let mut options = Options::default();
    let mut args = env::args().skip(1);

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--help" | "-h" => {
                print_usage();
                return Ok(None);
            }
            "--version" | "-V" => {
                print_version();
                return Ok(None);
            }
            "--check" | "-c" => options.check = true,
            "--verbose" | "-v" => options.verbose = true,
            "--no-color" => options.no_color = true,
            "--language" | "-l" => {
                let name = args.next().ok_or_else(|| {
                    LintpadError::Message(format!("{} requires a language name", arg))
                })?;
                options.language = Some(name.parse()?);
            }
            flag if flag.starts_with('-') => {
                return Err(LintpadError::Message(format!("unknown option '{}'", flag)));
            }
            _ => options.path = Some(arg.clone()),
        }
    }

    Ok(Some(options))
}

/// Decode file contents, replacing invalid UTF-8 sequences with U+FFFD
fn decode_source(path: &str, bytes: &[u8]) -> String {
    match String::from_utf8_lossy(bytes) {
        Cow::Borrowed(text) => text.to_string(),
        Cow::Owned(text) => {
            tracing::warn!(path = %path, "file is not valid UTF-8; invalid bytes replaced");
            text
        }
    }
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn print_usage() {
    println!("lintpad {} - syntax highlighting and live diagnostics", env!("CARGO_PKG_VERSION"));
    println!();
    println!("Usage: lintpad [OPTIONS] FILE");
    println!();
    println!("Options:");
    println!("  -h, --help             Show this help message");
    println!("  -V, --version          Show version information");
    println!("  -c, --check            Only report diagnostics; exit 1 if any is an error");
    println!("  -l, --language NAME    Force the language (kotlin, java, python, cpp, c)");
    println!("  -v, --verbose          Debug logging on stderr");
    println!("      --no-color         Plain output (also honours NO_COLOR)");
    println!();
    println!("Settings are read from ~/.lintpad.conf:");
    println!("  catalog = PATH         TOML rule catalog (built-in rules when unset)");
    println!("  diagnostics = BOOL     Run the diagnostic pass when highlighting");
}

fn print_version() {
    println!("lintpad {}", env!("CARGO_PKG_VERSION"));
    println!("Languages: kotlin, java, python, cpp, c");
}
