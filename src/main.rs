//! bbhl - highlight BBCode files in the terminal

use std::env;
use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;
use std::process;

use tracing_subscriber::EnvFilter;

use bbhl::display::{self, Display};
use bbhl::terminal::Terminal;
use bbhl::{BbcodeMode, Config, HighlightError, Result};

/// Parsed command line
#[derive(Debug, Default)]
struct Options {
    file: Option<PathBuf>,
    config: Option<PathBuf>,
    strict: Option<bool>,
    tokens: bool,
    line_numbers: bool,
    width: Option<usize>,
    color: Option<bool>,
}

fn main() {
    init_logging();
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run() -> Result<()> {
    let args: Vec<String> = env::args().skip(1).collect();
    let Some(options) = parse_args(&args)? else {
        return Ok(());
    };

    let mut config = match &options.config {
        Some(path) => Config::from_file(path)?,
        None => Config::load(),
    };
    if let Some(strict) = options.strict {
        config.strict_matching = strict;
    }
    if options.line_numbers {
        config.show_line_numbers = true;
    }

    let text = match &options.file {
        Some(path) => fs::read_to_string(path)?,
        None => {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };
    let lines: Vec<&str> = text.lines().collect();
    let mode = BbcodeMode::from_config(&config);

    if options.tokens {
        let mut out = io::stdout().lock();
        return display::dump_tokens(&mut out, &mode, &lines);
    }

    let mut terminal = Terminal::stdout();
    if let Some(color) = options.color {
        terminal.set_color(color);
    }
    Display::from_config(&config)
        .with_max_width(options.width)
        .render_document(&mut terminal, &mode, &lines)
}

/// Send `log` records to stderr; `BBHL_LOG` overrides the default `warn` filter
fn init_logging() {
    let filter = EnvFilter::try_from_env("BBHL_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .without_time()
        .try_init();
}

/// Parse arguments; `None` means the program already did its job (help, version)
fn parse_args(args: &[String]) -> Result<Option<Options>> {
    let mut options = Options::default();
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--help" | "-h" => {
                print_usage();
                return Ok(None);
            }
            "--version" | "-V" => {
                println!("bbhl {}", env!("CARGO_PKG_VERSION"));
                return Ok(None);
            }
            "--tokens" | "-t" => options.tokens = true,
            "--line-numbers" | "-n" => options.line_numbers = true,
            "--strict" => options.strict = Some(true),
            "--no-strict" => options.strict = Some(false),
            "--color" => options.color = Some(true),
            "--no-color" => options.color = Some(false),
            "--config" | "-c" => {
                let path = iter.next().ok_or_else(|| missing_value(arg))?;
                options.config = Some(PathBuf::from(path));
            }
            "--width" | "-w" => {
                let value = iter.next().ok_or_else(|| missing_value(arg))?;
                let width = value
                    .parse::<usize>()
                    .map_err(|_| HighlightError::Usage(format!("invalid width: {}", value)))?;
                options.width = Some(width);
            }
            other if other.starts_with('-') && other != "-" => {
                return Err(HighlightError::Usage(format!(
                    "unknown option: {} (try --help)",
                    other
                )));
            }
            file => {
                if options.file.is_some() {
                    return Err(HighlightError::Usage("only one FILE may be given".to_string()));
                }
                if file != "-" {
                    options.file = Some(PathBuf::from(file));
                }
            }
        }
    }
    Ok(Some(options))
}

fn missing_value(option: &str) -> HighlightError {
    HighlightError::Usage(format!("{} needs a value", option))
}

fn print_usage() {
    println!("bbhl {} - BBCode syntax highlighter", env!("CARGO_PKG_VERSION"));
    println!();
    println!("Usage: bbhl [OPTIONS] [FILE]");
    println!();
    println!("Reads standard input when FILE is missing or '-'.");
    println!(
        "Mode: {} ({})",
        BbcodeMode::NAME,
        BbcodeMode::MIME_TYPES.join(", ")
    );
    println!();
    println!("Options:");
    println!("  -t, --tokens        Print one labelled token per line instead of colors");
    println!("  -n, --line-numbers  Show line numbers");
    println!("  -w, --width N       Cut lines at N columns");
    println!("  -c, --config PATH   Read configuration from PATH instead of ~/.bbhl.toml");
    println!("      --strict        Closing tags must match their opening tag (default)");
    println!("      --no-strict     Accept any closing tag name");
    println!("      --color         Always emit colors");
    println!("      --no-color      Never emit colors");
    println!("  -h, --help          Show this help message");
    println!("  -V, --version       Show version information");
}
