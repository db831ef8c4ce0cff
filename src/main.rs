//! CLI for cite-links - Link numeric citations in pasted answers to their sources.

use std::fmt;
use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use std::process;

use clap::{Parser, Subcommand};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use cite_links::{apply, parse_headers, LineRange, Settings};

// ---------------------------------------------------------------------------
// CLI definition
// ---------------------------------------------------------------------------

/// Link numeric citations like [3] to the URLs listed in the text's sources section
#[derive(Parser)]
#[command(name = "cite-links")]
#[command(version)]
#[command(after_help = "\
Examples:
  cite-links convert answer.md
  cite-links convert answer.md -o answer.linked.md
  pbpaste | cite-links convert --header 'Sources:' | pbcopy
  cite-links headers -c settings.json")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Rewrite citation markers in a document
    #[command(after_help = "\
Examples:
  cite-links convert notes.md --lines 12:40
  cite-links convert notes.md -c settings.json -o notes.md
  cite-links convert - --header Quellen --header Sources

The sources section starts at a line equal to one of the headers
(default: Quellen, Sources, Citations:) and runs to the end of the text.")]
    Convert {
        /// Input document (use '-' for stdin)
        #[arg(default_value = "-")]
        input: PathBuf,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Settings file (JSON)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Sources header line; replaces the configured headers (repeatable)
        #[arg(long = "header")]
        headers: Vec<String>,

        /// Only rewrite these lines, as START:END (1-based, inclusive)
        #[arg(long)]
        lines: Option<LineRange>,

        /// Don't fall back to the whole document when --lines is absent
        #[arg(long)]
        no_select_all: bool,
    },

    /// Print the effective sources headers, one per line
    Headers {
        /// Settings file (JSON)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Manage the settings file
    #[command(subcommand)]
    Config(ConfigCommands),
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Write a settings file with default or given values
    Init {
        /// Where to write the settings file
        path: PathBuf,

        /// Headers as newline-separated text
        #[arg(long)]
        headers: Option<String>,

        /// Disable the whole-document fallback
        #[arg(long)]
        no_select_all: bool,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

// ---------------------------------------------------------------------------
// AppError — semantic exit codes
// ---------------------------------------------------------------------------

enum AppError {
    /// Exit 10 — input file not found / unreadable
    InputFile(String),
    /// Exit 11 — settings file unreadable / invalid
    Settings(String),
    /// Exit 12 — line range does not fit the document
    Selection(String),
    /// Exit 13 — cannot write output file
    OutputFile(String),
}

impl AppError {
    fn exit_code(&self) -> i32 {
        match self {
            AppError::InputFile(_) => 10,
            AppError::Settings(_) => 11,
            AppError::Selection(_) => 12,
            AppError::OutputFile(_) => 13,
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::InputFile(msg) => {
                write!(f, "{}\n  hint: verify the file path is correct", msg)
            }
            AppError::Settings(msg) => {
                write!(
                    f,
                    "{}\n  hint: the settings file must be a JSON object such as {{\"sourceHeaders\": [\"Sources\"], \"autoSelectAll\": true}}",
                    msg
                )
            }
            AppError::Selection(msg) => {
                write!(
                    f,
                    "{}\n  hint: line numbers start at 1 and must not exceed the document length",
                    msg
                )
            }
            AppError::OutputFile(msg) => {
                write!(
                    f,
                    "{}\n  hint: check that the output directory exists and is writable",
                    msg
                )
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

fn main() {
    init_tracing();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        process::exit(e.exit_code());
    }
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

fn run() -> Result<(), AppError> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Convert {
            input,
            output,
            config,
            headers,
            lines,
            no_select_all,
        } => {
            let mut settings = load_settings(config.as_deref())?;
            if !headers.is_empty() {
                settings.source_headers = headers;
            }
            if no_select_all {
                settings.auto_select_all = false;
            }
            convert_command(&input, output.as_deref(), lines, &settings)?;
        }
        Commands::Headers { config } => {
            headers_command(&load_settings(config.as_deref())?);
        }
        Commands::Config(ConfigCommands::Init {
            path,
            headers,
            no_select_all,
            force,
        }) => {
            config_init_command(&path, headers.as_deref(), no_select_all, force)?;
        }
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Commands
// ---------------------------------------------------------------------------

/// Loads settings from `path`, or the defaults when no path is given.
fn load_settings(path: Option<&Path>) -> Result<Settings, AppError> {
    match path {
        Some(path) => Settings::load(path)
            .map_err(|e| AppError::Settings(format!("'{}': {}", path.display(), e))),
        None => Ok(Settings::default()),
    }
}

/// Rewrite citation markers in a document.
fn convert_command(
    input: &Path,
    output: Option<&Path>,
    lines: Option<LineRange>,
    settings: &Settings,
) -> Result<(), AppError> {
    // 1. Read the document (support '-' for stdin)
    let document = if input == Path::new("-") {
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .map_err(|e| AppError::InputFile(format!("failed to read from stdin: {}", e)))?;
        buf
    } else {
        fs::read_to_string(input)
            .map_err(|e| AppError::InputFile(format!("'{}': {}", input.display(), e)))?
    };

    if lines.is_none() && !settings.auto_select_all {
        warn!("no line range given and whole-document fallback is disabled; nothing to convert");
    }

    // 2. Select, rewrite and splice back
    let result = apply(&document, lines, settings)
        .map_err(|e| AppError::Selection(e.to_string()))?;

    // 3. Report a header that only matched after trimming
    if result.header_found && !result.section_found {
        warn!("a sources header was found only with surrounding whitespace; it does not start a sources section");
    }

    // 4. Write to file or stdout
    if let Some(output_path) = output {
        fs::write(output_path, &result.text).map_err(|e| {
            AppError::OutputFile(format!("'{}': {}", output_path.display(), e))
        })?;
        info!(
            references = result.references.len(),
            links = result.citations_linked,
            path = %output_path.display(),
            "converted citations"
        );
    } else {
        let stdout = io::stdout();
        let mut handle = stdout.lock();
        write!(handle, "{}", result.text)
            .map_err(|e| AppError::OutputFile(format!("stdout: {}", e)))?;
    }

    Ok(())
}

/// Print the effective sources headers.
fn headers_command(settings: &Settings) {
    for header in &settings.source_headers {
        println!("{}", header);
    }
}

/// Write a settings file.
fn config_init_command(
    path: &Path,
    headers: Option<&str>,
    no_select_all: bool,
    force: bool,
) -> Result<(), AppError> {
    if path.exists() && !force {
        return Err(AppError::Settings(format!(
            "'{}' already exists (use --force to overwrite)",
            path.display()
        )));
    }

    let mut settings = Settings::default();
    if let Some(text) = headers {
        settings.source_headers = parse_headers(text);
        if settings.source_headers.is_empty() {
            warn!("no headers given; citations will never be converted with these settings");
        }
    }
    settings.auto_select_all = !no_select_all;

    settings
        .save(path)
        .map_err(|e| AppError::Settings(format!("'{}': {}", path.display(), e)))?;
    info!(path = %path.display(), headers = settings.source_headers.len(), "wrote settings");

    Ok(())
}
