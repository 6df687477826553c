//! Mustache Lite CLI
//!
//! Usage:
//!   mustache-lite [OPTIONS] [TEMPLATE]
//!
//! Options:
//!   -d, --data <FILE>      Render data (TOML format)
//!   -p, --partials <DIR>   Directory to load `{{>name}}` partials from
//!       --ext <EXT>        Partial file extension [default: mustache]
//!       --no-escape        Do not HTML-escape `{{name}}` output
//!       --dump             Print the parsed tree instead of rendering
//!   -v, --verbose          Log parsing and partial resolution to stderr
//!   -h, --help             Print help

use std::fs;
use std::io::{self, Read, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use mustache_lite::{PartialDir, PartialLoader, RenderConfig, RenderError, Template, Value};

#[derive(Parser)]
#[command(name = "mustache-lite")]
#[command(about = "Render mustache templates against TOML data")]
struct Cli {
    /// Template file (reads from stdin if not provided)
    template: Option<PathBuf>,

    /// Render data file (TOML format)
    #[arg(short, long)]
    data: Option<PathBuf>,

    /// Directory containing partial templates
    #[arg(short, long)]
    partials: Option<PathBuf>,

    /// File extension of partial templates
    #[arg(long, default_value = mustache_lite::template::DEFAULT_EXTENSION)]
    ext: String,

    /// Emit variables without HTML escaping
    #[arg(long)]
    no_escape: bool,

    /// Print the parsed tree instead of rendering
    #[arg(long)]
    dump: bool,

    /// Log debug information to stderr
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("{}", message);
            ExitCode::FAILURE
        }
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn run(cli: &Cli) -> Result<(), String> {
    let (source, filename) = read_template(cli.template.as_ref())?;

    let template = Template::new(&source);
    if let Some(error) = template.error() {
        return Err(error.format(&source, &filename));
    }

    if cli.dump {
        print!("{}", template.dump());
        return Ok(());
    }

    let data = match &cli.data {
        Some(path) => Value::from_file(path)
            .map_err(|e| format!("Error loading data '{}': {}", path.display(), e))?,
        None => Value::object(),
    };

    let partials = cli
        .partials
        .as_ref()
        .map(|dir| PartialDir::new(dir).with_extension(&cli.ext));
    let loader = partials.as_ref().map(|p| p as &dyn PartialLoader);

    let config = RenderConfig::new().with_escape_html(!cli.no_escape);
    let stdout = io::stdout();
    let mut out = io::BufWriter::new(stdout.lock());
    template
        .render_with(&mut out, &data, &config, loader)
        .map_err(|e| describe_render_error(e, &filename))?;
    out.flush().map_err(|e| format!("Error writing output: {}", e))
}

fn read_template(path: Option<&PathBuf>) -> Result<(String, String), String> {
    match path {
        Some(path) => fs::read_to_string(path)
            .map(|content| (content, path.display().to_string()))
            .map_err(|e| format!("Error reading file '{}': {}", path.display(), e)),
        None => {
            let mut buffer = String::new();
            io::stdin()
                .read_to_string(&mut buffer)
                .map_err(|e| format!("Error reading from stdin: {}", e))?;
            Ok((buffer, "<stdin>".to_string()))
        }
    }
}

fn describe_render_error(error: RenderError, filename: &str) -> String {
    match error {
        RenderError::PartialParse { name, source } => {
            format!("Error in partial '{}' used by {}: {}", name, filename, source)
        }
        other => format!("Error rendering {}: {}", filename, other),
    }
}
