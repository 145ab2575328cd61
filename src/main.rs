//! CLI entry point for dircrawl

use std::fs::File;
use std::io::{self, BufWriter, IsTerminal, Write};
use std::path::{Path, PathBuf};
use std::process;

use clap::error::ErrorKind;
use clap::{ArgAction, CommandFactory, Parser, ValueEnum};
use dircrawl::output::write_json;
use dircrawl::stats::write_stats;
use dircrawl::{
    CrawlError, JsonLinesWriter, OutputConfig, OutputFormat, StatsCollector, Traversal, TreeWalker,
    WalkerConfig, check_root, print_stats, write_records,
};
use termcolor::NoColor;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Color output mode
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
enum ColorMode {
    /// Auto-detect based on terminal and environment
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

/// Output document format
#[derive(Debug, Clone, Copy, ValueEnum)]
enum FormatArg {
    /// Indented JSON array
    Json,
    /// Single-line JSON array
    Compact,
    /// One JSON object per line, streamed while crawling
    Jsonl,
}

impl From<FormatArg> for OutputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Json => OutputFormat::Json,
            FormatArg::Compact => OutputFormat::Compact,
            FormatArg::Jsonl => OutputFormat::JsonLines,
        }
    }
}

/// Determine whether to use color output based on mode and environment.
fn should_use_color(mode: ColorMode) -> bool {
    match mode {
        ColorMode::Always => true,
        ColorMode::Never => false,
        ColorMode::Auto => {
            // Respect NO_COLOR environment variable (https://no-color.org/)
            if std::env::var_os("NO_COLOR").is_some() {
                return false;
            }
            if std::env::var_os("FORCE_COLOR").is_some() {
                return true;
            }
            if std::env::var("TERM").map(|t| t == "dumb").unwrap_or(false) {
                return false;
            }
            io::stdout().is_terminal()
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "dircrawl")]
#[command(about = "Recursively crawl a directory and collect file information")]
#[command(version)]
struct Args {
    /// Directory to crawl
    #[arg(default_value = ".")]
    directory: PathBuf,

    /// Write the result to FILE instead of stdout
    #[arg(short = 'o', long = "output", value_name = "FILE")]
    output: Option<PathBuf>,

    /// Output format (defaults to json, or a text summary with --stats)
    #[arg(long = "format", value_name = "FORMAT")]
    format: Option<FormatArg>,

    /// Print counts per entry type instead of the inventory (json or compact only)
    #[arg(long = "stats")]
    stats: bool,

    /// Control color output for --stats: auto, always, never
    #[arg(long = "color", value_name = "WHEN", default_value = "auto")]
    color: ColorMode,

    /// Record each directory level completely before descending
    #[arg(long = "breadth-first")]
    breadth_first: bool,

    /// Sort entries by name within each directory
    #[arg(long = "sort")]
    sort: bool,

    /// Descend only N levels deep
    #[arg(short = 'L', long = "level", value_parser = clap::value_parser!(u32).range(1..))]
    level: Option<u32>,

    /// More log output on stderr (-v info, -vv debug, -vvv trace)
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count)]
    verbose: u8,

    /// Only log errors
    #[arg(short = 'q', long = "quiet", conflicts_with = "verbose")]
    quiet: bool,
}

/// Install the stderr log subscriber. RUST_LOG, when set, overrides -v/-q.
fn init_logging(verbose: u8, quiet: bool) {
    let default_level = if quiet {
        "error"
    } else {
        match verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(io::stderr)
                .with_ansi(io::stderr().is_terminal())
                .with_target(false),
        )
        .with(filter)
        .init();
}

fn open_output(path: Option<&Path>) -> io::Result<Box<dyn Write>> {
    match path {
        Some(path) => Ok(Box::new(BufWriter::new(File::create(path)?))),
        None => Ok(Box::new(io::stdout().lock())),
    }
}

fn exit_with_crawl_error(err: &CrawlError) -> ! {
    match err {
        CrawlError::InvalidRoot { path, source } if source.kind() == io::ErrorKind::NotFound => {
            eprintln!("dircrawl: Directory '{}' does not exist.", path.display());
        }
        CrawlError::Sink { source } => {
            eprintln!("dircrawl: error writing output: {}", source);
        }
        _ => eprintln!("dircrawl: {}", err),
    }
    process::exit(1);
}

fn main() {
    let args = Args::parse();
    if args.stats && matches!(args.format, Some(FormatArg::Jsonl)) {
        Args::command()
            .error(
                ErrorKind::ArgumentConflict,
                "--format jsonl cannot be used with --stats (use json or compact)",
            )
            .exit();
    }
    init_logging(args.verbose, args.quiet);

    let walker_config = WalkerConfig {
        traversal: if args.breadth_first {
            Traversal::BreadthFirst
        } else {
            Traversal::DepthFirst
        },
        sort_entries: args.sort,
        max_depth: args.level.map(|level| level as usize),
    };
    let walker = TreeWalker::new(walker_config);

    let root = if args.directory.is_absolute() {
        args.directory.clone()
    } else {
        std::env::current_dir()
            .unwrap_or_else(|_| PathBuf::from("."))
            .join(&args.directory)
    };

    // Root problems surface before the output file is created or truncated
    let root = check_root(&root).unwrap_or_else(|e| exit_with_crawl_error(&e));

    let output_config = OutputConfig {
        format: args.format.map(OutputFormat::from).unwrap_or_default(),
        use_color: should_use_color(args.color),
    };
    let destination = args.output.as_deref();

    let result = if args.stats {
        // Without an explicit --format the summary is text, not JSON
        let as_json = args.format.is_some();
        run_stats(&walker, &root, &output_config, as_json, destination)
    } else {
        run_inventory(&walker, &root, &output_config, destination)
    };

    if let Err(e) = result {
        eprintln!("dircrawl: error writing output: {}", e);
        process::exit(1);
    }

    if let Some(ref path) = args.output {
        tracing::info!(file = %path.display(), "Results written to {}", path.display());
    }
}

/// Crawl and write the inventory document.
fn run_inventory(
    walker: &TreeWalker,
    root: &Path,
    config: &OutputConfig,
    destination: Option<&Path>,
) -> io::Result<()> {
    if config.format.is_streaming() {
        let mut sink = JsonLinesWriter::new(open_output(destination)?);
        if let Err(e) = walker.walk_into(root, &mut sink) {
            exit_with_crawl_error(&e);
        }
        return Ok(());
    }

    let records = walker
        .walk(root)
        .unwrap_or_else(|e| exit_with_crawl_error(&e));
    write_records(open_output(destination)?, &records, config.format)
}

/// Crawl and write the per-type summary.
fn run_stats(
    walker: &TreeWalker,
    root: &Path,
    config: &OutputConfig,
    as_json: bool,
    destination: Option<&Path>,
) -> io::Result<()> {
    let mut collector = StatsCollector::new();
    if let Err(e) = walker.walk_into(root, &mut collector) {
        exit_with_crawl_error(&e);
    }
    let stats = collector.finalize();

    if as_json {
        let pretty = config.format == OutputFormat::Json;
        return write_json(open_output(destination)?, &stats, pretty);
    }
    match destination {
        Some(path) => {
            let mut out = NoColor::new(open_output(Some(path))?);
            write_stats(&mut out, &stats)?;
            out.flush()
        }
        None => print_stats(&stats, config.use_color),
    }
}
