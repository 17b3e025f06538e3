//! slidegraph CLI - running average degree of a label co-occurrence stream.
//!
//! # Usage
//!
//! ```bash
//! # One output line per in-window event
//! slidegraph run events.jsonl -o output.txt
//!
//! # Wider window, case-insensitive labels
//! slidegraph run tweets.txt -o output.txt --window 120 --lowercase
//!
//! # Settings from a JSON file (flags still win)
//! slidegraph run tweets.txt -o output.txt --config window.json
//!
//! # Print the graph left at the end of the stream
//! slidegraph dump tweets.txt
//! ```
//!
//! Log verbosity follows `RUST_LOG` (default `warn`); logs go to stderr.

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use indicatif::ProgressBar;
use slidegraph::{format_degree, DegreeStream, EventParser, WindowConfig};
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "slidegraph")]
#[command(about = "Average degree of a co-occurrence graph over a sliding time window", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Stream events and write the average degree after each one
    Run {
        /// Input file (one JSON event per line)
        input: PathBuf,

        /// Output file (one value per processed event)
        #[arg(short, long)]
        output: PathBuf,

        #[command(flatten)]
        window: WindowArgs,
    },

    /// Stream events and print the final graph
    Dump {
        /// Input file (one JSON event per line)
        input: PathBuf,

        #[command(flatten)]
        window: WindowArgs,
    },
}

#[derive(Args)]
struct WindowArgs {
    /// Window size in seconds (default 60)
    #[arg(short, long)]
    window: Option<i64>,

    /// JSON config file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Fold labels to lower case
    #[arg(long)]
    lowercase: bool,

    /// Keep nodes that eviction leaves without links
    #[arg(long)]
    keep_isolated: bool,
}

impl WindowArgs {
    fn resolve(&self) -> Result<WindowConfig> {
        let mut config = match &self.config {
            Some(path) => WindowConfig::from_json_file(path)
                .with_context(|| format!("Failed to load config {}", path.display()))?,
            None => WindowConfig::default(),
        };
        if let Some(window) = self.window {
            config.window_size = window;
        }
        if self.lowercase {
            config.lowercase_labels = true;
        }
        if self.keep_isolated {
            config.prune_isolated = false;
        }
        config.validate()?;
        Ok(config)
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            input,
            output,
            window,
        } => cmd_run(&input, &output, &window.resolve()?),
        Commands::Dump { input, window } => cmd_dump(&input, &window.resolve()?),
    }
}

fn open_input(input: &Path) -> Result<File> {
    File::open(input).with_context(|| format!("Failed to open {}", input.display()))
}

/// Feed every event in `file` through `stream`, calling `emit` for each
/// processed one. Returns the number of lines that failed to parse.
fn drive<F>(
    file: File,
    input: &Path,
    config: &WindowConfig,
    stream: &mut DegreeStream,
    mut emit: F,
) -> Result<usize>
where
    F: FnMut(f64) -> Result<()>,
{
    let parser = EventParser::new().with_lowercase(config.lowercase_labels);

    let mut malformed = 0;
    for event in parser.events(BufReader::new(file)) {
        let event = match event {
            Ok(event) => event,
            Err(slidegraph::Error::Parse { line, message }) => {
                tracing::warn!(line, %message, "skipping malformed event");
                malformed += 1;
                continue;
            }
            Err(e) => {
                return Err(e).with_context(|| format!("Failed to read {}", input.display()));
            }
        };
        if let Some(degree) = stream.process(&event) {
            emit(degree)?;
        }
    }
    Ok(malformed)
}

fn cmd_run(input: &Path, output: &Path, config: &WindowConfig) -> Result<()> {
    let source = open_input(input)?;
    let start = Instant::now();
    let pb = ProgressBar::new_spinner();
    pb.set_message(format!("Streaming {}...", input.display()));

    let file = File::create(output).with_context(|| format!("Failed to create {}", output.display()))?;
    let mut writer = BufWriter::new(file);
    let mut stream = DegreeStream::new(config);

    let malformed = drive(source, input, config, &mut stream, |degree| {
        writeln!(writer, "{}", format_degree(degree))?;
        pb.tick();
        Ok(())
    })?;
    writer
        .flush()
        .with_context(|| format!("Failed to write {}", output.display()))?;

    pb.finish_and_clear();

    let stats = stream.stats();
    println!("Processed:  {}", stats.processed);
    println!("Skipped:    {}", stats.skipped);
    println!("Malformed:  {}", malformed);
    println!("Evicted:    {}", stats.evicted);
    println!("Done in {:.2?} -> {}", start.elapsed(), output.display());
    Ok(())
}

fn cmd_dump(input: &Path, config: &WindowConfig) -> Result<()> {
    let source = open_input(input)?;
    let mut stream = DegreeStream::new(config);
    drive(source, input, config, &mut stream, |_| Ok(()))?;

    let graph = stream.graph();
    println!("Window: {}s, current time: {}", graph.window_size(), graph.current_time());
    println!("{}", graph);
    Ok(())
}
