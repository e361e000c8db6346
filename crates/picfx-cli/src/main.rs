//! picfx - apply raster filters to PNG and JPEG images

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use picfx_ops::Filter;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;
mod recipe;

#[derive(Parser)]
#[command(name = "picfx")]
#[command(author, version, about = "Apply raster filters to images")]
#[command(long_about = "
Applies a catalog of pixel filters (remaps, blurs, color transforms, edge
detection) to PNG and JPEG images.

Examples:
  picfx info beach.jpg                          # Show dimensions
  picfx apply beach.jpg -o out.png -f blur=5    # One filter
  picfx apply beach.jpg -o out.png -f negate -f wavy=10
  picfx apply beach.jpg -o out.png --recipe steps.yaml
  picfx paste canvas.png stamp.png --row 100 --col 0 -o collage.png
  picfx list                                    # Filter catalog
")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output (-v debug, -vv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Number of threads (0 = auto)
    #[arg(short = 'j', long, global = true, default_value = "0")]
    threads: usize,
}

#[derive(Subcommand)]
enum Commands {
    /// Display image dimensions and format
    #[command(visible_alias = "i")]
    Info(InfoArgs),

    /// Apply filters in order and save the result
    #[command(visible_alias = "a")]
    Apply(ApplyArgs),

    /// Copy one image into another at an offset
    Paste(PasteArgs),

    /// List every filter and its arguments
    #[command(visible_alias = "ls")]
    List,
}

#[derive(Args)]
struct InfoArgs {
    /// Input image(s)
    #[arg(required = true)]
    input: Vec<PathBuf>,
}

#[derive(Args)]
struct ApplyArgs {
    /// Input image
    input: PathBuf,

    /// Output image (format from extension)
    #[arg(short, long)]
    output: PathBuf,

    /// Filter spec such as blur=5 or stair-step=10,10 (repeatable)
    #[arg(short, long = "filter")]
    filters: Vec<Filter>,

    /// YAML recipe whose steps run before any --filter
    #[arg(short, long)]
    recipe: Option<PathBuf>,

    /// JPEG quality (1-100) when writing JPEG
    #[arg(short, long)]
    quality: Option<u8>,
}

#[derive(Args)]
struct PasteArgs {
    /// Destination image
    dest: PathBuf,

    /// Image to copy in
    src: PathBuf,

    /// Destination row of the top-left corner
    #[arg(long, default_value = "0")]
    row: u32,

    /// Destination column of the top-left corner
    #[arg(long, default_value = "0")]
    col: u32,

    /// Output image
    #[arg(short, long)]
    output: PathBuf,
}

/// Installs the log subscriber. `RUST_LOG` wins over `-v`.
fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if cli.threads > 0 {
        rayon::ThreadPoolBuilder::new()
            .num_threads(cli.threads)
            .build_global()
            .context("Failed to configure thread pool")?;
    }

    match cli.command {
        Commands::Info(args) => commands::info::run(args, cli.verbose),
        Commands::Apply(args) => commands::apply::run(args, cli.verbose),
        Commands::Paste(args) => commands::paste::run(args, cli.verbose),
        Commands::List => commands::list::run(),
    }
}
