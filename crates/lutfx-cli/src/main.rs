//! lutfx - LUT color grading from the command line
//!
//! Evaluates the grading pipeline on single colors, bakes it into `.cube`
//! files, and inspects profile catalogues.

use anyhow::{Context, Result};
use clap::{ArgAction, Args, Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "lutfx")]
#[command(author, version, about = "LUT color grading pipeline")]
#[command(long_about = "
Runs the lutfx grading pipeline outside of a renderer.

Examples:
  lutfx defaults -o grade.yaml                 # Write the default parameters
  lutfx eval --params grade.yaml 0.5 0.4 0.3   # Grade one color through an identity LUT
  lutfx eval --lut horror_01.cube 0.18 0.18 0.18
  lutfx bake --params grade.yaml --lut horror_01.cube -o graded.cube
  lutfx catalogue luts/profiles.yaml           # List profiles by category
")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output (repeat for more)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    /// Number of threads (0 = auto)
    #[arg(short = 'j', long, global = true, default_value = "0")]
    threads: usize,
}

#[derive(Subcommand)]
enum Commands {
    /// Grade a single RGB color
    #[command(visible_alias = "e")]
    Eval(EvalArgs),

    /// Bake parameters (and an optional base LUT) into one cube
    #[command(visible_alias = "b")]
    Bake(BakeArgs),

    /// Print or write the default parameter block
    Defaults(DefaultsArgs),

    /// List the profiles of a catalogue manifest
    #[command(visible_alias = "cat")]
    Catalogue(CatalogueArgs),
}

/// Arguments for the `eval` command.
#[derive(Args)]
struct EvalArgs {
    /// Red
    #[arg(allow_negative_numbers = true)]
    r: f32,

    /// Green
    #[arg(allow_negative_numbers = true)]
    g: f32,

    /// Blue
    #[arg(allow_negative_numbers = true)]
    b: f32,

    /// Parameter file (YAML); defaults when omitted
    #[arg(short, long)]
    params: Option<PathBuf>,

    /// LUT to sample (.cube)
    #[arg(short, long, conflicts_with = "identity")]
    lut: Option<PathBuf>,

    /// Use an identity LUT of this size instead of a file
    #[arg(long, default_value = "33")]
    identity: usize,

    /// Interpolation: nearest, linear, tetrahedral
    #[arg(short, long, default_value = "linear")]
    interp: String,
}

/// Arguments for the `bake` command.
#[derive(Args)]
struct BakeArgs {
    /// Output cube
    #[arg(short, long)]
    output: PathBuf,

    /// Parameter file (YAML); defaults when omitted
    #[arg(short, long)]
    params: Option<PathBuf>,

    /// Base LUT applied after the grading chain
    #[arg(short, long)]
    lut: Option<PathBuf>,

    /// Edge length of the baked cube
    #[arg(short, long, default_value = "33")]
    size: usize,

    /// TITLE written into the cube
    #[arg(short, long)]
    title: Option<String>,
}

/// Arguments for the `defaults` command.
#[derive(Args)]
struct DefaultsArgs {
    /// Output file; stdout when omitted
    #[arg(short, long)]
    output: Option<PathBuf>,
}

/// Arguments for the `catalogue` command.
#[derive(Args)]
struct CatalogueArgs {
    /// Manifest (YAML)
    manifest: PathBuf,
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    // A subscriber may already be installed when embedded; keep that one.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    // Configure thread pool
    if cli.threads > 0 {
        rayon::ThreadPoolBuilder::new()
            .num_threads(cli.threads)
            .build_global()
            .context("Failed to configure thread pool")?;
    }

    match cli.command {
        Commands::Eval(args) => commands::eval::run(args, cli.verbose),
        Commands::Bake(args) => commands::bake::run(args, cli.verbose),
        Commands::Defaults(args) => commands::defaults::run(args, cli.verbose),
        Commands::Catalogue(args) => commands::catalogue::run(args, cli.verbose),
    }
}
