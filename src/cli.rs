use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "dqs")]
#[command(
    version,
    about = "Design Quality Scorer - profile screenshots and score design maturity",
    long_about = "Design Quality Scorer (DQS)\n\nModes:\n- score: profile and score a single design against the maturity rubric.\n- batch: profile, score and curate a whole manifest of designs.\n- showcase: emit only the curated top-example sets for a manifest.\n\nUse --help on any subcommand for details."
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(
        long,
        global = true,
        value_name = "PATH",
        help = "Optional rubric config file (TOML); CLI flags override config"
    )]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Profile and score a single design
    Score {
        #[arg(
            long,
            help = "Screenshot image for the design (png, jpg, webp, gif, bmp, tiff)",
            conflicts_with = "design"
        )]
        input: Option<PathBuf>,

        #[arg(
            long,
            help = "JSON design-input document (id, screenshot, text blocks, button signals, tags)"
        )]
        design: Option<PathBuf>,

        #[arg(long, help = "Pre-aggregated curated reference population (JSON)")]
        reference_aggregate: Option<PathBuf>,

        #[arg(long, help = "Pre-aggregated library population (JSON)")]
        library_aggregate: Option<PathBuf>,

        #[arg(long, help = "Fixed RNG seed for reproducible color clustering")]
        seed: Option<u64>,

        #[arg(long, help = "Run OCR on the screenshot when no text blocks are supplied")]
        ocr: bool,

        #[arg(long, value_enum, default_value = "json", help = "Output format")]
        format: OutputFormat,

        #[arg(long, short, help = "Output file path (stdout if omitted)")]
        output: Option<PathBuf>,
    },

    /// Profile, score and curate a manifest of designs
    Batch {
        #[arg(long, help = "JSON manifest with a `designs` array")]
        manifest: PathBuf,

        #[arg(long, help = "Pre-aggregated curated reference population (JSON)")]
        reference_aggregate: Option<PathBuf>,

        #[arg(long, help = "Pre-aggregated library population (JSON)")]
        library_aggregate: Option<PathBuf>,

        #[arg(long, help = "Worker bound for per-design profiling (defaults to CPU cores)")]
        concurrency: Option<usize>,

        #[arg(long, help = "Fixed RNG seed for reproducible clustering and tag sampling")]
        seed: Option<u64>,

        #[arg(long, help = "Run OCR for designs without supplied text blocks")]
        ocr: bool,

        #[arg(long, value_enum, default_value = "json", help = "Output format")]
        format: OutputFormat,

        #[arg(long, short, help = "Output file path (stdout if omitted)")]
        output: Option<PathBuf>,
    },

    /// Emit only the curated top-example sets for a manifest
    Showcase {
        #[arg(long, help = "JSON manifest with a `designs` array")]
        manifest: PathBuf,

        #[arg(long, help = "Pre-aggregated curated reference population (JSON)")]
        reference_aggregate: Option<PathBuf>,

        #[arg(long, help = "Pre-aggregated library population (JSON)")]
        library_aggregate: Option<PathBuf>,

        #[arg(long, help = "Ranked entries kept per category (overrides config)")]
        top: Option<usize>,

        #[arg(long, help = "Cap per highlight-tag pool (overrides config)")]
        tag_cap: Option<usize>,

        #[arg(long, help = "Fixed RNG seed for reproducible tag sampling")]
        seed: Option<u64>,

        #[arg(long, value_enum, default_value = "json", help = "Output format")]
        format: OutputFormat,

        #[arg(long, short, help = "Output file path (stdout if omitted)")]
        output: Option<PathBuf>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Compact JSON on one line
    Json,
    /// Indented JSON for terminals
    Pretty,
}

pub fn parse() -> Cli {
    Cli::parse()
}
