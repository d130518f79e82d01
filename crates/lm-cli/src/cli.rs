use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "ledger-meta",
    about = "Decode ledger transaction metadata into typed affected nodes",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// Decode a metadata object or an AffectedNodes array
    Decode(DecodeArgs),
    /// Show field-level changes of modified objects
    Changes(ChangesArgs),
    /// List known entry types and whether each decodes fully
    Catalog(CatalogArgs),
}

#[derive(Args)]
pub struct DecodeArgs {
    /// JSON file to read, or `-` for stdin
    #[arg(default_value = "-")]
    pub input: String,
    /// TOML decoder configuration
    #[arg(long)]
    pub config: Option<PathBuf>,
    /// Report failing nodes instead of aborting
    #[arg(long)]
    pub skip_invalid: bool,
    /// Worker threads for large batches
    #[arg(short = 'j', long)]
    pub workers: Option<usize>,
}

#[derive(Args)]
pub struct ChangesArgs {
    /// JSON file to read, or `-` for stdin
    #[arg(default_value = "-")]
    pub input: String,
}

#[derive(Args)]
pub struct CatalogArgs {
    /// Only list kinds with a typed schema
    #[arg(long)]
    pub decodable: bool,
}
