use clap::{ArgAction, Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(author, version, about = "Split a directory into size-bounded zip archives", long_about = None)]
pub struct Cli {
    /// More log output (-v info, -vv debug); RUST_LOG overrides
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Args, Clone)]
pub struct SourceArgs {
    /// the directory which needs to be zipped
    #[arg(short = 'd', long = "dir")]
    pub dir: PathBuf,

    /// split size (in MB)
    #[arg(short = 's', long = "size", default_value_t = 1.0)]
    pub size_mb: f64,

    /// output zip directory (not zip file); keep it outside --dir, or later
    /// runs will pack earlier archives
    #[arg(short = 'o', long = "out", default_value = "zip-splits")]
    pub out: PathBuf,

    /// output zip file name prefix
    #[arg(short = 'n', long = "name", default_value = "zip")]
    pub name: String,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Split a directory into {name}-{index}.zip archives
    Split {
        #[command(flatten)]
        source: SourceArgs,

        /// deflate level 0-9
        #[arg(long, conflicts_with = "store")]
        level: Option<i64>,

        /// store entries without compression
        #[arg(long)]
        store: bool,

        /// zero entry timestamps and permissions for reproducible archives
        #[arg(long)]
        deterministic: bool,

        /// overwrite existing archives without asking
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// Show how the directory would be split, without writing anything
    Plan {
        #[command(flatten)]
        source: SourceArgs,

        /// print the plan as JSON
        #[arg(long)]
        json: bool,
    },

    /// List the entries of a split archive
    List { archive: PathBuf },
}
