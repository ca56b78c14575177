use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use link_explorer::{
    config::DEFAULT_FEEDBACK_STORE_PATH,
    feedback::tools::{sample_rows, split_by_version},
    logging,
};

/// Prepare collected feedback for the reporting pipeline.
#[derive(Debug, Parser)]
#[command(name = "feedback-tools", version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Write one CSV per model version.
    Split {
        #[arg(long, default_value = DEFAULT_FEEDBACK_STORE_PATH)]
        store: PathBuf,
        #[arg(long, default_value = "data")]
        out: PathBuf,
    },
    /// Draw a uniform random sample of rows.
    Sample {
        #[arg(long)]
        input: PathBuf,
        #[arg(long)]
        out: PathBuf,
        #[arg(short = 'n', long = "count", default_value_t = 30)]
        n: usize,
    },
}

fn main() -> Result<()> {
    logging::init()?;

    match Cli::parse().command {
        Command::Split { store, out } => {
            let counts = split_by_version(&store, &out)?;
            for (version, rows) in counts {
                println!("{version}\t{rows}");
            }
        }
        Command::Sample { input, out, n } => {
            let written = sample_rows(&input, &out, n, &mut rand::thread_rng())?;
            println!("{written}");
        }
    }
    Ok(())
}
