//! Placeholder - Main Entry Point

use clap::Parser;
use placeholder::{Args, init_logging, run};

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(&args.log_level);
    run(&args)
}
