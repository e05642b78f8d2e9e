//! Placeholder - command-line front end
//!
//! Reads a template from a file or stdin, builds a lookup table from
//! files, the environment and `--define` values, and writes the resolved
//! text to stdout or a file.

pub mod cli;
pub mod logging;

use std::fs;
use std::io::{self, Read, Write};
use std::path::Path;

use anyhow::{Context, Result};
use tracing::{info, warn};

pub use cli::Args;
pub use logging::init_logging;

/// Runs one resolution as described by `args`.
///
/// # Errors
///
/// Fails on invalid options, unreadable inputs, unwritable output, or a
/// missing token under the `throw_error` strategy.
pub fn run(args: &Args) -> Result<()> {
    let resolver = args.resolver()?;
    let lookup = args.lookup_table()?;
    let template = read_template(args.template.as_deref())?;

    let outcome = resolver
        .resolve_detailed(&template, &lookup)
        .context("failed to resolve template")?;

    if resolver.config().resolve_recursively && !outcome.reached_fixed_point {
        warn!(
            passes = outcome.passes,
            "max depth reached while the template was still changing"
        );
    }
    if !outcome.is_complete() {
        info!(unresolved = ?outcome.unresolved, "tokens left without a value");
    }

    write_output(args.output.as_deref(), &outcome.resolved)
}

fn read_template(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) if path != Path::new("-") => fs::read_to_string(path)
            .with_context(|| format!("failed to read template {}", path.display())),
        _ => {
            let mut template = String::new();
            io::stdin()
                .read_to_string(&mut template)
                .context("failed to read template from stdin")?;
            Ok(template)
        }
    }
}

fn write_output(path: Option<&Path>, resolved: &str) -> Result<()> {
    if let Some(path) = path {
        fs::write(path, resolved)
            .with_context(|| format!("failed to write output {}", path.display()))
    } else {
        let mut stdout = io::stdout().lock();
        stdout
            .write_all(resolved.as_bytes())
            .and_then(|()| stdout.flush())
            .context("failed to write output to stdout")
    }
}
