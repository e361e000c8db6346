//! Apply command - run catalog filters over one image

use crate::ApplyArgs;
use crate::commands::{load_buffer, save_buffer};
use crate::recipe::Recipe;
use anyhow::{Context, Result, bail};
use picfx_ops::Filter;
use tracing::{debug, trace};

pub fn run(args: ApplyArgs, verbose: u8) -> Result<()> {
    let steps = collect_steps(&args)?;
    if steps.is_empty() {
        bail!("Nothing to apply: pass --filter or --recipe");
    }
    trace!(count = steps.len(), "apply");

    let mut buf = load_buffer(&args.input)?;
    if verbose > 0 {
        println!("Loaded {}: {}", args.input.display(), buf);
    }

    for (i, step) in steps.iter().enumerate() {
        debug!(step = i, filter = %step, mode = ?step.mode(), "running");
        step.apply_in_place(&mut buf)
            .with_context(|| format!("Step {} ({step}) failed", i + 1))?;
        if verbose > 0 {
            println!("  [{}/{}] {step}", i + 1, steps.len());
        }
    }

    save_buffer(&args.output, &buf, args.quality)?;
    if verbose > 0 {
        println!("Saved: {}", args.output.display());
    }
    Ok(())
}

/// Recipe steps first, then `--filter` specs.
fn collect_steps(args: &ApplyArgs) -> Result<Vec<Filter>> {
    let mut steps = match &args.recipe {
        Some(path) => Recipe::load(path)?.steps,
        None => Vec::new(),
    };
    steps.extend(args.filters.iter().cloned());
    Ok(steps)
}
