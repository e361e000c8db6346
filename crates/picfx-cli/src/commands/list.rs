//! Filter catalog listing.

use anyhow::Result;
use picfx_ops::CATALOG;

/// Prints each filter spec with its argument syntax and a summary.
pub fn run() -> Result<()> {
    let width = CATALOG
        .iter()
        .map(|info| spec_of(info.name, info.args).len())
        .max()
        .unwrap_or(0);
    for info in CATALOG {
        let spec = spec_of(info.name, info.args);
        println!("{spec:<width$}  {}", info.summary);
    }
    Ok(())
}

fn spec_of(name: &str, args: &str) -> String {
    if args.is_empty() {
        name.to_string()
    } else {
        format!("{name}={args}")
    }
}
