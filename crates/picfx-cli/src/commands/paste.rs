//! Paste command - copy one image into another

use crate::PasteArgs;
use crate::commands::{load_buffer, save_buffer};
use anyhow::Result;
use picfx_ops::composite::copy_into;
use tracing::warn;

pub fn run(args: PasteArgs, verbose: u8) -> Result<()> {
    let mut dest = load_buffer(&args.dest)?;
    let src = load_buffer(&args.src)?;

    if verbose > 0 {
        println!("Destination: {dest}");
        println!("Source:      {src}");
        println!("Offset:      row {}, col {}", args.row, args.col);
    }

    match copy_into(&mut dest, &src, args.row, args.col) {
        Some(written) if verbose > 0 => println!("Wrote {written}"),
        Some(_) => {}
        None => warn!(
            row = args.row,
            col = args.col,
            "source lies entirely outside the destination"
        ),
    }

    save_buffer(&args.output, &dest, None)?;
    if verbose > 0 {
        println!("Saved: {}", args.output.display());
    }
    Ok(())
}
