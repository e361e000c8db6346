//! Image info command.

use crate::InfoArgs;
use anyhow::Result;
use picfx_io::Format;
use std::fs;

/// Prints dimensions, format and file size of each input.
pub fn run(args: InfoArgs, verbose: u8) -> Result<()> {
    for path in &args.input {
        let file_size = fs::metadata(path)?.len();
        let format = Format::detect(path).unwrap_or(Format::Unknown);
        let buf = super::load_buffer(path)?;

        println!("{}", path.display());
        println!("  Format:     {format}");
        println!("  Size:       {} rows x {} cols", buf.height(), buf.width());
        println!("  Pixels:     {}", buf.bounds().area());
        println!("  File size:  {file_size} B");
        if verbose > 0 {
            let opaque = buf.pixels().iter().all(|px| px.a == 255);
            println!("  Opaque:     {opaque}");
        }
        if args.input.len() > 1 {
            println!();
        }
    }
    Ok(())
}
