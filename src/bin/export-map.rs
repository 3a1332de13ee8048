extern crate mcmap;

use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::Parser;

use mcmap::{map, nbt, render, ui};

/// Exports a Minecraft map_#.dat file as an image
#[derive(Parser)]
struct Cli {
    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity,
    /// Map data file (map_#.dat)
    input: PathBuf,
    #[clap(short, long, default_value_t = false)]
    /// Show the map image in a window
    display: bool,
    /// File to save the map image to (.bmp)
    #[clap(short, long)]
    output: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Cli::parse();
    env_logger::Builder::new()
        .filter_level(args.verbose.log_level_filter())
        .init();

    if !args.input.exists() {
        bail!("no map file exists at: {}", args.input.display());
    }

    let root = nbt::load(&args.input)?;
    let colors = map::MapColors::from_nbt(&root)?;
    let framebuffer = colors.rasterize();

    if let Some(output) = &args.output {
        match render::save_bitmap(output, &framebuffer) {
            Ok(()) => {
                println!("Saved map image to {}", output.display());
            }
            Err(e) => {
                log::error!("cannot save image: {}", e);
            }
        }
    }
    if args.display {
        if let Err(e) = ui::display(&framebuffer) {
            log::error!("cannot display image: {}", e);
        }
    }
    Ok(())
}
