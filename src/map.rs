use anyhow::{bail, Context, Result};

use crate::nbt::Tag;
use crate::palette::{self, Rgb};

pub const MAP_WIDTH: usize = 128;
pub const MAP_HEIGHT: usize = 128;
pub const MAP_LEN: usize = MAP_WIDTH * MAP_HEIGHT;

/// The raw color indices of a map, exactly MAP_LEN bytes, row-major.
pub struct MapColors(Vec<u8>);

/// Rendered RGB pixels, row-major with the same addressing as MapColors.
#[derive(PartialEq, Debug)]
pub struct Framebuffer {
    pub pixels: Vec<Rgb>,
}

impl Framebuffer {
    pub fn pixel(&self, x: usize, y: usize) -> Rgb {
        self.pixels[y * MAP_WIDTH + x]
    }
}

impl MapColors {
    /// Pulls the 'data' -> 'colors' byte array out of a decoded map
    /// container, rejecting anything that is not exactly a 128x128 map.
    pub fn from_nbt(root: &Tag) -> Result<MapColors> {
        let colors = root
            .get_path(&["data", "colors"])
            .context("malformed map container")?;
        let colors = colors
            .as_byte_array()
            .context("malformed map container: 'data.colors'")?;
        if colors.len() != MAP_LEN {
            bail!(
                "malformed map container: expected {} color bytes, found {}",
                MAP_LEN,
                colors.len()
            );
        }
        Ok(MapColors(colors.to_vec()))
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Renders the map. Each cell is looked up independently, so this is a
    /// pure function of the color indices.
    pub fn rasterize(&self) -> Framebuffer {
        let mut pixels = vec![palette::MISSING_COLOR; MAP_LEN];
        for y in 0..MAP_HEIGHT {
            for x in 0..MAP_WIDTH {
                let index = y * MAP_WIDTH + x;
                pixels[index] = palette::resolve(self.0[index]);
            }
        }
        Framebuffer { pixels }
    }
}
