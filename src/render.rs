use bmp::{px, Image, Pixel};
use std::path::Path;

use anyhow::Result;

use crate::map::{Framebuffer, MAP_HEIGHT, MAP_WIDTH};

pub fn save_bitmap(fname: &Path, framebuffer: &Framebuffer) -> Result<()> {
    let mut img = Image::new(MAP_WIDTH as u32, MAP_HEIGHT as u32);
    for (x, y) in img.coordinates() {
        let p = framebuffer.pixel(x as usize, y as usize);
        img.set_pixel(x, y, px!(p.r, p.g, p.b));
    }
    img.save(fname)?;
    Ok(())
}
