use minifb::{Key, Scale, Window, WindowOptions};
use std::time::Duration;

use anyhow::{anyhow, Result};

use crate::map::{Framebuffer, MAP_HEIGHT, MAP_WIDTH};

/// Shows the rendered map in a window until it is closed or Escape is
/// pressed. 128x128 is tiny on a modern screen, so scale it up.
pub fn display(framebuffer: &Framebuffer) -> Result<()> {
    let buffer: Vec<u32> = framebuffer
        .pixels
        .iter()
        .map(|p| ((p.r as u32) << 16) | ((p.g as u32) << 8) | p.b as u32)
        .collect();

    let options = WindowOptions {
        scale: Scale::X4,
        ..WindowOptions::default()
    };
    let mut window = Window::new("map", MAP_WIDTH, MAP_HEIGHT, options)
        .map_err(|e| anyhow!("cannot create window: {}", e))?;
    window.limit_update_rate(Some(Duration::from_micros(16600)));

    while window.is_open() && !window.is_key_down(Key::Escape) {
        window
            .update_with_buffer(&buffer, MAP_WIDTH, MAP_HEIGHT)
            .map_err(|e| anyhow!("cannot update window: {}", e))?;
    }
    Ok(())
}
