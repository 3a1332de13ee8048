#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

const fn rgb(r: u8, g: u8, b: u8) -> Rgb {
    Rgb { r, g, b }
}

/// Base map colors, indexed by block id. Index 0 is the "transparent"
/// entry; the reference renderer draws it as plain black rather than
/// leaving the pixel unset, and so do we.
pub const BASE_COLORS: [Rgb; 61] = [
    rgb(0, 0, 0),
    rgb(127, 178, 56),
    rgb(247, 233, 163),
    rgb(199, 199, 199),
    rgb(255, 0, 0),
    rgb(160, 160, 255),
    rgb(167, 167, 167),
    rgb(0, 124, 0),
    rgb(255, 255, 255),
    rgb(164, 168, 184),
    rgb(151, 109, 77),
    rgb(112, 112, 112),
    rgb(64, 64, 255),
    rgb(143, 119, 72),
    rgb(255, 252, 245),
    rgb(216, 127, 51),
    rgb(178, 76, 216),
    rgb(102, 153, 216),
    rgb(229, 229, 51),
    rgb(127, 204, 25),
    rgb(242, 127, 165),
    rgb(76, 76, 76),
    rgb(153, 153, 153),
    rgb(76, 127, 153),
    rgb(127, 63, 178),
    rgb(51, 76, 178),
    rgb(102, 76, 51),
    rgb(102, 127, 51),
    rgb(153, 51, 51),
    rgb(25, 25, 25),
    rgb(250, 238, 77),
    rgb(92, 219, 213),
    rgb(74, 128, 255),
    rgb(0, 217, 58),
    rgb(129, 86, 49),
    rgb(112, 2, 0),
    rgb(209, 177, 161),
    rgb(159, 82, 36),
    rgb(149, 87, 108),
    rgb(112, 108, 138),
    rgb(186, 133, 36),
    rgb(103, 117, 53),
    rgb(160, 77, 78),
    rgb(57, 41, 35),
    rgb(135, 107, 98),
    rgb(87, 92, 92),
    rgb(122, 73, 88),
    rgb(76, 62, 92),
    rgb(76, 50, 35),
    rgb(76, 82, 42),
    rgb(142, 60, 46),
    rgb(37, 22, 16),
    rgb(189, 48, 49),
    rgb(148, 63, 97),
    rgb(92, 25, 29),
    rgb(22, 126, 134),
    rgb(58, 142, 140),
    rgb(86, 44, 62),
    rgb(20, 180, 133),
    rgb(100, 100, 100),
    rgb(216, 175, 147),
];

/// Brightness factors, indexed by shade id.
pub const SHADE_MULTIPLIERS: [f64; 4] = [0.71, 0.86, 1.0, 0.53];

/// Drawn for color indices whose block id falls outside the base table.
pub const MISSING_COLOR: Rgb = rgb(255, 0, 255);

fn shade(channel: u8, multiplier: f64) -> u8 {
    // a few products land exactly on .5 in f64; halves round to even
    (channel as f64 * multiplier).round_ties_even() as u8
}

/// Resolves a raw map color index to its RGB value. The index packs a
/// block id (upper 6 bits) and a shade id (lower 2 bits).
pub fn resolve(color_id: u8) -> Rgb {
    let block_id = (color_id / 4) as usize;
    let shade_id = (color_id % 4) as usize;
    if block_id >= BASE_COLORS.len() {
        return MISSING_COLOR;
    }
    let base = BASE_COLORS[block_id];
    let multiplier = SHADE_MULTIPLIERS[shade_id];
    rgb(
        shade(base.r, multiplier),
        shade(base.g, multiplier),
        shade(base.b, multiplier),
    )
}
