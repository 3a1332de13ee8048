pub mod map;
pub mod nbt;
pub mod palette;
pub mod render;
pub mod ui;
