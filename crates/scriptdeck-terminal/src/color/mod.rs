pub mod palette;

pub use palette::{indexed_to_rgb, resolve, ANSI_COLORS};
