//! Fixed ANSI color palette for renderers.
//!
//! The interpreter only records `Color::Indexed` values; a display surface
//! resolves them to concrete RGB here. `Color::Default` resolves to `None`
//! so the renderer can substitute its own default foreground/background
//! (white on transparent in the reference GUI).

use crate::style::Color;

/// Standard ANSI 16-color palette (indices 0-15) as `[r, g, b]`.
pub const ANSI_COLORS: [[u8; 3]; 16] = [
    [0x00, 0x00, 0x00], // 0  Black
    [0xCD, 0x00, 0x00], // 1  Red
    [0x00, 0xCD, 0x00], // 2  Green
    [0xCD, 0xCD, 0x00], // 3  Yellow
    [0x00, 0x00, 0xEE], // 4  Blue
    [0xCD, 0x00, 0xCD], // 5  Magenta
    [0x00, 0xCD, 0xCD], // 6  Cyan
    [0xE5, 0xE5, 0xE5], // 7  White
    [0x7F, 0x7F, 0x7F], // 8  Bright Black
    [0xFF, 0x00, 0x00], // 9  Bright Red
    [0x00, 0xFF, 0x00], // 10 Bright Green
    [0xFF, 0xFF, 0x00], // 11 Bright Yellow
    [0x5C, 0x5C, 0xFF], // 12 Bright Blue
    [0xFF, 0x00, 0xFF], // 13 Bright Magenta
    [0x00, 0xFF, 0xFF], // 14 Bright Cyan
    [0xFF, 0xFF, 0xFF], // 15 Bright White
];

/// Resolve an indexed color (0-255) to `[r, g, b]`.
///
/// - 0-15: Standard ANSI palette
/// - 16-231: 6×6×6 color cube
/// - 232-255: 24-step grayscale ramp
pub fn indexed_to_rgb(idx: u8) -> [u8; 3] {
    match idx {
        0..=15 => ANSI_COLORS[idx as usize],
        16..=231 => {
            let i = idx - 16;
            let r = (i / 36) % 6;
            let g = (i / 6) % 6;
            let b = i % 6;
            let to_val = |c: u8| if c == 0 { 0 } else { 55 + c * 40 };
            [to_val(r), to_val(g), to_val(b)]
        }
        232..=255 => {
            let v = 8 + (idx - 232) * 10;
            [v, v, v]
        }
    }
}

/// Resolve a transcript [`Color`] to RGB; `None` means "use the renderer's
/// default".
pub fn resolve(color: Color) -> Option<[u8; 3]> {
    match color {
        Color::Default => None,
        Color::Indexed(idx) => Some(indexed_to_rgb(idx)),
        Color::Rgb(r, g, b) => Some([r, g, b]),
    }
}

// ===========================================================================
// Tests
// ===========================================================================
