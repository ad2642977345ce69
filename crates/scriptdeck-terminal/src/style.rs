//! Style types: Color, SpanStyle, and the StyleState attribute machine.

use serde::{Deserialize, Serialize};
use tracing::trace;

// ---------------------------------------------------------------------------
// Color
// ---------------------------------------------------------------------------

/// A terminal color. `Default` means "whatever the renderer's default is"
/// (white foreground, transparent background).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Color {
    #[default]
    Default,
    Indexed(u8),
    Rgb(u8, u8, u8),
}

// ---------------------------------------------------------------------------
// SpanStyle
// ---------------------------------------------------------------------------

/// The immutable style attached to one emitted text run.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SpanStyle {
    pub fg: Color,
    pub bg: Color,
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
    pub strikethrough: bool,
}

// ---------------------------------------------------------------------------
// StyleState
// ---------------------------------------------------------------------------

/// Current drawing attributes applied to newly written characters.
///
/// Mutated only by SGR-equivalent handlers; every handler is a deterministic
/// function of (old state, code). `swapped` tracks reverse video so that a
/// "positive" code can restore the pre-swap pair.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct StyleState {
    pub fg: Color,
    pub bg: Color,
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
    pub strikethrough: bool,
    pub swapped: bool,
}

impl StyleState {
    /// Snapshot of the attributes a new span should carry.
    pub fn span_style(&self) -> SpanStyle {
        SpanStyle {
            fg: self.fg,
            bg: self.bg,
            bold: self.bold,
            italic: self.italic,
            underline: self.underline,
            strikethrough: self.strikethrough,
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    fn exchange_colors(&mut self) {
        std::mem::swap(&mut self.fg, &mut self.bg);
    }

    /// Apply one SGR code. Returns true if the code was recognized (and the
    /// state possibly changed); unrecognized codes are silent no-ops.
    pub fn apply(&mut self, code: u16) -> bool {
        match code {
            0 => self.reset(),
            1 => self.bold = true,
            22 => self.bold = false,
            3 => self.italic = true,
            23 => self.italic = false,
            4 => self.underline = true,
            24 => self.underline = false,
            9 => self.strikethrough = true,
            29 => self.strikethrough = false,
            // Negative: exchange and flip. Two negatives in a row restore
            // the original pair.
            7 => {
                self.exchange_colors();
                self.swapped = !self.swapped;
            }
            // Positive: restore only if currently swapped.
            27 => {
                if self.swapped {
                    self.exchange_colors();
                    self.swapped = false;
                }
            }
            // Standard foreground colors (30-37).
            30..=37 => self.fg = Color::Indexed((code - 30) as u8),
            39 => self.fg = Color::Default,
            // Standard background colors (40-47).
            40..=47 => self.bg = Color::Indexed((code - 40) as u8),
            49 => self.bg = Color::Default,
            // Bright foreground (90-97).
            90..=97 => self.fg = Color::Indexed((code - 90 + 8) as u8),
            // Bright background (100-107).
            100..=107 => self.bg = Color::Indexed((code - 100 + 8) as u8),
            _ => {
                trace!("unhandled SGR code: {code}");
                return false;
            }
        }
        true
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
