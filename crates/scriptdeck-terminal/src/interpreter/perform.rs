//! `vte::Perform` implementation for Console: print, execute, and DCS hooks.
//! CSI dispatch is in `csi.rs`, ESC/OSC dispatch in `esc_osc.rs`.

use tracing::trace;
use vte::{Params, Perform};

use crate::console::Console;

impl Perform for Console {
    fn print(&mut self, c: char) {
        self.put_char(c);
    }

    fn execute(&mut self, byte: u8) {
        match byte {
            0x0A => self.new_line(), // LF
            // CR cannot reposition in a linear transcript; "\r\n" yields one
            // line break from the LF.
            0x0D => {}
            0x07..=0x09 | 0x0B | 0x0C => {
                // BEL, BS, HT, VT, FF
                trace!("ignored execute byte: 0x{byte:02X}");
            }
            _ => {
                trace!("unhandled execute byte: 0x{byte:02X}");
            }
        }
    }

    fn csi_dispatch(&mut self, params: &Params, intermediates: &[u8], _ignore: bool, action: char) {
        self.dispatch_csi(params, intermediates, action);
    }

    fn esc_dispatch(&mut self, intermediates: &[u8], _ignore: bool, byte: u8) {
        self.dispatch_esc(intermediates, byte);
    }

    fn osc_dispatch(&mut self, params: &[&[u8]], _bell_terminated: bool) {
        self.dispatch_osc(params);
    }

    fn hook(&mut self, _params: &Params, _intermediates: &[u8], _ignore: bool, _action: char) {
        // DCS hook - no-op.
    }

    fn put(&mut self, _byte: u8) {
        // DCS put - no-op.
    }

    fn unhook(&mut self) {
        // DCS unhook - no-op.
    }
}
