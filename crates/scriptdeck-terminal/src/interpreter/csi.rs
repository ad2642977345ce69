//! CSI dispatch. Only SGR and insert-line are honored; everything that needs
//! a positioned screen (cursor movement, erasing, scrolling regions, DEC
//! private modes, mouse tracking, device reports) is accepted as a no-op so
//! that a non-conformant child process can never corrupt the transcript.

use tracing::trace;
use vte::Params;

use crate::console::Console;

impl Console {
    pub(crate) fn dispatch_csi(&mut self, params: &Params, intermediates: &[u8], action: char) {
        // Private-parameter sequences (CSI ? / > / =) are all screen or
        // keyboard modes; skip them wholesale.
        if !intermediates.is_empty() {
            trace!("ignored private CSI: '{action}' intermediates={intermediates:?}");
            return;
        }

        match action {
            // -- SGR (select graphic rendition) ---------------------------------
            'm' => self.handle_sgr(params),

            // -- insert lines: vertical padding in a linear transcript ----------
            'L' => {
                let count = params
                    .iter()
                    .next()
                    .and_then(|sub| sub.first())
                    .copied()
                    .map(|v| if v == 0 { 1 } else { v as usize })
                    .unwrap_or(1);
                self.insert_lines(count);
            }

            // -- cursor movement / erasing / scrolling / modes ------------------
            'A'..='H' | 'J' | 'K' | 'M' | 'P' | 'S' | 'T' | 'X' | '@' | 'd' | 'f' | 'h' | 'l'
            | 'n' | 'r' | 's' | 't' | 'u' => {
                trace!("ignored CSI action: '{action}'");
            }

            _ => {
                trace!("unhandled CSI action: '{action}'");
            }
        }
    }
}
