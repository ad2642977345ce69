//! ESC dispatch and OSC dispatch handlers.
//!
//! ESC sequences (cursor save/restore, index, reset, charset selection) all
//! target a positioned screen and are accepted as no-ops. Of the OSC
//! commands only 8 (hyperlink) affects the transcript; titles and palette
//! queries belong to the host shell.

use tracing::trace;

use crate::console::Console;

impl Console {
    pub(crate) fn dispatch_esc(&mut self, intermediates: &[u8], byte: u8) {
        trace!("ignored ESC dispatch: byte=0x{byte:02X} intermediates={intermediates:?}");
    }

    pub(crate) fn dispatch_osc(&mut self, params: &[&[u8]]) {
        if params.is_empty() {
            return;
        }
        // First param is the numeric command.
        let cmd = std::str::from_utf8(params[0])
            .ok()
            .and_then(|s| s.parse::<u16>().ok())
            .unwrap_or(u16::MAX);

        match cmd {
            // OSC 8 ; params ; URI — open a hyperlink; an empty URI closes it.
            8 => {
                let uri = params
                    .get(2)
                    .and_then(|bytes| std::str::from_utf8(bytes).ok())
                    .unwrap_or("");
                if uri.is_empty() {
                    self.close_link();
                } else {
                    self.open_link(uri.to_string());
                }
            }
            0 | 2 => {
                // Window title — a renderer concern, not part of the transcript.
            }
            _ => {
                trace!("unhandled OSC command: {cmd}");
            }
        }
    }
}
