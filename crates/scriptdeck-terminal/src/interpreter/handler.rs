//! Interpreter struct: wraps Console + vte::Parser.

use crate::console::Console;

/// Wraps a [`Console`] and a VTE [`vte::Parser`], driving the transcript in
/// response to incoming character streams.
///
/// Because `vte::Parser::advance` borrows the `Perform` implementor mutably,
/// we split the parser out so that `Console` can serve as the performer
/// directly.
pub struct Interpreter {
    console: Console,
    parser: vte::Parser,
}

impl Interpreter {
    pub fn new() -> Self {
        Self {
            console: Console::new(),
            parser: vte::Parser::new(),
        }
    }

    /// Feed raw bytes from the process output into the parser, updating the
    /// transcript. Malformed or unrecognized sequences never fail.
    pub fn process(&mut self, bytes: &[u8]) {
        // We need to hand the parser a &mut Perform, but the parser itself is
        // also &mut. Because Console is a *separate* field we can safely
        // split the borrows.
        let console = &mut self.console as *mut Console;
        // SAFETY: `parser.advance` only calls methods on the performer
        // (which accesses `console`). `parser` and `console` are disjoint
        // fields.
        let performer = unsafe { &mut *console };
        self.parser.advance(performer, bytes);
    }

    /// Feed one already-decoded character.
    pub fn feed(&mut self, c: char) {
        let mut buf = [0u8; 4];
        self.process(c.encode_utf8(&mut buf).as_bytes());
    }

    pub fn console(&self) -> &Console {
        &self.console
    }

    pub fn console_mut(&mut self) -> &mut Console {
        &mut self.console
    }

    pub fn transcript(&self) -> &crate::transcript::Transcript {
        self.console.transcript()
    }

    // -- structured entry points (bypass the parser) -------------------------

    pub fn set_character_attribute(&mut self, code: u16) {
        self.console.set_character_attribute(code);
    }

    pub fn set_foreground_rgb(&mut self, r: u8, g: u8, b: u8) {
        self.console.set_foreground_rgb(r, g, b);
    }

    pub fn set_background_rgb(&mut self, r: u8, g: u8, b: u8) {
        self.console.set_background_rgb(r, g, b);
    }

    pub fn new_line(&mut self) {
        self.console.new_line();
    }

    pub fn insert_lines(&mut self, count: usize) {
        self.console.insert_lines(count);
    }
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new()
    }
}
