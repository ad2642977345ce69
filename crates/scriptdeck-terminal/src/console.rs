//! Console: the transcript builder driven by the protocol handlers.
//!
//! Plays the role a cell grid plays in a positioned terminal emulator, except
//! that output is a linear, append-only transcript: there is no cursor, and
//! codes that only make sense on a screen are accepted as no-ops by the
//! dispatch layer.

use crate::style::{Color, StyleState};
use crate::transcript::{OutputElement, Transcript};

pub struct Console {
    /// Current drawing attributes applied to newly written characters.
    style: StyleState,
    transcript: Transcript,
    /// Set by any style mutation; forces the next character into a new run.
    style_changed: bool,
    /// Whether the last transcript element is still open for extension.
    open_run: bool,
    /// Active OSC 8 hyperlink target, if any.
    link_url: Option<String>,
}

impl Console {
    pub fn new() -> Self {
        Self {
            style: StyleState::default(),
            transcript: Transcript::new(),
            style_changed: false,
            open_run: false,
            link_url: None,
        }
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    pub fn style(&self) -> &StyleState {
        &self.style
    }

    // -- output -------------------------------------------------------------

    /// Write one printable character: extend the open run when the style is
    /// unchanged, otherwise close it and start a new span.
    pub fn put_char(&mut self, c: char) {
        if let Some(url) = &self.link_url {
            if self.open_run && self.last_is_link(url) {
                self.transcript.extend_last(c);
            } else {
                let url = url.clone();
                self.transcript.push(OutputElement::Link {
                    text: c.to_string(),
                    url,
                });
                self.open_run = true;
            }
            return;
        }

        if !self.open_run || self.style_changed {
            self.transcript.push(OutputElement::TextSpan {
                text: c.to_string(),
                style: self.style.span_style(),
            });
            self.style_changed = false;
            self.open_run = true;
        } else {
            self.transcript.extend_last(c);
        }
    }

    /// Close the current run and append a line break.
    pub fn new_line(&mut self) {
        self.open_run = false;
        self.transcript.push(OutputElement::LineBreak);
    }

    /// Close the current run and append `count` line breaks (vertical
    /// padding; no scrolling-region semantics).
    pub fn insert_lines(&mut self, count: usize) {
        self.open_run = false;
        for _ in 0..count {
            self.transcript.push(OutputElement::LineBreak);
        }
    }

    // -- style --------------------------------------------------------------

    /// Apply one SGR-equivalent code. Unrecognized codes change nothing and
    /// do not split the current run.
    pub fn set_character_attribute(&mut self, code: u16) {
        if self.style.apply(code) {
            self.style_changed = true;
        }
    }

    pub fn set_foreground_rgb(&mut self, r: u8, g: u8, b: u8) {
        self.set_fg(Color::Rgb(r, g, b));
    }

    pub fn set_background_rgb(&mut self, r: u8, g: u8, b: u8) {
        self.set_bg(Color::Rgb(r, g, b));
    }

    pub(crate) fn set_fg(&mut self, color: Color) {
        self.style.fg = color;
        self.style_changed = true;
    }

    pub(crate) fn set_bg(&mut self, color: Color) {
        self.style.bg = color;
        self.style_changed = true;
    }

    // -- hyperlinks ---------------------------------------------------------

    pub(crate) fn open_link(&mut self, url: String) {
        self.open_run = false;
        self.link_url = Some(url);
    }

    pub(crate) fn close_link(&mut self) {
        self.open_run = false;
        self.link_url = None;
    }

    fn last_is_link(&self, url: &str) -> bool {
        matches!(
            self.transcript.elements().last(),
            Some(OutputElement::Link { url: u, .. }) if u == url
        )
    }
}

impl Default for Console {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::SpanStyle;

    fn put_str(console: &mut Console, s: &str) {
        for c in s.chars() {
            console.put_char(c);
        }
    }

    #[test]
    fn same_style_extends_one_run() {
        let mut console = Console::new();
        put_str(&mut console, "abc");
        assert_eq!(console.transcript().len(), 1);
        assert_eq!(console.transcript().text(), "abc");
    }

    #[test]
    fn style_change_opens_new_run() {
        let mut console = Console::new();
        put_str(&mut console, "ab");
        console.set_character_attribute(31);
        put_str(&mut console, "cd");

        let elements = console.transcript().elements();
        assert_eq!(elements.len(), 2);
        match &elements[1] {
            OutputElement::TextSpan { text, style } => {
                assert_eq!(text, "cd");
                assert_eq!(style.fg, Color::Indexed(1));
            }
            other => panic!("expected TextSpan, got {other:?}"),
        }
    }

    #[test]
    fn unrecognized_code_does_not_split_run() {
        let mut console = Console::new();
        put_str(&mut console, "ab");
        console.set_character_attribute(73);
        put_str(&mut console, "cd");
        assert_eq!(console.transcript().len(), 1);
        assert_eq!(console.transcript().text(), "abcd");
    }

    #[test]
    fn new_line_always_closes_run() {
        let mut console = Console::new();
        console.put_char('a');
        console.new_line();
        console.put_char('b');

        let elements = console.transcript().elements();
        assert_eq!(elements.len(), 3);
        assert!(matches!(&elements[0], OutputElement::TextSpan { text, .. } if text == "a"));
        assert!(matches!(&elements[1], OutputElement::LineBreak));
        assert!(matches!(&elements[2], OutputElement::TextSpan { text, .. } if text == "b"));
    }

    #[test]
    fn insert_lines_appends_count_breaks() {
        let mut console = Console::new();
        console.put_char('a');
        console.insert_lines(3);
        console.put_char('b');

        let elements = console.transcript().elements();
        assert_eq!(elements.len(), 5);
        assert_eq!(console.transcript().text(), "a\n\n\nb");
    }

    #[test]
    fn rgb_setters_take_effect_on_next_char() {
        let mut console = Console::new();
        console.put_char('a');
        console.set_foreground_rgb(255, 128, 0);
        console.set_background_rgb(10, 20, 30);
        console.put_char('b');

        let elements = console.transcript().elements();
        assert_eq!(elements.len(), 2);
        match &elements[1] {
            OutputElement::TextSpan { style, .. } => {
                assert_eq!(style.fg, Color::Rgb(255, 128, 0));
                assert_eq!(style.bg, Color::Rgb(10, 20, 30));
            }
            other => panic!("expected TextSpan, got {other:?}"),
        }
    }

    #[test]
    fn closed_spans_keep_their_style_after_reset() {
        let mut console = Console::new();
        console.set_character_attribute(31);
        put_str(&mut console, "hi");
        console.set_character_attribute(0);
        put_str(&mut console, "ok");

        let elements = console.transcript().elements();
        assert_eq!(elements.len(), 2);
        match &elements[0] {
            OutputElement::TextSpan { style, .. } => assert_eq!(style.fg, Color::Indexed(1)),
            other => panic!("expected TextSpan, got {other:?}"),
        }
        match &elements[1] {
            OutputElement::TextSpan { style, .. } => assert_eq!(*style, SpanStyle::default()),
            other => panic!("expected TextSpan, got {other:?}"),
        }
    }

    #[test]
    fn link_characters_accumulate_into_one_element() {
        let mut console = Console::new();
        console.open_link("https://example.com".into());
        put_str(&mut console, "docs");
        console.close_link();
        put_str(&mut console, " rest");

        let elements = console.transcript().elements();
        assert_eq!(elements.len(), 2);
        match &elements[0] {
            OutputElement::Link { text, url } => {
                assert_eq!(text, "docs");
                assert_eq!(url, "https://example.com");
            }
            other => panic!("expected Link, got {other:?}"),
        }
        assert!(matches!(&elements[1], OutputElement::TextSpan { text, .. } if text == " rest"));
    }

    #[test]
    fn adjacent_links_stay_separate_elements() {
        let mut console = Console::new();
        console.open_link("https://a.example".into());
        put_str(&mut console, "first");
        console.open_link("https://b.example".into());
        put_str(&mut console, "second");

        let elements = console.transcript().elements();
        assert_eq!(elements.len(), 2);
        assert!(matches!(
            &elements[0],
            OutputElement::Link { text, url } if text == "first" && url == "https://a.example"
        ));
        assert!(matches!(
            &elements[1],
            OutputElement::Link { text, url } if text == "second" && url == "https://b.example"
        ));
    }
}
