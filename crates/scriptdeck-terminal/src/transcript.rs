//! The append-only output model: styled text runs, line breaks, links.

use std::ops::Range;

use serde::{Deserialize, Serialize};

use crate::style::SpanStyle;

// ---------------------------------------------------------------------------
// OutputElement
// ---------------------------------------------------------------------------

/// One element of a job's transcript. Elements are immutable once appended,
/// except that the currently-open run may be extended character by character.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum OutputElement {
    TextSpan { text: String, style: SpanStyle },
    LineBreak,
    Link { text: String, url: String },
}

impl OutputElement {
    /// The logical text this element contributes, with `LineBreak` as `\n`.
    pub fn logical_text(&self) -> &str {
        match self {
            OutputElement::TextSpan { text, .. } => text,
            OutputElement::LineBreak => "\n",
            OutputElement::Link { text, .. } => text,
        }
    }
}

// ---------------------------------------------------------------------------
// Transcript
// ---------------------------------------------------------------------------

/// Ordered, append-only sequence of everything written so far. Owned by one
/// job's interpreter; read-only to external consumers.
#[derive(Clone, Debug, Default)]
pub struct Transcript {
    elements: Vec<OutputElement>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn elements(&self) -> &[OutputElement] {
        &self.elements
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub(crate) fn push(&mut self, element: OutputElement) {
        self.elements.push(element);
    }

    /// Append a character to the last element, if it is an open text or link
    /// run. Returns false when there is nothing to extend.
    pub(crate) fn extend_last(&mut self, c: char) -> bool {
        match self.elements.last_mut() {
            Some(OutputElement::TextSpan { text, .. })
            | Some(OutputElement::Link { text, .. }) => {
                text.push(c);
                true
            }
            _ => false,
        }
    }

    /// Reconstruct the logical text content, with line breaks as `\n`.
    pub fn text(&self) -> String {
        let mut out = String::new();
        for element in &self.elements {
            out.push_str(element.logical_text());
        }
        out
    }

    /// Map byte-offset ranges of [`Transcript::text`] back to span styles.
    /// Line breaks and links occupy their byte range but carry no style, so
    /// a renderer can cache colorization decisions per range.
    pub fn style_ranges(&self) -> Vec<(Range<usize>, SpanStyle)> {
        let mut ranges = Vec::new();
        let mut offset = 0;
        for element in &self.elements {
            let len = element.logical_text().len();
            if let OutputElement::TextSpan { style, .. } = element {
                ranges.push((offset..offset + len, *style));
            }
            offset += len;
        }
        ranges
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::Color;

    fn span(text: &str, style: SpanStyle) -> OutputElement {
        OutputElement::TextSpan {
            text: text.to_string(),
            style,
        }
    }

    #[test]
    fn text_reconstructs_content_in_order() {
        let mut t = Transcript::new();
        t.push(span("hello", SpanStyle::default()));
        t.push(OutputElement::LineBreak);
        t.push(span("world", SpanStyle::default()));
        assert_eq!(t.text(), "hello\nworld");
    }

    #[test]
    fn extend_last_grows_open_run() {
        let mut t = Transcript::new();
        t.push(span("a", SpanStyle::default()));
        assert!(t.extend_last('b'));
        assert_eq!(t.text(), "ab");
        assert_eq!(t.len(), 1);
    }

    #[test]
    fn extend_last_fails_after_line_break() {
        let mut t = Transcript::new();
        t.push(span("a", SpanStyle::default()));
        t.push(OutputElement::LineBreak);
        assert!(!t.extend_last('b'));
    }

    #[test]
    fn link_text_counts_toward_logical_text() {
        let mut t = Transcript::new();
        t.push(span("see ", SpanStyle::default()));
        t.push(OutputElement::Link {
            text: "https://example.com".into(),
            url: "https://example.com".into(),
        });
        assert_eq!(t.text(), "see https://example.com");
    }

    #[test]
    fn style_ranges_cover_spans_only() {
        let red = SpanStyle {
            fg: Color::Indexed(1),
            ..Default::default()
        };
        let mut t = Transcript::new();
        t.push(span("ab", SpanStyle::default()));
        t.push(OutputElement::LineBreak);
        t.push(span("cd", red));

        let ranges = t.style_ranges();
        assert_eq!(ranges.len(), 2);
        assert_eq!(ranges[0].0, 0..2);
        assert_eq!(ranges[0].1, SpanStyle::default());
        // Line break occupies byte 2.
        assert_eq!(ranges[1].0, 3..5);
        assert_eq!(ranges[1].1, red);
    }

    #[test]
    fn elements_serialize() {
        let element = span("x", SpanStyle::default());
        let json = serde_json::to_string(&element).unwrap();
        let back: OutputElement = serde_json::from_str(&json).unwrap();
        assert_eq!(element, back);
    }
}
