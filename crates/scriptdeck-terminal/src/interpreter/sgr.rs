//! SGR (Select Graphic Rendition) parsing helper.

use vte::Params;

use crate::console::Console;
use crate::style::Color;

impl Console {
    /// Parse SGR parameters and apply them to the style state. Single codes
    /// go through [`Console::set_character_attribute`]; 38/48 extended color
    /// specifications consume their following parameters here.
    pub(crate) fn handle_sgr(&mut self, params: &Params) {
        let mut iter = params.iter();

        // If there are no params at all, treat as SGR 0 (reset).
        let first = match iter.next() {
            Some(sub) => sub,
            None => {
                self.set_character_attribute(0);
                return;
            }
        };

        // A fixed-size stack buffer avoids heap allocation on every SGR call.
        let mut groups_buf: [&[u16]; 32] = [&[]; 32];
        groups_buf[0] = first;
        let mut groups_len = 1;
        for sub in iter {
            if groups_len < groups_buf.len() {
                groups_buf[groups_len] = sub;
                groups_len += 1;
            }
        }
        let groups = &groups_buf[..groups_len];

        let mut i = 0;
        while i < groups.len() {
            let code = groups[i].first().copied().unwrap_or(0);
            match code {
                // Extended foreground.
                38 => {
                    i += 1;
                    self.parse_extended_color(groups, &mut i, true);
                    continue; // i already advanced
                }
                // Extended background.
                48 => {
                    i += 1;
                    self.parse_extended_color(groups, &mut i, false);
                    continue;
                }
                _ => self.set_character_attribute(code),
            }
            i += 1;
        }
    }

    /// Parse an extended color specification (used after SGR 38 or 48).
    /// `is_fg` controls whether the result is applied to foreground or
    /// background.
    ///
    /// Expected forms:
    ///   38;5;N        -- 256-color palette
    ///   38;2;R;G;B    -- 24-bit true-color
    fn parse_extended_color(&mut self, groups: &[&[u16]], i: &mut usize, is_fg: bool) {
        if *i >= groups.len() {
            return;
        }
        let mode = groups[*i][0];
        match mode {
            5 => {
                // 256-color: next param is the color index.
                *i += 1;
                if *i < groups.len() {
                    let idx = groups[*i][0] as u8;
                    if is_fg {
                        self.set_fg(Color::Indexed(idx));
                    } else {
                        self.set_bg(Color::Indexed(idx));
                    }
                    *i += 1;
                }
            }
            2 => {
                // True-color: next three params are R, G, B. A truncated
                // specification is dropped without touching the style.
                if *i + 3 < groups.len() {
                    let r = groups[*i + 1][0] as u8;
                    let g = groups[*i + 2][0] as u8;
                    let b = groups[*i + 3][0] as u8;
                    if is_fg {
                        self.set_foreground_rgb(r, g, b);
                    } else {
                        self.set_background_rgb(r, g, b);
                    }
                    *i += 4;
                } else {
                    *i = groups.len();
                }
            }
            _ => {
                *i += 1;
            }
        }
    }
}
