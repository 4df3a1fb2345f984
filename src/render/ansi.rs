//! ANSI escape code to HTML conversion for terminal output.
//!
//! Colors and text attributes become `term-*` CSS classes so that pages can
//! theme them; 24-bit colors fall back to inline `rgb()` styles. Each call
//! starts from the default state, so multi-line input must be converted line
//! by line.

use super::escape::escape_html;

/// Foreground or background color selected by SGR parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Color {
    /// One of the 16 base colors, stored as its foreground SGR code (30-37, 90-97)
    Base(u16),
    /// 256-color palette index
    Indexed(u8),
    /// 24-bit color
    Rgb(u8, u8, u8),
}

/// Current SGR (Select Graphic Rendition) attribute state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct SgrState {
    fg: Option<Color>,
    bg: Option<Color>,
    bold: bool,
    faint: bool,
    italic: bool,
    underline: bool,
    blink: bool,
    inverse: bool,
    strikethrough: bool,
}

impl SgrState {
    fn is_plain(&self) -> bool {
        *self == SgrState::default()
    }

    /// Opening `<span>` tag for this state.
    fn open_tag(&self) -> String {
        let mut classes: Vec<String> = Vec::new();
        let mut styles: Vec<String> = Vec::new();

        match self.fg {
            Some(Color::Base(code)) => classes.push(format!("term-fg{}", code)),
            Some(Color::Indexed(idx)) => classes.push(format!("term-fgx{}", idx)),
            Some(Color::Rgb(r, g, b)) => styles.push(format!("color:rgb({},{},{})", r, g, b)),
            None => {}
        }
        match self.bg {
            Some(Color::Base(code)) => classes.push(format!("term-bg{}", code + 10)),
            Some(Color::Indexed(idx)) => classes.push(format!("term-bgx{}", idx)),
            Some(Color::Rgb(r, g, b)) => {
                styles.push(format!("background-color:rgb({},{},{})", r, g, b))
            }
            None => {}
        }

        let flags = [
            (self.bold, "term-fg1"),
            (self.faint, "term-fg2"),
            (self.italic, "term-fg3"),
            (self.underline, "term-fg4"),
            (self.blink, "term-fg5"),
            (self.inverse, "term-fg7"),
            (self.strikethrough, "term-fg9"),
        ];
        classes.extend(
            flags
                .iter()
                .filter(|(on, _)| *on)
                .map(|(_, class)| class.to_string()),
        );

        let mut tag = String::from("<span");
        if !classes.is_empty() {
            tag.push_str(&format!(" class=\"{}\"", classes.join(" ")));
        }
        if !styles.is_empty() {
            tag.push_str(&format!(" style=\"{}\"", styles.join(";")));
        }
        tag.push('>');
        tag
    }
}

/// Parse an extended color (`5;N` or `2;R;G;B`) following a 38/48 parameter.
///
/// Returns the color and the number of extra parameters consumed.
fn extended_color(rest: &[u16]) -> Option<(Color, usize)> {
    match rest {
        [5, idx, ..] => Some((Color::Indexed((*idx).min(255) as u8), 2)),
        [2, r, g, b, ..] => Some((
            Color::Rgb((*r).min(255) as u8, (*g).min(255) as u8, (*b).min(255) as u8),
            4,
        )),
        _ => None,
    }
}

/// Apply a sequence of SGR parameters to the current state.
fn apply_sgr(state: &mut SgrState, params: &[u16]) {
    let mut i = 0;
    while i < params.len() {
        match params[i] {
            0 => *state = SgrState::default(),
            1 => state.bold = true,
            2 => state.faint = true,
            3 => state.italic = true,
            4 => state.underline = true,
            5 | 6 => state.blink = true,
            7 => state.inverse = true,
            9 => state.strikethrough = true,
            22 => {
                state.bold = false;
                state.faint = false;
            }
            23 => state.italic = false,
            24 => state.underline = false,
            25 => state.blink = false,
            27 => state.inverse = false,
            29 => state.strikethrough = false,
            code @ 30..=37 | code @ 90..=97 => state.fg = Some(Color::Base(code)),
            code @ 40..=47 | code @ 100..=107 => state.bg = Some(Color::Base(code - 10)),
            // An incomplete extended color swallows the rest of the sequence.
            38 => match extended_color(&params[i + 1..]) {
                Some((color, used)) => {
                    state.fg = Some(color);
                    i += used;
                }
                None => break,
            },
            48 => match extended_color(&params[i + 1..]) {
                Some((color, used)) => {
                    state.bg = Some(color);
                    i += used;
                }
                None => break,
            },
            39 => state.fg = None,
            49 => state.bg = None,
            _ => {}
        }
        i += 1;
    }
}

/// Convert one line of terminal output to HTML.
///
/// Handles CSI SGR sequences (`ESC[...m`): reset, bold, faint, italic,
/// underline, blink, inverse, strikethrough, the 16 base colors, 256-color
/// mode (`38;5;N`) and true color (`38;2;R;G;B`). Other CSI sequences, OSC
/// sequences and lone escapes are dropped. Text is HTML-escaped.
pub fn render_line(line: &str) -> String {
    let mut out = String::with_capacity(line.len());
    let mut state = SgrState::default();
    let mut open: Option<SgrState> = None;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        if c == '\x1b' {
            match chars.peek() {
                Some('[') => {
                    chars.next();
                    let mut param_str = String::new();
                    let mut terminator = None;
                    for next in chars.by_ref() {
                        if ('@'..='~').contains(&next) {
                            terminator = Some(next);
                            break;
                        }
                        param_str.push(next);
                    }

                    if terminator == Some('m') {
                        let params: Vec<u16> = if param_str.is_empty() {
                            vec![0]
                        } else {
                            param_str
                                .split(';')
                                .map(|p| p.parse().unwrap_or(0))
                                .collect()
                        };
                        apply_sgr(&mut state, &params);
                    }
                }
                Some(']') => {
                    // OSC runs until BEL or ST (ESC \)
                    chars.next();
                    while let Some(next) = chars.next() {
                        if next == '\x07' {
                            break;
                        }
                        if next == '\x1b' && chars.peek() == Some(&'\\') {
                            chars.next();
                            break;
                        }
                    }
                }
                Some(_) => {
                    chars.next();
                }
                None => {}
            }
            continue;
        }

        if open.as_ref() != Some(&state) {
            if open.take().is_some() {
                out.push_str("</span>");
            }
            if !state.is_plain() {
                out.push_str(&state.open_tag());
                open = Some(state.clone());
            }
        }
        out.push_str(&escape_html(c.encode_utf8(&mut [0u8; 4])));
    }

    if open.is_some() {
        out.push_str("</span>");
    }
    out
}

/// Convert terminal output lines to one `<pre>` block.
///
/// Each line is converted independently and the results are joined with
/// newlines.
pub fn render_lines<S: AsRef<str>>(lines: &[S]) -> String {
    let html: Vec<String> = lines.iter().map(|l| render_line(l.as_ref())).collect();
    format!("<pre>{}</pre>", html.join("\n"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text_is_escaped() {
        assert_eq!(render_line("a < b"), "a &lt; b");
    }

    #[test]
    fn test_basic_color() {
        assert_eq!(
            render_line("With \x1b[0;31mANSI colors\x1b[0m"),
            "With <span class=\"term-fg31\">ANSI colors</span>"
        );
    }

    #[test]
    fn test_combined_attributes() {
        assert_eq!(
            render_line("\x1b[1;32;44mok\x1b[m"),
            "<span class=\"term-fg32 term-bg44 term-fg1\">ok</span>"
        );
    }

    #[test]
    fn test_color_change_closes_span() {
        assert_eq!(
            render_line("\x1b[31ma\x1b[32mb"),
            "<span class=\"term-fg31\">a</span><span class=\"term-fg32\">b</span>"
        );
    }

    #[test]
    fn test_extended_colors() {
        assert_eq!(
            render_line("\x1b[38;5;208mx"),
            "<span class=\"term-fgx208\">x</span>"
        );
        assert_eq!(
            render_line("\x1b[48;2;10;20;30mx"),
            "<span style=\"background-color:rgb(10,20,30)\">x</span>"
        );
    }

    #[test]
    fn test_incomplete_extended_color_ignored() {
        assert_eq!(render_line("\x1b[38;5mx"), "x");
        assert_eq!(render_line("\x1b[38;2;1mY"), "Y");
        assert_eq!(render_line("\x1b[48;5mz"), "z");
        assert_eq!(
            render_line("\x1b[1;38;5mZ"),
            "<span class=\"term-fg1\">Z</span>"
        );
    }

    #[test]
    fn test_no_empty_spans() {
        assert_eq!(render_line("\x1b[31m\x1b[0mtext"), "text");
    }

    #[test]
    fn test_non_sgr_sequences_dropped() {
        assert_eq!(render_line("\x1b[2Kline\x1b]8;;http://x\x07link\x1b]8;;\x07"), "linelink");
    }

    #[test]
    fn test_state_does_not_leak_between_lines() {
        let html = render_lines(&["\x1b[31mred", "plain"]);
        assert_eq!(html, "<pre><span class=\"term-fg31\">red</span>\nplain</pre>");
    }

    #[test]
    fn test_script_in_traceback_is_escaped() {
        let html = render_line("<script>alert(1)</script>");
        assert!(!html.contains("<script"));
        assert!(html.contains("&lt;script&gt;"));
    }
}
