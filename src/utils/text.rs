//! Width-aware text helpers
//!
//! Transcript content mixes ASCII and CJK, so all measurement goes through
//! `unicode-width`. Wrapping breaks at character boundaries, which keeps
//! double-width characters intact and never splits one across rows.

use ratatui::text::{Line, Span};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Terminal cell width of a string.
pub fn display_width(s: &str) -> usize {
    UnicodeWidthStr::width(s)
}

fn line_width(line: &Line<'_>) -> usize {
    line.spans.iter().map(|s| display_width(&s.content)).sum()
}

/// Wrap styled lines to a column budget, preserving span styles. Lines that
/// already fit are passed through untouched.
pub fn prewrap_lines(lines: &[Line<'static>], width: u16) -> Vec<Line<'static>> {
    let budget = width.max(1) as usize;
    let mut out: Vec<Line<'static>> = Vec::with_capacity(lines.len());

    for line in lines {
        if line_width(line) <= budget {
            out.push(line.clone());
            continue;
        }

        let mut current: Vec<Span<'static>> = Vec::new();
        let mut col = 0usize;
        for span in &line.spans {
            let style = span.style;
            let mut buf = String::new();
            for ch in span.content.chars() {
                let ch_width = UnicodeWidthChar::width(ch).unwrap_or(0);
                if col + ch_width > budget && col > 0 {
                    if !buf.is_empty() {
                        current.push(Span::styled(std::mem::take(&mut buf), style));
                    }
                    out.push(Line::from(std::mem::take(&mut current)));
                    col = 0;
                }
                buf.push(ch);
                col += ch_width;
            }
            if !buf.is_empty() {
                current.push(Span::styled(buf, style));
            }
        }
        out.push(Line::from(current));
    }

    out
}

/// Number of terminal rows the lines occupy after wrapping.
pub fn wrapped_line_count(lines: &[Line<'static>], width: u16) -> u16 {
    prewrap_lines(lines, width).len().min(u16::MAX as usize) as u16
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::style::{Color, Style};

    fn plain(text: &str) -> Line<'static> {
        Line::from(text.to_string())
    }

    #[test]
    fn short_lines_pass_through() {
        let lines = vec![plain("hello"), plain("")];
        let wrapped = prewrap_lines(&lines, 20);
        assert_eq!(wrapped.len(), 2);
        assert_eq!(wrapped[0].spans[0].content, "hello");
    }

    #[test]
    fn long_lines_wrap_at_the_budget() {
        let lines = vec![plain("abcdefghij")];
        let wrapped = prewrap_lines(&lines, 4);
        assert_eq!(wrapped.len(), 3);
        assert_eq!(wrapped[0].spans[0].content, "abcd");
        assert_eq!(wrapped[1].spans[0].content, "efgh");
        assert_eq!(wrapped[2].spans[0].content, "ij");
    }

    #[test]
    fn double_width_characters_are_never_split() {
        // Each CJK char occupies two cells, so a budget of 5 fits two per row
        let lines = vec![plain("例句例句例")];
        let wrapped = prewrap_lines(&lines, 5);
        assert_eq!(wrapped.len(), 3);
        assert_eq!(wrapped[0].spans[0].content, "例句");
        assert_eq!(wrapped[1].spans[0].content, "例句");
        assert_eq!(wrapped[2].spans[0].content, "例");
    }

    #[test]
    fn span_styles_survive_wrapping() {
        let style = Style::default().fg(Color::Cyan);
        let line = Line::from(vec![Span::styled("aaaa".to_string(), style)]);
        let wrapped = prewrap_lines(&[line], 2);
        assert_eq!(wrapped.len(), 2);
        assert!(wrapped.iter().all(|l| l.spans[0].style == style));
    }

    #[test]
    fn wrapped_line_count_matches_prewrap() {
        let lines = vec![plain("abcdefghij"), plain("k")];
        assert_eq!(wrapped_line_count(&lines, 4), 4);
    }

    #[test]
    fn display_width_is_cjk_aware() {
        assert_eq!(display_width("abc"), 3);
        assert_eq!(display_width("主题"), 4);
    }
}
