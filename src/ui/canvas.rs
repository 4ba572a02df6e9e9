//! Off-screen rendering: draw ratatui widgets into a buffer of a view's
//! assigned size and hand the result back as styled text.
//!
//! This is the "render a styled string" service of the view contract.  A
//! composite places a child's text inside its own area with [`blit`].

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::Style,
    text::{Line, Span, Text},
    widgets::{Paragraph, Widget},
};
use unicode_width::UnicodeWidthStr;

/// Run `paint` against an empty `width`×`height` buffer and convert it.
/// A zero-sized area yields empty text.
pub fn draw<F>(width: u16, height: u16, paint: F) -> Text<'static>
where
    F: FnOnce(Rect, &mut Buffer),
{
    if width == 0 || height == 0 {
        return Text::default();
    }
    let area = Rect::new(0, 0, width, height);
    let mut buf = Buffer::empty(area);
    paint(area, &mut buf);
    to_text(&buf)
}

/// Convert every row of `buf` into a line, merging runs of equally styled
/// cells into one span.  Cells hidden behind a wide grapheme are skipped.
pub fn to_text(buf: &Buffer) -> Text<'static> {
    let area = buf.area;
    let mut lines = Vec::with_capacity(area.height as usize);

    for y in area.top()..area.bottom() {
        let mut spans: Vec<Span<'static>> = Vec::new();
        let mut run = String::new();
        let mut run_style = Style::default();
        let mut hidden = 0usize;

        for x in area.left()..area.right() {
            if hidden > 0 {
                hidden -= 1;
                continue;
            }
            let cell = &buf[(x, y)];
            let symbol = cell.symbol();
            let style = cell.style();
            hidden = symbol.width().saturating_sub(1);

            if style != run_style && !run.is_empty() {
                spans.push(Span::styled(std::mem::take(&mut run), run_style));
            }
            run_style = style;
            run.push_str(symbol);
        }
        if !run.is_empty() {
            spans.push(Span::styled(run, run_style));
        }
        lines.push(Line::from(spans));
    }

    Text::from(lines)
}

/// Paint already-rendered `text` into `area`.  Lines wider than the area are
/// clipped, never wrapped.
pub fn blit(text: &Text<'static>, alignment: Alignment, area: Rect, buf: &mut Buffer) {
    Paragraph::new(text.clone())
        .alignment(alignment)
        .render(area, buf);
}

/// Flatten styled text into plain lines, trailing blanks trimmed.
pub fn plain(text: &Text<'_>) -> String {
    text.lines
        .iter()
        .map(|line| {
            let s: String = line.spans.iter().map(|span| span.content.as_ref()).collect();
            s.trim_end().to_string()
        })
        .collect::<Vec<_>>()
        .join("\n")
}
