//! Static text panel: one line of bold text centered on the accent colour,
//! filling whatever size it was given.

use std::sync::Arc;

use ratatui::{
    layout::{Alignment, Rect},
    text::Text,
    widgets::{Paragraph, Widget},
};

use crate::config::{Action, Config};
use crate::ui::{canvas, layout::VerticalAlignment};
use crate::view::{dispatch, Cmd, Msg, View};

const DEFAULT_SIZE: u16 = 30;

pub struct FancyText {
    content: String,
    width: u16,
    height: u16,
    /// Ignore sizes pushed by the owner.
    fixed_size: bool,
    config: Arc<Config>,
}

impl FancyText {
    /// Panel showing `content`.  An empty string shows the panel's own size.
    pub fn new(content: impl Into<String>, config: Arc<Config>) -> Self {
        Self {
            content: content.into(),
            width: DEFAULT_SIZE,
            height: DEFAULT_SIZE,
            fixed_size: false,
            config,
        }
    }

    pub fn with_size(mut self, width: u16, height: u16) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn fixed_size(mut self) -> Self {
        self.fixed_size = true;
        self
    }

    pub fn size(&self) -> (u16, u16) {
        (self.width, self.height)
    }

    fn label(&self) -> String {
        if self.content.is_empty() {
            format!("Width: {}, Height: {}", self.width, self.height)
        } else {
            self.content.clone()
        }
    }
}

impl View for FancyText {
    fn update(&mut self, msg: Msg) -> Vec<Cmd> {
        match msg {
            Msg::Ascend => dispatch::ascend(),
            Msg::Key(key) if self.config.keys.is(key, Action::Back) => dispatch::ascend(),
            _ => Vec::new(),
        }
    }

    fn view(&self) -> Text<'static> {
        let style = self.config.theme.fancy_style();
        let label = self.label();
        canvas::draw(self.width, self.height, |area, buf| {
            buf.set_style(area, style);
            let row = area.y + VerticalAlignment::Center.offset(1, area.height);
            Paragraph::new(label)
                .style(style)
                .alignment(Alignment::Center)
                .render(Rect::new(area.x, row, area.width, 1), buf);
        })
    }

    fn set_width(&mut self, width: u16) {
        if !self.fixed_size {
            self.width = width;
        }
    }

    fn set_height(&mut self, height: u16) {
        if !self.fixed_size {
            self.height = height;
        }
    }

    fn reset(&mut self) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    fn panel(content: &str) -> FancyText {
        FancyText::new(content, Arc::new(Config::default())).with_size(20, 3)
    }

    #[test]
    fn renders_centered_content() {
        let text = panel("HELLO").view();
        assert_eq!(text.lines.len(), 3);
        let plain = canvas::plain(&text);
        let rows: Vec<&str> = plain.lines().collect();
        assert_eq!(rows[1].trim(), "HELLO");
        assert!(rows[1].starts_with("       "));
    }

    #[test]
    fn empty_content_shows_size() {
        let mut p = panel("");
        p.set_width(25);
        assert!(canvas::plain(&p.view()).contains("Width: 25, Height: 3"));
    }

    #[test]
    fn fixed_size_ignores_owner() {
        let mut p = panel("x").fixed_size();
        p.set_width(80);
        p.set_height(40);
        assert_eq!(p.size(), (20, 3));
    }

    #[test]
    fn back_key_and_sentinel_ascend() {
        let mut p = panel("x");
        let q = KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE);
        assert!(p.update(Msg::Key(q))[0].is_ascend());
        assert!(p.update(Msg::Ascend)[0].is_ascend());
        assert!(p.update(Msg::Tick).is_empty());
    }
}
