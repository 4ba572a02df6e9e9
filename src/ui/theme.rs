//! Colour palette and text styles used across the widgets.
//!
//! A `Theme` is an ordinary value carried inside [`crate::config::Config`];
//! change colours there and they propagate to every view built from it.

use ratatui::style::{Color, Modifier, Style};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    /// Background of highlighted text panels and the active button.
    pub accent: Color,
    /// Frame, dialog and tab borders.
    pub border: Color,
    /// Dim text: descriptions, help lines, dialog backdrop.
    pub subtle: Color,
    pub success: Color,
    pub failure: Color,
    /// Foreground of the selected table row / list item.
    pub selected: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            accent: Color::Rgb(0x7D, 0x56, 0xF4),
            border: Color::Rgb(0x87, 0x4B, 0xFD),
            subtle: Color::Rgb(0x38, 0x38, 0x38),
            success: Color::Rgb(0x6A, 0xA8, 0x4F),
            failure: Color::Rgb(0xF4, 0x43, 0x36),
            selected: Color::Indexed(212),
        }
    }
}

impl Theme {
    // ── persistence ────────────────────────────────────────────
    pub(crate) fn colors(&self) -> [(&'static str, Color); 6] {
        [
            ("accent", self.accent),
            ("border", self.border),
            ("subtle", self.subtle),
            ("success", self.success),
            ("failure", self.failure),
            ("selected", self.selected),
        ]
    }

    pub(crate) fn color_mut(&mut self, key: &str) -> Option<&mut Color> {
        match key {
            "accent" => Some(&mut self.accent),
            "border" => Some(&mut self.border),
            "subtle" => Some(&mut self.subtle),
            "success" => Some(&mut self.success),
            "failure" => Some(&mut self.failure),
            "selected" => Some(&mut self.selected),
            _ => None,
        }
    }

    // ── text panels ────────────────────────────────────────────
    pub fn fancy_style(&self) -> Style {
        Style::default()
            .fg(Color::Rgb(0xFA, 0xFA, 0xFA))
            .bg(self.accent)
            .add_modifier(Modifier::BOLD)
    }

    // ── lists & tables ─────────────────────────────────────────
    pub fn title_style(&self) -> Style {
        Style::default()
            .fg(Color::Rgb(0xFF, 0xFD, 0xF5))
            .bg(self.accent)
            .add_modifier(Modifier::BOLD)
    }

    pub fn item_style(&self) -> Style {
        Style::default().fg(Color::White)
    }

    pub fn description_style(&self) -> Style {
        Style::default().fg(Color::Gray)
    }

    pub fn selected_style(&self) -> Style {
        Style::default()
            .fg(self.selected)
            .add_modifier(Modifier::BOLD)
    }

    pub fn header_style(&self) -> Style {
        Style::default().add_modifier(Modifier::BOLD)
    }

    pub fn help_style(&self) -> Style {
        Style::default().fg(Color::DarkGray)
    }

    // ── chrome ─────────────────────────────────────────────────
    pub fn border_style(&self) -> Style {
        Style::default().fg(self.border)
    }

    pub fn table_border_style(&self) -> Style {
        Style::default().fg(Color::Indexed(240))
    }

    pub fn active_tab_style(&self) -> Style {
        Style::default()
            .fg(self.accent)
            .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
    }

    pub fn backdrop_style(&self) -> Style {
        Style::default().fg(self.subtle)
    }

    // ── dialog buttons ─────────────────────────────────────────
    pub fn button_style(&self) -> Style {
        Style::default()
            .fg(Color::Rgb(0xFF, 0xF7, 0xDB))
            .bg(Color::Rgb(0x88, 0x8B, 0x7E))
    }

    pub fn active_button_style(&self) -> Style {
        Style::default()
            .fg(Color::Rgb(0xFF, 0xF7, 0xDB))
            .bg(Color::Rgb(0xF2, 0x5D, 0x94))
            .add_modifier(Modifier::UNDERLINED)
    }

    // ── status badges ──────────────────────────────────────────
    pub fn success_badge(&self) -> Style {
        Style::default()
            .fg(Color::Rgb(0xFA, 0xFA, 0xFA))
            .bg(self.success)
            .add_modifier(Modifier::BOLD)
    }

    pub fn failure_badge(&self) -> Style {
        Style::default()
            .fg(Color::Rgb(0xFA, 0xFA, 0xFA))
            .bg(self.failure)
            .add_modifier(Modifier::BOLD)
    }

    pub fn spinner_style(&self) -> Style {
        Style::default().fg(self.accent).add_modifier(Modifier::BOLD)
    }
}
