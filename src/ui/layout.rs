//! Layout helpers: chrome accounting and placement of content in an area.

use ratatui::layout::Rect;

/// Size left for content once `allowance` cells of chrome are reserved.
/// Never underflows.
pub fn interior(size: u16, allowance: u16) -> u16 {
    size.saturating_sub(allowance)
}

/// Vertical placement of content that is shorter than its area.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VerticalAlignment {
    Top,
    #[default]
    Center,
    Bottom,
}

impl VerticalAlignment {
    /// Row offset of `content` rows inside `available` rows.
    pub fn offset(self, content: u16, available: u16) -> u16 {
        let spare = available.saturating_sub(content);
        match self {
            VerticalAlignment::Top => 0,
            VerticalAlignment::Center => spare / 2,
            VerticalAlignment::Bottom => spare,
        }
    }
}

/// Create a centered rectangle with fixed dimensions, clamped to the available area.
pub fn centered_fixed(width: u16, height: u16, area: Rect) -> Rect {
    let w = width.min(area.width);
    let h = height.min(area.height);
    let x = area.x + (area.width.saturating_sub(w)) / 2;
    let y = area.y + (area.height.saturating_sub(h)) / 2;
    Rect::new(x, y, w, h)
}
