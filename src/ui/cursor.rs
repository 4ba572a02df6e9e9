//! Selection cursor shared by scrollable lists and tables.

/// Highlighted row plus the first visible row.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Cursor {
    /// Index of the highlighted row.
    pub selected: usize,
    /// Vertical scroll offset (first visible row).
    pub offset: usize,
}

impl Cursor {
    pub fn select_next(&mut self, max: usize) {
        if max > 0 && self.selected < max - 1 {
            self.selected += 1;
        }
    }

    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    /// Move down by `n` rows, stopping at the last one.
    pub fn forward(&mut self, n: usize, max: usize) {
        self.selected = self.selected.saturating_add(n).min(max.saturating_sub(1));
    }

    pub fn back(&mut self, n: usize) {
        self.selected = self.selected.saturating_sub(n);
    }

    pub fn first(&mut self) {
        self.selected = 0;
    }

    pub fn last(&mut self, max: usize) {
        self.selected = max.saturating_sub(1);
    }

    /// Keep the selection inside `max` rows after the content changed.
    pub fn clamp(&mut self, max: usize) {
        self.selected = self.selected.min(max.saturating_sub(1));
    }

    /// Ensure the selected row is visible within the viewport of `height` rows.
    pub fn clamp_scroll(&mut self, height: usize) {
        if height == 0 {
            return;
        }
        if self.selected < self.offset {
            self.offset = self.selected;
        } else if self.selected >= self.offset + height {
            self.offset = self.selected - height + 1;
        }
    }
}
