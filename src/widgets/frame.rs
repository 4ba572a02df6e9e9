//! Layout wrapper: reserves border space and hands the interior to exactly
//! one child.
//!
//! The same wrapper serves at the root (driven by `Msg::Resize` from the
//! run-loop) and nested inside composites (driven by `set_width` /
//! `set_height`).  A fixed-size frame keeps its configured box whatever the
//! owner asks for, and keeps re-asserting its interior onto the child.

use std::sync::Arc;

use ratatui::{
    layout::{Alignment, Margin, Rect},
    text::Text,
    widgets::{Block, Borders, Widget},
};

use crate::config::Config;
use crate::error::BuildError;
use crate::ui::{canvas, layout::interior, layout::VerticalAlignment};
use crate::view::{Cmd, Msg, View};

const DEFAULT_SIZE: u16 = 30;

/// Cells reserved around the child on each axis (one per side).
pub const FRAME_CHROME: u16 = 2;

pub struct Frame {
    width: u16,
    height: u16,
    border: bool,
    fixed_size: bool,
    horizontal: Alignment,
    vertical: VerticalAlignment,
    content: Option<Box<dyn View>>,
    config: Arc<Config>,
}

pub struct FrameBuilder {
    width: u16,
    height: u16,
    border: bool,
    fixed_size: bool,
    horizontal: Alignment,
    vertical: VerticalAlignment,
    content: Option<Box<dyn View>>,
    config: Arc<Config>,
}

impl FrameBuilder {
    pub fn width(mut self, width: u16) -> Self {
        self.width = width;
        self
    }

    pub fn height(mut self, height: u16) -> Self {
        self.height = height;
        self
    }

    pub fn border(mut self) -> Self {
        self.border = true;
        self
    }

    pub fn fixed_size(mut self) -> Self {
        self.fixed_size = true;
        self
    }

    pub fn horizontal(mut self, alignment: Alignment) -> Self {
        self.horizontal = alignment;
        self
    }

    pub fn vertical(mut self, alignment: VerticalAlignment) -> Self {
        self.vertical = alignment;
        self
    }

    pub fn content(mut self, view: impl View + 'static) -> Self {
        self.content = Some(Box::new(view));
        self
    }

    pub fn boxed_content(mut self, view: Box<dyn View>) -> Self {
        self.content = Some(view);
        self
    }

    pub fn build(self) -> Result<Frame, BuildError> {
        if self.width == 0 {
            return Err(BuildError::InvalidWidth(self.width));
        }
        if self.height == 0 {
            return Err(BuildError::InvalidHeight(self.height));
        }
        let mut frame = Frame {
            width: self.width,
            height: self.height,
            border: self.border,
            fixed_size: self.fixed_size,
            horizontal: self.horizontal,
            vertical: self.vertical,
            content: self.content,
            config: self.config,
        };
        frame.push_interior();
        Ok(frame)
    }
}

impl Frame {
    pub fn builder(config: Arc<Config>) -> FrameBuilder {
        FrameBuilder {
            width: DEFAULT_SIZE,
            height: DEFAULT_SIZE,
            border: false,
            fixed_size: false,
            horizontal: Alignment::Center,
            vertical: VerticalAlignment::Center,
            content: None,
            config,
        }
    }

    pub fn size(&self) -> (u16, u16) {
        (self.width, self.height)
    }

    /// Interior handed to the child.
    pub fn interior(&self) -> (u16, u16) {
        (interior(self.width, FRAME_CHROME), interior(self.height, FRAME_CHROME))
    }

    pub fn content(&self) -> Option<&dyn View> {
        self.content.as_deref()
    }

    fn push_interior(&mut self) {
        let (w, h) = self.interior();
        if let Some(child) = self.content.as_mut() {
            child.set_width(w);
            child.set_height(h);
        }
    }

    fn resize(&mut self, width: u16, height: u16) {
        if !self.fixed_size {
            self.width = width;
            self.height = height;
        }
        self.push_interior();
    }
}

impl View for Frame {
    fn init(&mut self) -> Vec<Cmd> {
        self.content.as_mut().map(|c| c.init()).unwrap_or_default()
    }

    fn update(&mut self, msg: Msg) -> Vec<Cmd> {
        if let Msg::Resize { width, height } = msg {
            self.resize(width, height);
            return Vec::new();
        }
        match self.content.as_mut() {
            Some(child) => child.update(msg),
            None => Vec::new(),
        }
    }

    fn view(&self) -> Text<'static> {
        let inner_text = self.content.as_ref().map(|c| c.view());
        let border = self.border.then(|| self.config.theme.border_style());
        let (horizontal, vertical) = (self.horizontal, self.vertical);

        canvas::draw(self.width, self.height, |area, buf| {
            if let Some(style) = border {
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(style)
                    .render(area, buf);
            }
            let Some(text) = inner_text else {
                return;
            };
            let inner = area.inner(Margin::new(1, 1));
            let h = (text.lines.len() as u16).min(inner.height);
            let row = inner.y + vertical.offset(h, inner.height);
            canvas::blit(&text, horizontal, Rect::new(inner.x, row, inner.width, h), buf);
        })
    }

    fn set_width(&mut self, width: u16) {
        self.resize(width, self.height);
    }

    fn set_height(&mut self, height: u16) {
        self.resize(self.width, height);
    }

    fn reset(&mut self) {
        if let Some(child) = self.content.as_mut() {
            child.reset();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::probe::Probe;

    fn config() -> Arc<Config> {
        Arc::new(Config::default())
    }

    #[test]
    fn construction_sizes_child_to_interior() {
        let (probe, log) = Probe::new("child");
        let frame = Frame::builder(config()).width(20).height(10).content(probe).build().unwrap();
        assert_eq!(frame.interior(), (18, 8));
        assert_eq!((log.borrow().width, log.borrow().height), (18, 8));
    }

    #[test]
    fn zero_size_is_a_build_error() {
        assert_eq!(
            Frame::builder(config()).width(0).build().err(),
            Some(BuildError::InvalidWidth(0))
        );
        assert_eq!(
            Frame::builder(config()).height(0).build().err(),
            Some(BuildError::InvalidHeight(0))
        );
    }

    #[test]
    fn resize_pushes_outer_minus_chrome() {
        let (probe, log) = Probe::new("child");
        let mut frame = Frame::builder(config()).content(probe).build().unwrap();
        let cmds = frame.update(Msg::Resize { width: 100, height: 40 });
        assert!(cmds.is_empty());
        assert_eq!(frame.size(), (100, 40));
        assert_eq!((log.borrow().width, log.borrow().height), (98, 38));
        assert!(log.borrow().received.is_empty());
    }

    #[test]
    fn tiny_resize_clamps_at_zero() {
        let (probe, log) = Probe::new("child");
        let mut frame = Frame::builder(config()).content(probe).build().unwrap();
        frame.update(Msg::Resize { width: 1, height: 0 });
        assert_eq!((log.borrow().width, log.borrow().height), (0, 0));
    }

    #[test]
    fn fixed_size_reasserts_configured_interior() {
        let (probe, log) = Probe::new("child");
        let mut frame = Frame::builder(config())
            .width(44)
            .height(12)
            .fixed_size()
            .content(probe)
            .build()
            .unwrap();
        for (w, h) in [(200, 60), (10, 5), (0, 0), (80, 24)] {
            frame.update(Msg::Resize { width: w, height: h });
            frame.set_width(w);
            frame.set_height(h);
            assert_eq!((log.borrow().width, log.borrow().height), (42, 10));
        }
        assert_eq!(frame.size(), (44, 12));
    }

    #[test]
    fn other_messages_reach_the_child() {
        let (probe, log) = Probe::new("child");
        let mut frame = Frame::builder(config()).content(probe).build().unwrap();
        let cmds = frame.update(Msg::Ascend);
        assert!(cmds[0].is_ascend());
        assert_eq!(log.borrow().received, ["Ascend"]);
    }

    #[test]
    fn empty_frame_renders_box_of_configured_size() {
        let mut frame = Frame::builder(config()).width(6).height(3).border().build().unwrap();
        assert!(frame.update(Msg::Tick).is_empty());
        let text = frame.view();
        assert_eq!(text.lines.len(), 3);
        assert_eq!(canvas::plain(&text), "┌────┐\n│    │\n└────┘");
    }

    #[test]
    fn child_is_drawn_inside_border() {
        let (probe, _) = Probe::new("c");
        let frame = Frame::builder(config())
            .width(20)
            .height(3)
            .border()
            .horizontal(Alignment::Left)
            .content(probe)
            .build()
            .unwrap();
        let plain = canvas::plain(&frame.view());
        assert_eq!(plain.lines().nth(1), Some("│probe:c 18x1      │"));
    }

    #[test]
    fn reset_and_init_reach_the_child() {
        let (probe, log) = Probe::new("child");
        let mut frame = Frame::builder(config()).content(probe).build().unwrap();
        assert_eq!(frame.init().len(), 1);
        frame.reset();
        assert_eq!((log.borrow().inits, log.borrow().resets), (1, 1));
    }
}
