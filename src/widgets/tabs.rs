//! Tabbed composite: a header row of labels over the content of the
//! current tab.
//!
//! Every tab's child is kept sized and reset, not only the visible one, so
//! switching tabs always shows a consistent view.

use std::sync::Arc;

use ratatui::{
    layout::Rect,
    text::{Line, Text},
    widgets::{Block, Borders, Paragraph, Tabs as TabsWidget, Widget},
};

use crate::config::{Action, Config};
use crate::error::BuildError;
use crate::ui::{canvas, layout::interior};
use crate::view::{dispatch, Cmd, Msg, View};

use super::fancytext::FancyText;

const DEFAULT_WIDTH: u16 = 30;
const DEFAULT_HEIGHT: u16 = 20;

/// Header (labels + underline) plus the help line.
pub const TABS_CHROME_HEIGHT: u16 = 3;
const HEADER_HEIGHT: u16 = 2;

const HELP_ACTIONS: &[Action] = &[Action::NextTab, Action::PrevTab, Action::Back];

/// One named page.
pub struct Tab {
    pub name: String,
    pub content: Box<dyn View>,
}

impl Tab {
    pub fn new(name: impl Into<String>, content: impl View + 'static) -> Self {
        Self {
            name: name.into(),
            content: Box::new(content),
        }
    }

    /// A tab showing a "Hello World" text panel.
    pub fn placeholder(name: impl Into<String>, config: Arc<Config>) -> Self {
        Self::new(name, FancyText::new("Hello World", config))
    }
}

pub struct Tabs {
    tabs: Vec<Tab>,
    active: usize,
    width: u16,
    height: u16,
    config: Arc<Config>,
}

impl Tabs {
    pub fn new(tabs: Vec<Tab>, config: Arc<Config>) -> Result<Self, BuildError> {
        if tabs.is_empty() {
            return Err(BuildError::NoTabs);
        }
        let mut view = Self {
            tabs,
            active: 0,
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            config,
        };
        view.set_width(DEFAULT_WIDTH);
        view.set_height(DEFAULT_HEIGHT);
        Ok(view)
    }

    pub fn active(&self) -> usize {
        self.active
    }

    pub fn len(&self) -> usize {
        self.tabs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tabs.is_empty()
    }

    fn next(&mut self) {
        self.active = (self.active + 1).min(self.tabs.len() - 1);
    }

    fn prev(&mut self) {
        self.active = self.active.saturating_sub(1);
    }
}

impl View for Tabs {
    fn init(&mut self) -> Vec<Cmd> {
        dispatch::batch(self.tabs.iter_mut().map(|t| t.content.init()))
    }

    fn update(&mut self, msg: Msg) -> Vec<Cmd> {
        match msg {
            Msg::Resize { width, height } => {
                self.set_width(width);
                self.set_height(height);
                return Vec::new();
            }
            Msg::Key(key) => match self.config.keys.match_key(key) {
                Some(Action::NextTab) => {
                    self.next();
                    return Vec::new();
                }
                Some(Action::PrevTab) => {
                    self.prev();
                    return Vec::new();
                }
                Some(Action::Back) => return dispatch::ascend(),
                _ => {}
            },
            _ => {}
        }
        // The tab container has no entered state of its own, so the ascend
        // sentinel goes to the visible tab, and a child's request to ascend
        // travels on to our owner unchanged.
        self.tabs[self.active].content.update(msg)
    }

    fn view(&self) -> Text<'static> {
        let theme = &self.config.theme;
        let titles: Vec<Line<'static>> = self.tabs.iter().map(|t| Line::raw(t.name.clone())).collect();
        let header = TabsWidget::new(titles)
            .select(self.active)
            .style(theme.item_style())
            .highlight_style(theme.active_tab_style())
            .divider("│")
            .block(
                Block::default()
                    .borders(Borders::BOTTOM)
                    .border_style(theme.border_style()),
            );
        let body = self.tabs[self.active].content.view();
        let help = Line::styled(self.config.keys.help_line(HELP_ACTIONS), theme.help_style());

        canvas::draw(self.width, self.height, |area, buf| {
            let header_h = HEADER_HEIGHT.min(area.height);
            header.render(Rect::new(area.x, area.y, area.width, header_h), buf);
            let body_h = interior(area.height, TABS_CHROME_HEIGHT);
            Paragraph::new(body).render(Rect::new(area.x, area.y + header_h, area.width, body_h), buf);
            if area.height > HEADER_HEIGHT {
                let help_row = area.y + area.height - 1;
                Paragraph::new(help).render(Rect::new(area.x, help_row, area.width, 1), buf);
            }
        })
    }

    fn set_width(&mut self, width: u16) {
        self.width = width;
        for tab in &mut self.tabs {
            tab.content.set_width(width);
        }
    }

    fn set_height(&mut self, height: u16) {
        self.height = height;
        let body = interior(height, TABS_CHROME_HEIGHT);
        for tab in &mut self.tabs {
            tab.content.set_height(body);
        }
    }

    fn reset(&mut self) {
        self.active = 0;
        for tab in &mut self.tabs {
            tab.content.reset();
        }
    }
}
