//! Async-status leaf: a spinner while some action runs elsewhere, then the
//! outcome once a [`Msg::Executed`] arrives on the bus.
//!
//! The executor never starts work itself.  Whoever schedules the action
//! (a dialog, a timer, an outside thread through the program handle) is
//! responsible for eventually delivering the outcome message.

use std::sync::Arc;

use ratatui::{
    layout::{Alignment, Rect},
    text::{Line, Span, Text},
    widgets::{Paragraph, Widget},
};

use crate::config::{Action, Config};
use crate::ui::{canvas, layout::VerticalAlignment, spinner::Spinner};
use crate::view::{dispatch, Cmd, Msg, Outcome, View};

const DEFAULT_WIDTH: u16 = 40;
const DEFAULT_HEIGHT: u16 = 5;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExecState {
    Pending,
    Succeeded(String),
    Failed(String),
}

pub struct Executor {
    state: ExecState,
    spinner: Spinner,
    width: u16,
    height: u16,
    config: Arc<Config>,
}

impl Executor {
    pub fn new(config: Arc<Config>) -> Self {
        Self {
            state: ExecState::Pending,
            spinner: Spinner::default(),
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            config,
        }
    }

    pub fn state(&self) -> &ExecState {
        &self.state
    }

    fn resolve(&mut self, outcome: Outcome) {
        tracing::debug!(success = outcome.success, "executor resolved");
        self.state = if outcome.success {
            ExecState::Succeeded(outcome.description)
        } else {
            ExecState::Failed(outcome.description)
        };
    }

    fn lines(&self) -> Vec<Line<'static>> {
        let theme = &self.config.theme;
        match &self.state {
            ExecState::Pending => vec![Line::from(vec![
                Span::styled(self.spinner.frame(), theme.spinner_style()),
                Span::raw(" Processing in progress..."),
            ])],
            ExecState::Succeeded(desc) => vec![
                Line::from(vec![
                    Span::raw("Status: "),
                    Span::styled(" SUCCESS ", theme.success_badge()),
                ]),
                Line::raw(desc.clone()),
            ],
            ExecState::Failed(desc) => vec![
                Line::from(vec![
                    Span::raw("Status: "),
                    Span::styled(" FAIL ", theme.failure_badge()),
                ]),
                Line::raw(desc.clone()),
            ],
        }
    }
}

impl View for Executor {
    fn update(&mut self, msg: Msg) -> Vec<Cmd> {
        match msg {
            Msg::Ascend => return dispatch::ascend(),
            Msg::Key(key) if self.config.keys.is(key, Action::Back) => return dispatch::ascend(),
            Msg::Executed(outcome) => self.resolve(outcome),
            Msg::Tick if self.state == ExecState::Pending => self.spinner.advance(),
            _ => {}
        }
        Vec::new()
    }

    fn view(&self) -> Text<'static> {
        let lines = self.lines();
        canvas::draw(self.width, self.height, |area, buf| {
            let h = lines.len() as u16;
            let row = area.y + VerticalAlignment::Center.offset(h, area.height);
            let rect = Rect::new(area.x, row, area.width, h.min(area.height));
            Paragraph::new(lines)
                .alignment(Alignment::Center)
                .render(rect, buf);
        })
    }

    fn set_width(&mut self, width: u16) {
        self.width = width;
    }

    fn set_height(&mut self, height: u16) {
        self.height = height;
    }

    fn reset(&mut self) {
        self.state = ExecState::Pending;
        self.spinner.reset();
    }
}
