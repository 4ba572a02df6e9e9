//! Confirmation dialog: a Yes/No question on a patterned backdrop.
//!
//! Confirming can notify an observer outside the tree through a channel,
//! answer with a [`Msg::Validated`], or, when an action is attached, hand
//! over to an embedded [`Executor`] that shows the action's outcome.

use std::sync::Arc;

use ratatui::{
    layout::Alignment,
    text::{Line, Span, Text},
    widgets::{Block, BorderType, Borders, Clear, Padding, Paragraph, Widget},
};
use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::config::{Action, Config};
use crate::ui::{canvas, layout::centered_fixed};
use crate::view::{dispatch, Cmd, Msg, ValidationStatus, View};

use super::executor::Executor;

const DEFAULT_WIDTH: u16 = 80;
const DEFAULT_HEIGHT: u16 = 40;

const QUESTION: &str = "Do you confirm your choice ?";
const QUESTION_WIDTH: u16 = 40;
/// Question, gap, buttons, plus vertical padding and the border.
const DIALOG_HEIGHT: u16 = 7;
const BACKDROP: &str = "/";

/// Sent to the observer when the user confirms.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Confirmation;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Choice {
    Confirm,
    #[default]
    Cancel,
}

impl Choice {
    fn toggled(self) -> Self {
        match self {
            Choice::Confirm => Choice::Cancel,
            Choice::Cancel => Choice::Confirm,
        }
    }
}

enum Mode {
    Asking,
    Running,
}

pub struct Validation {
    choice: Choice,
    mode: Mode,
    notify: Option<mpsc::Sender<Confirmation>>,
    action: Option<Box<dyn Fn() -> Cmd>>,
    executor: Option<Executor>,
    width: u16,
    height: u16,
    config: Arc<Config>,
}

impl Validation {
    pub fn new(config: Arc<Config>) -> Self {
        Self {
            choice: Choice::default(),
            mode: Mode::Asking,
            notify: None,
            action: None,
            executor: None,
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            config,
        }
    }

    pub fn with_size(mut self, width: u16, height: u16) -> Self {
        self.set_width(width);
        self.set_height(height);
        self
    }

    /// Notify `tx` on every confirmation.  Delivery is best effort: a full
    /// or closed channel is logged and otherwise ignored.
    pub fn with_channel(mut self, tx: mpsc::Sender<Confirmation>) -> Self {
        self.notify = Some(tx);
        self
    }

    /// Run `action` on confirmation and show its outcome.  The command is
    /// expected to eventually deliver a [`Msg::Executed`].
    pub fn with_action(mut self, action: impl Fn() -> Cmd + 'static) -> Self {
        let mut executor = Executor::new(Arc::clone(&self.config));
        executor.set_width(self.width);
        executor.set_height(self.height);
        self.executor = Some(executor);
        self.action = Some(Box::new(action));
        self
    }

    pub fn choice(&self) -> Choice {
        self.choice
    }

    /// True once a confirmed action has handed over to the executor.
    pub fn is_running(&self) -> bool {
        matches!(self.mode, Mode::Running)
    }

    pub fn executor(&self) -> Option<&Executor> {
        self.executor.as_ref()
    }

    fn confirm(&mut self) -> Vec<Cmd> {
        if let Some(tx) = &self.notify {
            if let Err(err) = tx.try_send(Confirmation) {
                warn!(%err, "confirmation not delivered");
            }
        }
        match &self.action {
            Some(action) if self.executor.is_some() => {
                debug!("confirmed, running action");
                self.mode = Mode::Running;
                vec![action()]
            }
            _ => {
                debug!("confirmed");
                vec![Cmd::msg(Msg::Validated(ValidationStatus { validated: true }))]
            }
        }
    }

    fn update_running(&mut self, msg: Msg) -> Vec<Cmd> {
        let Some(executor) = self.executor.as_mut() else {
            self.mode = Mode::Asking;
            return Vec::new();
        };
        let mut fwd = dispatch::forward(executor, msg);
        if fwd.ascended {
            fwd.cmds.push(Cmd::Ascend);
        }
        fwd.cmds
    }

    fn button(&self, label: &str, choice: Choice) -> Span<'static> {
        let theme = &self.config.theme;
        let style = if self.choice == choice {
            theme.active_button_style()
        } else {
            theme.button_style()
        };
        Span::styled(format!("   {label}   "), style)
    }
}

impl View for Validation {
    fn update(&mut self, msg: Msg) -> Vec<Cmd> {
        if let Msg::Resize { width, height } = msg {
            self.set_width(width);
            self.set_height(height);
            return Vec::new();
        }
        if self.is_running() {
            return self.update_running(msg);
        }
        match msg {
            Msg::Ascend => dispatch::ascend(),
            Msg::Key(key) => match self.config.keys.match_key(key) {
                Some(Action::Left | Action::Right) => {
                    self.choice = self.choice.toggled();
                    Vec::new()
                }
                Some(Action::Select) => match self.choice {
                    Choice::Cancel => dispatch::ascend(),
                    Choice::Confirm => self.confirm(),
                },
                Some(Action::Back) => dispatch::ascend(),
                _ => Vec::new(),
            },
            _ => Vec::new(),
        }
    }

    fn view(&self) -> Text<'static> {
        if self.is_running() {
            if let Some(executor) = &self.executor {
                return executor.view();
            }
        }

        let theme = &self.config.theme;
        let backdrop = theme.backdrop_style();
        let body = vec![
            Line::raw(QUESTION),
            Line::raw(""),
            Line::from(vec![
                self.button("Yes", Choice::Confirm),
                Span::raw(" "),
                self.button("No", Choice::Cancel),
            ]),
        ];
        let dialog = Paragraph::new(body).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(theme.border_style())
                .padding(Padding::vertical(1)),
        );

        canvas::draw(self.width, self.height, |area, buf| {
            let fill = BACKDROP.repeat(usize::from(area.width));
            for y in area.top()..area.bottom() {
                buf.set_string(area.x, y, &fill, backdrop);
            }
            let rect = centered_fixed(QUESTION_WIDTH + 2, DIALOG_HEIGHT, area);
            Clear.render(rect, buf);
            dialog.render(rect, buf);
        })
    }

    fn set_width(&mut self, width: u16) {
        self.width = width;
        if let Some(executor) = &mut self.executor {
            executor.set_width(width);
        }
    }

    fn set_height(&mut self, height: u16) {
        self.height = height;
        if let Some(executor) = &mut self.executor {
            executor.set_height(height);
        }
    }

    fn reset(&mut self) {
        self.choice = Choice::default();
        self.mode = Mode::Asking;
        if let Some(executor) = &mut self.executor {
            executor.reset();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::Outcome;
    use crate::widgets::executor::ExecState;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    fn key(code: KeyCode) -> Msg {
        Msg::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn dialog() -> Validation {
        Validation::new(Arc::new(Config::default()))
    }

    #[test]
    fn defaults_to_cancel_and_toggles() {
        let mut v = dialog();
        assert_eq!(v.choice(), Choice::Cancel);
        v.update(key(KeyCode::Left));
        assert_eq!(v.choice(), Choice::Confirm);
        v.update(key(KeyCode::Right));
        assert_eq!(v.choice(), Choice::Cancel);
    }

    #[test]
    fn enter_on_cancel_ascends() {
        let mut v = dialog();
        let cmds = v.update(key(KeyCode::Enter));
        assert_eq!(cmds.len(), 1);
        assert!(cmds[0].is_ascend());
    }

    #[tokio::test]
    async fn enter_on_confirm_notifies_and_validates() {
        let (tx, mut rx) = mpsc::channel(1);
        let mut v = dialog().with_channel(tx);
        v.update(key(KeyCode::Right));
        let mut cmds = v.update(key(KeyCode::Enter));
        assert_eq!(rx.try_recv(), Ok(Confirmation));

        let task = cmds.pop().and_then(Cmd::into_task).expect("task");
        match task.await {
            Msg::Validated(status) => assert!(status.validated),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn full_channel_does_not_block() {
        let (tx, _rx) = mpsc::channel(1);
        let mut v = dialog().with_channel(tx);
        v.update(key(KeyCode::Left));
        v.update(key(KeyCode::Enter));
        // Second confirmation finds the channel full and is dropped.
        assert_eq!(v.update(key(KeyCode::Enter)).len(), 1);
    }

    #[test]
    fn confirmed_action_hands_over_to_executor() {
        let mut v = dialog().with_action(|| Cmd::msg(Msg::Executed(Outcome::success("done"))));
        v.update(key(KeyCode::Left));
        let cmds = v.update(key(KeyCode::Enter));
        assert_eq!(cmds.len(), 1);
        assert!(v.is_running());
        assert!(canvas::plain(&v.view()).contains("Processing in progress..."));

        // Left/right now belong to the executor, not the toggle.
        v.update(key(KeyCode::Left));
        assert_eq!(v.choice(), Choice::Confirm);

        v.update(Msg::Executed(Outcome::failure("disk full")));
        assert_eq!(v.executor().map(Executor::state), Some(&ExecState::Failed("disk full".into())));
        assert!(canvas::plain(&v.view()).contains("disk full"));

        let cmds = v.update(key(KeyCode::Esc));
        assert!(cmds.iter().any(Cmd::is_ascend));
    }

    #[test]
    fn reset_restores_question() {
        let mut v = dialog().with_action(|| Cmd::Quit);
        v.update(key(KeyCode::Left));
        v.update(key(KeyCode::Enter));
        v.update(Msg::Executed(Outcome::success("ok")));
        v.reset();
        assert_eq!(v.choice(), Choice::Cancel);
        assert!(!v.is_running());
        assert_eq!(v.executor().map(Executor::state), Some(&ExecState::Pending));
        v.reset();
        assert_eq!(v.choice(), Choice::Cancel);
    }

    #[test]
    fn back_and_sentinel_ascend() {
        let mut v = dialog();
        assert!(v.update(key(KeyCode::Char('q')))[0].is_ascend());
        assert!(v.update(Msg::Ascend)[0].is_ascend());
    }

    #[test]
    fn view_shows_question_on_backdrop() {
        let v = dialog().with_size(60, 11);
        let plain = canvas::plain(&v.view());
        assert!(plain.contains(QUESTION));
        assert!(plain.contains("Yes") && plain.contains("No"));
        assert!(plain.lines().next().unwrap().starts_with("////"));
        assert_eq!(plain.lines().count(), 11);
    }
}
