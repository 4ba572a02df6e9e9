//! The outer run-loop: owns the root view, feeds it one message at a time
//! and schedules the commands it answers with.
//!
//! Tasks run on tokio and report back through an unbounded channel, so a
//! task result is always handled in a later dispatch cycle than the one
//! that issued it.  There is no cancellation: a result whose originating
//! view has since been reset is still delivered, and views that don't
//! recognise it ignore it.

use std::io::{self, Stderr};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::{
    execute,
    terminal::{self, disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, widgets::Paragraph, Terminal};
use tokio::sync::mpsc;
use tracing::debug;

use crate::config::{Action, Config};
use crate::view::{Cmd, Msg, View};

use super::event::spawn_event_reader;

type Tui = Terminal<CrosstermBackend<Stderr>>;

const DEFAULT_TICK_RATE: Duration = Duration::from_millis(100);

/// Whether the run-loop should keep going after a dispatch cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Clonable sender for messages produced outside the view tree, e.g. by a
/// thread watching an external process.
#[derive(Debug, Clone)]
pub struct Handle {
    tx: mpsc::UnboundedSender<Msg>,
}

impl Handle {
    /// Inject `msg` into the bus.  Returns `false` once the program is gone.
    pub fn send(&self, msg: Msg) -> bool {
        self.tx.send(msg).is_ok()
    }

    pub fn quit(&self) -> bool {
        self.send(Msg::Quit)
    }
}

pub struct Program {
    root: Box<dyn View>,
    config: Arc<Config>,
    tx: mpsc::UnboundedSender<Msg>,
    rx: mpsc::UnboundedReceiver<Msg>,
    tick_rate: Duration,
}

impl Program {
    pub fn new(root: Box<dyn View>, config: Arc<Config>) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            root,
            config,
            tx,
            rx,
            tick_rate: DEFAULT_TICK_RATE,
        }
    }

    /// Interval of [`Msg::Tick`] while the terminal is idle.
    pub fn with_tick_rate(mut self, tick_rate: Duration) -> Self {
        self.tick_rate = tick_rate;
        self
    }

    pub fn handle(&self) -> Handle {
        Handle { tx: self.tx.clone() }
    }

    pub fn root(&self) -> &dyn View {
        self.root.as_ref()
    }

    /// Schedule the commands of the root's `init`.
    pub fn start(&mut self) -> Flow {
        let cmds = self.root.init();
        self.schedule(cmds)
    }

    /// Run one update cycle for `msg`.
    pub fn dispatch(&mut self, msg: Msg) -> Flow {
        match &msg {
            Msg::Quit => return Flow::Quit,
            Msg::Key(key) if self.config.keys.is(*key, Action::ForceQuit) => return Flow::Quit,
            _ => {}
        }
        let cmds = self.root.update(msg);
        self.schedule(cmds)
    }

    /// Next message from a finished task or a [`Handle`].
    pub async fn next_message(&mut self) -> Option<Msg> {
        self.rx.recv().await
    }

    fn schedule(&self, cmds: Vec<Cmd>) -> Flow {
        let mut flow = Flow::Continue;
        for cmd in cmds {
            match cmd {
                Cmd::Quit => flow = Flow::Quit,
                // Nothing above the root to ascend into.
                Cmd::Ascend => debug!("ascend reached the root, ignored"),
                Cmd::Task(fut) => {
                    debug!("task scheduled");
                    let tx = self.tx.clone();
                    tokio::spawn(async move {
                        let msg = fut.await;
                        let _ = tx.send(msg);
                    });
                }
            }
        }
        flow
    }

    /// Take over the terminal and drive the root view until something quits.
    pub async fn run(mut self) -> Result<()> {
        let mut terminal = setup_terminal().context("failed to set up terminal")?;
        let result = self.event_loop(&mut terminal).await;
        restore_terminal(&mut terminal).context("failed to restore terminal")?;
        result
    }

    async fn event_loop(&mut self, terminal: &mut Tui) -> Result<()> {
        let (width, height) = terminal::size().context("failed to read terminal size")?;
        if self.dispatch(Msg::Resize { width, height }) == Flow::Quit || self.start() == Flow::Quit {
            return Ok(());
        }

        let mut events = spawn_event_reader(self.tick_rate);
        loop {
            let text = self.root.view();
            terminal
                .draw(|frame| frame.render_widget(Paragraph::new(text), frame.area()))
                .context("failed to draw frame")?;

            let msg = tokio::select! {
                biased;

                Some(msg) = events.recv() => msg,
                Some(msg) = self.rx.recv() => msg,
                else => break,
            };
            if self.dispatch(msg) == Flow::Quit {
                break;
            }
        }
        Ok(())
    }
}

fn setup_terminal() -> Result<Tui> {
    enable_raw_mode()?;
    let mut stderr = io::stderr();
    execute!(stderr, EnterAlternateScreen)?;
    let terminal = Terminal::new(CrosstermBackend::new(io::stderr()))?;
    Ok(terminal)
}

fn restore_terminal(terminal: &mut Tui) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::canvas;
    use crate::view::{probe::Probe, Outcome};
    use crate::widgets::{
        executor::Executor,
        menu::{Menu, MenuEntry},
    };
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use ratatui::text::Text;

    fn key(code: KeyCode) -> Msg {
        Msg::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn config() -> Arc<Config> {
        Arc::new(Config::default())
    }

    /// Root that asks to stop on any key.
    struct Quitter;

    impl View for Quitter {
        fn update(&mut self, msg: Msg) -> Vec<Cmd> {
            match msg {
                Msg::Key(_) => vec![Cmd::Quit],
                _ => Vec::new(),
            }
        }

        fn view(&self) -> Text<'static> {
            Text::raw("bye")
        }

        fn set_width(&mut self, _width: u16) {}

        fn set_height(&mut self, _height: u16) {}

        fn reset(&mut self) {}
    }

    #[tokio::test]
    async fn init_tasks_come_back_as_messages() {
        let (probe, log) = Probe::boxed("root");
        let mut program = Program::new(probe, config());
        assert_eq!(program.start(), Flow::Continue);
        assert_eq!(log.borrow().inits, 1);

        let msg = program.next_message().await.expect("task result");
        assert!(matches!(msg, Msg::Tick));
        program.dispatch(msg);
        assert_eq!(log.borrow().received, vec!["Tick".to_string()]);
    }

    #[tokio::test]
    async fn force_quit_and_quit_stop_without_reaching_the_root() {
        let (probe, log) = Probe::boxed("root");
        let mut program = Program::new(probe, config());
        let ctrl_c = Msg::Key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert_eq!(program.dispatch(ctrl_c), Flow::Quit);
        assert_eq!(program.dispatch(Msg::Quit), Flow::Quit);
        assert!(log.borrow().received.is_empty());
    }

    #[tokio::test]
    async fn quit_command_stops_the_loop() {
        let mut program = Program::new(Box::new(Quitter), config());
        assert_eq!(program.dispatch(Msg::Tick), Flow::Continue);
        assert_eq!(program.dispatch(key(KeyCode::Char('x'))), Flow::Quit);
    }

    #[tokio::test]
    async fn ascend_at_the_root_is_ignored() {
        let (probe, log) = Probe::boxed("root");
        let mut program = Program::new(probe, config());
        assert_eq!(program.dispatch(Msg::Ascend), Flow::Continue);
        assert_eq!(log.borrow().received, vec!["Ascend".to_string()]);
    }

    #[tokio::test]
    async fn handle_injects_messages() {
        let (probe, _log) = Probe::boxed("root");
        let mut program = Program::new(probe, config());
        let handle = program.handle();
        assert!(handle.send(Msg::custom(5u32)));
        assert!(handle.quit());

        let first = program.next_message().await.expect("custom");
        assert_eq!(first.downcast_ref::<u32>(), Some(&5));
        let second = program.next_message().await.expect("quit");
        assert_eq!(program.dispatch(second), Flow::Quit);
    }

    #[tokio::test]
    async fn outcome_from_outside_reaches_nested_executor() {
        let config = config();
        let menu = Menu::new(
            "Jobs",
            vec![MenuEntry::new("deploy", "run the deployment", Executor::new(Arc::clone(&config)))],
            Arc::clone(&config),
        )
        .unwrap();
        let mut program = Program::new(Box::new(menu), config);
        program.dispatch(Msg::Resize { width: 60, height: 12 });
        program.dispatch(key(KeyCode::Enter));

        let handle = program.handle();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(10)).await;
            handle.send(Msg::Executed(Outcome::failure("This function has failed")));
        });
        let msg = program.next_message().await.expect("outcome");
        program.dispatch(msg);

        let plain = canvas::plain(&program.root().view());
        assert!(plain.contains("FAIL"));
        assert!(plain.contains("This function has failed"));

        // Leaving and re-entering shows a fresh executor.
        program.dispatch(key(KeyCode::Esc));
        program.dispatch(key(KeyCode::Enter));
        assert!(canvas::plain(&program.root().view()).contains("Processing in progress..."));
    }

    #[tokio::test]
    async fn late_result_after_leaving_is_ignored() {
        let config = config();
        let confirm = crate::widgets::validation::Validation::new(Arc::clone(&config))
            .with_action(|| Cmd::after(Duration::from_millis(10), Msg::Executed(Outcome::success("late result"))));
        let menu = Menu::new(
            "Jobs",
            vec![MenuEntry::new("confirm", "ask first", confirm)],
            Arc::clone(&config),
        )
        .unwrap();
        let mut program = Program::new(Box::new(menu), config);
        program.dispatch(Msg::Resize { width: 60, height: 20 });
        program.dispatch(key(KeyCode::Enter));
        program.dispatch(key(KeyCode::Left));
        program.dispatch(key(KeyCode::Enter));
        assert!(canvas::plain(&program.root().view()).contains("Processing"));

        // Leave before the action reports back.
        program.dispatch(key(KeyCode::Esc));
        let list = canvas::plain(&program.root().view());
        assert!(list.contains("Jobs") && list.contains("ask first"));

        let msg = program.next_message().await.expect("late outcome");
        assert!(matches!(msg, Msg::Executed(_)));
        assert_eq!(program.dispatch(msg), Flow::Continue);
        assert_eq!(canvas::plain(&program.root().view()), list);

        program.dispatch(key(KeyCode::Enter));
        let plain = canvas::plain(&program.root().view());
        assert!(plain.contains("Do you confirm your choice ?"));
        assert!(!plain.contains("late result"));
        assert!(!plain.contains("SUCCESS"));
    }

    #[tokio::test]
    async fn delayed_task_is_delivered_in_a_later_cycle() {
        let config = config();
        let validation = crate::widgets::validation::Validation::new(Arc::clone(&config))
            .with_action(|| Cmd::after(Duration::from_millis(10), Msg::Executed(Outcome::success("done"))));
        let mut program = Program::new(Box::new(validation), config);
        program.dispatch(key(KeyCode::Left));
        assert_eq!(program.dispatch(key(KeyCode::Enter)), Flow::Continue);
        assert!(canvas::plain(&program.root().view()).contains("Processing"));

        let msg = program.next_message().await.expect("outcome");
        program.dispatch(msg);
        assert!(canvas::plain(&program.root().view()).contains("SUCCESS"));
    }
}
