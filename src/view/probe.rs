//! Recording leaf used by composite tests.

use std::cell::RefCell;
use std::rc::Rc;

use ratatui::text::Text;

use super::{dispatch, Cmd, Msg, View};

#[derive(Debug, Default)]
pub struct ProbeLog {
    pub width: u16,
    pub height: u16,
    pub resets: usize,
    pub inits: usize,
    pub received: Vec<String>,
}

/// Leaf that records every contract call into a shared log.
pub struct Probe {
    name: String,
    log: Rc<RefCell<ProbeLog>>,
}

impl Probe {
    pub fn new(name: &str) -> (Self, Rc<RefCell<ProbeLog>>) {
        let log = Rc::new(RefCell::new(ProbeLog::default()));
        (
            Self {
                name: name.to_string(),
                log: Rc::clone(&log),
            },
            log,
        )
    }

    pub fn boxed(name: &str) -> (Box<dyn View>, Rc<RefCell<ProbeLog>>) {
        let (probe, log) = Self::new(name);
        (Box::new(probe), log)
    }
}

impl View for Probe {
    fn init(&mut self) -> Vec<Cmd> {
        self.log.borrow_mut().inits += 1;
        vec![Cmd::msg(Msg::Tick)]
    }

    fn update(&mut self, msg: Msg) -> Vec<Cmd> {
        self.log.borrow_mut().received.push(format!("{msg:?}"));
        match msg {
            Msg::Ascend => dispatch::ascend(),
            _ => Vec::new(),
        }
    }

    fn view(&self) -> Text<'static> {
        let log = self.log.borrow();
        Text::raw(format!("probe:{} {}x{}", self.name, log.width, log.height))
    }

    fn set_width(&mut self, width: u16) {
        self.log.borrow_mut().width = width;
    }

    fn set_height(&mut self, height: u16) {
        self.log.borrow_mut().height = height;
    }

    fn reset(&mut self) {
        self.log.borrow_mut().resets += 1;
    }
}
