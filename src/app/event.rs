//! Terminal input as bus messages.
//!
//! A background task polls crossterm and forwards key presses, resizes and
//! periodic ticks over a channel so the run-loop never blocks on input.

use std::time::Duration;

use crossterm::event::{self, Event as CtEvent, KeyEventKind};
use tokio::sync::mpsc;

use crate::view::Msg;

/// Spawns a background task that polls the terminal for events and sends them
/// through the returned channel.  A [`Msg::Tick`] is sent whenever nothing
/// happened for `tick_rate`.
pub fn spawn_event_reader(tick_rate: Duration) -> mpsc::UnboundedReceiver<Msg> {
    let (tx, rx) = mpsc::unbounded_channel();

    tokio::spawn(async move {
        loop {
            let has_event = event::poll(tick_rate).unwrap_or(false);
            let msg = if has_event {
                match event::read() {
                    Ok(ev) => match translate(ev) {
                        Some(msg) => msg,
                        None => continue,
                    },
                    Err(_) => continue,
                }
            } else {
                Msg::Tick
            };
            if tx.send(msg).is_err() {
                break; // receiver dropped
            }
        }
    });

    rx
}

/// Map a crossterm event onto the bus.  Key releases and repeats, mouse and
/// focus events have no meaning for views.
fn translate(ev: CtEvent) -> Option<Msg> {
    match ev {
        CtEvent::Key(k) if k.kind == KeyEventKind::Press => Some(Msg::Key(k)),
        CtEvent::Resize(width, height) => Some(Msg::Resize { width, height }),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEvent, KeyEventState, KeyModifiers};

    #[test]
    fn only_presses_and_resizes_reach_the_bus() {
        let press = KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE);
        assert!(matches!(translate(CtEvent::Key(press)), Some(Msg::Key(k)) if k.code == KeyCode::Enter));

        let release = KeyEvent::new_with_kind_and_state(
            KeyCode::Enter,
            KeyModifiers::NONE,
            KeyEventKind::Release,
            KeyEventState::NONE,
        );
        assert!(translate(CtEvent::Key(release)).is_none());

        assert!(matches!(
            translate(CtEvent::Resize(120, 40)),
            Some(Msg::Resize { width: 120, height: 40 })
        ));
        assert!(translate(CtEvent::FocusGained).is_none());
    }
}
