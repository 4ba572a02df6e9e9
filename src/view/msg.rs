//! Messages and follow-up commands exchanged on the shared bus.
//!
//! A [`Msg`] is delivered to the root view one at a time.  Views answer with
//! zero or more [`Cmd`]s: the ascend sentinel, a quit request, or a task whose
//! eventual result re-enters the bus as another `Msg`.

use std::any::Any;
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;

use crossterm::event::KeyEvent;

/// Result of a confirmation dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidationStatus {
    pub validated: bool,
}

/// Completion of a long-running action, consumed by the executor leaf.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    pub success: bool,
    pub description: String,
}

impl Outcome {
    pub fn success(description: impl Into<String>) -> Self {
        Self {
            success: true,
            description: description.into(),
        }
    }

    pub fn failure(description: impl Into<String>) -> Self {
        Self {
            success: false,
            description: description.into(),
        }
    }
}

/// Everything that can travel on the message bus.
#[derive(Clone)]
pub enum Msg {
    Key(KeyEvent),
    Resize { width: u16, height: u16 },
    /// Leave the deepest entered screen.
    Ascend,
    /// Periodic animation tick from the run-loop.
    Tick,
    /// Stop the run-loop.
    Quit,
    Validated(ValidationStatus),
    Executed(Outcome),
    /// Application-defined completion message.  Composites forward it
    /// untouched; only the view that knows the payload type reacts.
    Custom(Arc<dyn Any + Send + Sync>),
}

impl Msg {
    pub fn custom<T: Any + Send + Sync>(value: T) -> Self {
        Msg::Custom(Arc::new(value))
    }

    /// Borrow the payload of a [`Msg::Custom`] if it has type `T`.
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        match self {
            Msg::Custom(payload) => payload.downcast_ref::<T>(),
            _ => None,
        }
    }
}

impl From<KeyEvent> for Msg {
    fn from(key: KeyEvent) -> Self {
        Msg::Key(key)
    }
}

impl fmt::Debug for Msg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Msg::Key(k) => f.debug_tuple("Key").field(k).finish(),
            Msg::Resize { width, height } => f
                .debug_struct("Resize")
                .field("width", width)
                .field("height", height)
                .finish(),
            Msg::Ascend => f.write_str("Ascend"),
            Msg::Tick => f.write_str("Tick"),
            Msg::Quit => f.write_str("Quit"),
            Msg::Validated(s) => f.debug_tuple("Validated").field(s).finish(),
            Msg::Executed(o) => f.debug_tuple("Executed").field(o).finish(),
            Msg::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

/// Future produced by a follow-up task.  Yields exactly one message.
pub type TaskFuture = Pin<Box<dyn Future<Output = Msg> + Send + 'static>>;

/// A follow-up returned from `init` or `update`.
pub enum Cmd {
    /// Ask the owning composite to deactivate this branch and reset it.
    Ascend,
    /// Ask the run-loop to stop.
    Quit,
    /// Side computation whose result is re-injected into the bus.
    Task(TaskFuture),
}

impl Cmd {
    /// A task that resolves immediately to `msg` on the next dispatch cycle.
    pub fn msg(msg: Msg) -> Self {
        Cmd::Task(Box::pin(async move { msg }))
    }

    pub fn task<F>(fut: F) -> Self
    where
        F: Future<Output = Msg> + Send + 'static,
    {
        Cmd::Task(Box::pin(fut))
    }

    /// Deliver `msg` once `delay` has elapsed.
    pub fn after(delay: Duration, msg: Msg) -> Self {
        Cmd::task(async move {
            tokio::time::sleep(delay).await;
            msg
        })
    }

    /// Run `f` on the blocking thread pool and deliver its message.  A
    /// panicking `f` is reported as a failed [`Outcome`].
    pub fn blocking<F>(f: F) -> Self
    where
        F: FnOnce() -> Msg + Send + 'static,
    {
        Cmd::task(async move {
            match tokio::task::spawn_blocking(f).await {
                Ok(msg) => msg,
                Err(err) => {
                    tracing::warn!(%err, "blocking task failed");
                    Msg::Executed(Outcome::failure(err.to_string()))
                }
            }
        })
    }

    pub fn is_ascend(&self) -> bool {
        matches!(self, Cmd::Ascend)
    }

    pub fn into_task(self) -> Option<TaskFuture> {
        match self {
            Cmd::Task(fut) => Some(fut),
            _ => None,
        }
    }
}

impl fmt::Debug for Cmd {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cmd::Ascend => f.write_str("Ascend"),
            Cmd::Quit => f.write_str("Quit"),
            Cmd::Task(_) => f.write_str("Task(..)"),
        }
    }
}
