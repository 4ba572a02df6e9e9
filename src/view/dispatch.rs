//! Helpers shared by every composite that routes messages to children.

use super::{Cmd, Msg, View};

/// Remove every ascend sentinel from `cmds`.  Returns `true` if one was present.
pub fn take_ascend(cmds: &mut Vec<Cmd>) -> bool {
    let before = cmds.len();
    cmds.retain(|c| !c.is_ascend());
    cmds.len() != before
}

/// Outcome of forwarding one message to a child.
#[derive(Debug)]
pub struct Forwarded {
    /// Child commands with the sentinel stripped.
    pub cmds: Vec<Cmd>,
    /// The child asked to be left.
    pub ascended: bool,
}

/// Forward `msg` verbatim to `child` and split off the ascend sentinel.
pub fn forward(child: &mut dyn View, msg: Msg) -> Forwarded {
    let mut cmds = child.update(msg);
    let ascended = take_ascend(&mut cmds);
    Forwarded { cmds, ascended }
}

/// Concatenate command lists, e.g. the `init` results of several children.
pub fn batch<I>(groups: I) -> Vec<Cmd>
where
    I: IntoIterator<Item = Vec<Cmd>>,
{
    groups.into_iter().flatten().collect()
}

/// The answer of a view that has nothing left to descend into.
pub fn ascend() -> Vec<Cmd> {
    vec![Cmd::Ascend]
}
