//! Keyed, ordered child registry with at most one entered child.
//!
//! Children are stored as `(key, view)` pairs in insertion order so that
//! rendering order never depends on hashing; a side index gives O(1) lookup.

use std::collections::HashMap;

use super::{dispatch, Cmd, Msg, View};
use crate::error::BuildError;

#[derive(Default)]
pub struct Registry {
    entries: Vec<(String, Box<dyn View>)>,
    index: HashMap<String, usize>,
    active: Option<usize>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `view` under `key`.  Keys must be unique.
    pub fn insert(&mut self, key: impl Into<String>, view: Box<dyn View>) -> Result<(), BuildError> {
        let key = key.into();
        if self.index.contains_key(&key) {
            return Err(BuildError::DuplicateKey(key));
        }
        self.index.insert(key.clone(), self.entries.len());
        self.entries.push((key, view));
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn get(&self, key: &str) -> Option<&dyn View> {
        self.index.get(key).map(|&i| self.entries[i].1.as_ref())
    }

    /// Enter the child registered under `key`.  Unknown keys leave the
    /// registry untouched and return `false`.
    pub fn activate(&mut self, key: &str) -> bool {
        match self.index.get(key) {
            Some(&i) => {
                tracing::debug!(key, "entering child");
                self.active = Some(i);
                true
            }
            None => false,
        }
    }

    pub fn active_key(&self) -> Option<&str> {
        self.active.map(|i| self.entries[i].0.as_str())
    }

    pub fn active(&self) -> Option<&dyn View> {
        self.active.map(|i| self.entries[i].1.as_ref())
    }

    /// Forward `msg` to the entered child.  Returns `None` when nothing is
    /// entered.  If the child asks to ascend, the whole registry is
    /// deactivated and reset before its remaining commands are returned.
    pub fn forward(&mut self, msg: Msg) -> Option<Vec<Cmd>> {
        let i = self.active?;
        let fwd = dispatch::forward(self.entries[i].1.as_mut(), msg);
        if fwd.ascended {
            self.deactivate();
        }
        Some(fwd.cmds)
    }

    /// Leave the entered child and return every child to its initial state.
    pub fn deactivate(&mut self) {
        if let Some(key) = self.active_key() {
            tracing::debug!(key, "leaving child");
        }
        self.active = None;
        self.reset_all();
    }

    pub fn reset_all(&mut self) {
        for (_, view) in &mut self.entries {
            view.reset();
        }
    }

    pub fn set_width_all(&mut self, width: u16) {
        for (_, view) in &mut self.entries {
            view.set_width(width);
        }
    }

    pub fn set_height_all(&mut self, height: u16) {
        for (_, view) in &mut self.entries {
            view.set_height(height);
        }
    }

    pub fn init_all(&mut self) -> Vec<Cmd> {
        dispatch::batch(self.entries.iter_mut().map(|(_, view)| view.init()))
    }
}
