//! User configuration: keybindings, palette and persistence.
//!
//! A [`Config`] is built by the caller and handed to every view constructor
//! as an `Arc<Config>`.  Nothing here is global.
//!
//! Settings are stored as a simple key-value text file at
//! `$XDG_CONFIG_HOME/viewtree/config.toml` (default `~/.config/viewtree/config.toml`).
//! Views only ever read a `Config`; [`Config::save`] is a convenience for
//! applications that want to write out a starting file.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use anyhow::Context;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::style::Color;

use crate::ui::theme::Theme;

// ───────────────────────────────────────── actions ───────────

/// Every named key the views react to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    LineUp,
    LineDown,
    Left,
    Right,
    Select,
    Back,
    NextTab,
    PrevTab,
    PageUp,
    PageDown,
    HalfPageUp,
    HalfPageDown,
    GotoTop,
    GotoBottom,
    ForceQuit,
}

impl Action {
    /// Ordered list of all actions (used when saving).
    pub const ALL: &[Action] = &[
        Action::LineUp,
        Action::LineDown,
        Action::Left,
        Action::Right,
        Action::Select,
        Action::Back,
        Action::NextTab,
        Action::PrevTab,
        Action::PageUp,
        Action::PageDown,
        Action::HalfPageUp,
        Action::HalfPageDown,
        Action::GotoTop,
        Action::GotoBottom,
        Action::ForceQuit,
    ];

    /// Short label for help lines.
    pub fn label(self) -> &'static str {
        match self {
            Action::LineUp => "up",
            Action::LineDown => "down",
            Action::Left => "left",
            Action::Right => "right",
            Action::Select => "select",
            Action::Back => "back",
            Action::NextTab => "next tab",
            Action::PrevTab => "prev tab",
            Action::PageUp => "page up",
            Action::PageDown => "page down",
            Action::HalfPageUp => "½ page up",
            Action::HalfPageDown => "½ page down",
            Action::GotoTop => "go to top",
            Action::GotoBottom => "go to bottom",
            Action::ForceQuit => "quit",
        }
    }

    /// Key used in the config file.
    fn config_key(self) -> &'static str {
        match self {
            Action::LineUp => "line_up",
            Action::LineDown => "line_down",
            Action::Left => "left",
            Action::Right => "right",
            Action::Select => "select",
            Action::Back => "back",
            Action::NextTab => "next_tab",
            Action::PrevTab => "prev_tab",
            Action::PageUp => "page_up",
            Action::PageDown => "page_down",
            Action::HalfPageUp => "half_page_up",
            Action::HalfPageDown => "half_page_down",
            Action::GotoTop => "goto_top",
            Action::GotoBottom => "goto_bottom",
            Action::ForceQuit => "force_quit",
        }
    }

    fn from_config_key(s: &str) -> Option<Self> {
        Action::ALL.iter().copied().find(|a| a.config_key() == s)
    }
}

// ───────────────────────────────────────── key bind ──────────

/// A single key binding (key code + modifier combination).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KeyBind {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl KeyBind {
    pub fn new(code: KeyCode, modifiers: KeyModifiers) -> Self {
        Self { code, modifiers }
    }

    /// Does this binding match a key event?  Only CTRL/ALT/SHIFT modifiers
    /// are compared (platform-specific modifiers like SUPER are ignored).
    pub fn matches(&self, event: KeyEvent) -> bool {
        let mask = KeyModifiers::CONTROL | KeyModifiers::ALT | KeyModifiers::SHIFT;
        self.code == event.code && (self.modifiers & mask) == (event.modifiers & mask)
    }

    /// User-friendly display string (e.g. `"↑"`, `"Ctrl+c"`, `"q"`).
    pub fn display(&self) -> String {
        let mut s = modifier_prefix(self.modifiers);
        s.push_str(&match self.code {
            KeyCode::Char(' ') => "Space".into(),
            KeyCode::Char(c) => c.to_string(),
            KeyCode::Up => "↑".into(),
            KeyCode::Down => "↓".into(),
            KeyCode::Left => "←".into(),
            KeyCode::Right => "→".into(),
            KeyCode::Enter => "enter".into(),
            KeyCode::Esc => "esc".into(),
            KeyCode::Tab => "tab".into(),
            KeyCode::BackTab => "shift+tab".into(),
            KeyCode::Home => "home".into(),
            KeyCode::End => "end".into(),
            KeyCode::PageUp => "pgup".into(),
            KeyCode::PageDown => "pgdn".into(),
            KeyCode::F(n) => format!("F{n}"),
            other => format!("{other:?}"),
        });
        s
    }

    /// Serialise to config-file format (e.g. `"Shift+Tab"`, `"Ctrl+c"`, `"q"`).
    fn to_config_string(&self) -> String {
        let mut s = modifier_prefix(self.modifiers);
        s.push_str(&match self.code {
            KeyCode::Char(' ') => "Space".into(),
            KeyCode::Char(c) => c.to_string(),
            KeyCode::Up => "Up".into(),
            KeyCode::Down => "Down".into(),
            KeyCode::Left => "Left".into(),
            KeyCode::Right => "Right".into(),
            KeyCode::Enter => "Enter".into(),
            KeyCode::Esc => "Esc".into(),
            KeyCode::Tab => "Tab".into(),
            KeyCode::BackTab => "BackTab".into(),
            KeyCode::Home => "Home".into(),
            KeyCode::End => "End".into(),
            KeyCode::PageUp => "PageUp".into(),
            KeyCode::PageDown => "PageDown".into(),
            KeyCode::F(n) => format!("F{n}"),
            other => format!("{other:?}"),
        });
        s
    }

    /// Parse a key string like `"Ctrl+c"`, `"Shift+Tab"`, `"q"`, `"Enter"`.
    fn parse(s: &str) -> Option<Self> {
        let mut modifiers = KeyModifiers::NONE;
        let parts: Vec<&str> = s.split('+').collect();
        let key_part = parts.last()?;

        for &part in &parts[..parts.len() - 1] {
            match part.to_lowercase().as_str() {
                "ctrl" => modifiers |= KeyModifiers::CONTROL,
                "alt" => modifiers |= KeyModifiers::ALT,
                "shift" => modifiers |= KeyModifiers::SHIFT,
                _ => return None,
            }
        }

        let code = match key_part.to_lowercase().as_str() {
            "up" => KeyCode::Up,
            "down" => KeyCode::Down,
            "left" => KeyCode::Left,
            "right" => KeyCode::Right,
            "enter" | "return" => KeyCode::Enter,
            "esc" | "escape" => KeyCode::Esc,
            "tab" if modifiers.contains(KeyModifiers::SHIFT) => KeyCode::BackTab,
            "tab" => KeyCode::Tab,
            "backtab" => KeyCode::BackTab,
            "home" => KeyCode::Home,
            "end" => KeyCode::End,
            "pageup" | "pgup" => KeyCode::PageUp,
            "pagedown" | "pgdn" => KeyCode::PageDown,
            "space" => KeyCode::Char(' '),
            s if s.starts_with('f') && s.len() > 1 => {
                let n: u8 = s[1..].parse().ok()?;
                KeyCode::F(n)
            }
            _ if key_part.chars().count() == 1 => KeyCode::Char(key_part.chars().next()?),
            _ => return None,
        };

        Some(KeyBind { code, modifiers })
    }
}

fn modifier_prefix(modifiers: KeyModifiers) -> String {
    let mut s = String::new();
    if modifiers.contains(KeyModifiers::CONTROL) {
        s.push_str("Ctrl+");
    }
    if modifiers.contains(KeyModifiers::ALT) {
        s.push_str("Alt+");
    }
    if modifiers.contains(KeyModifiers::SHIFT) {
        s.push_str("Shift+");
    }
    s
}

// ───────────────────────────────────────── key map ───────────

/// Action → bindings table shared by every view.
#[derive(Debug, Clone)]
pub struct KeyMap {
    pub bindings: HashMap<Action, Vec<KeyBind>>,
}

impl Default for KeyMap {
    fn default() -> Self {
        Self {
            bindings: Self::default_bindings(),
        }
    }
}

impl KeyMap {
    pub fn default_bindings() -> HashMap<Action, Vec<KeyBind>> {
        use Action::*;
        use KeyCode::*;
        let n = KeyModifiers::NONE;
        let shift = KeyModifiers::SHIFT;
        let mut m = HashMap::new();

        m.insert(LineUp, vec![KeyBind::new(Up, n), KeyBind::new(Char('k'), n)]);
        m.insert(LineDown, vec![KeyBind::new(Down, n), KeyBind::new(Char('j'), n)]);
        m.insert(Action::Left, vec![KeyBind::new(KeyCode::Left, n), KeyBind::new(Char('h'), n)]);
        m.insert(Action::Right, vec![KeyBind::new(KeyCode::Right, n), KeyBind::new(Char('l'), n)]);
        m.insert(Select, vec![KeyBind::new(Enter, n)]);
        m.insert(Back, vec![KeyBind::new(Char('q'), n), KeyBind::new(Esc, n)]);
        m.insert(NextTab, vec![KeyBind::new(Tab, n)]);
        m.insert(PrevTab, vec![KeyBind::new(BackTab, n), KeyBind::new(BackTab, shift)]);
        m.insert(Action::PageUp, vec![KeyBind::new(KeyCode::PageUp, n)]);
        m.insert(Action::PageDown, vec![KeyBind::new(KeyCode::PageDown, n)]);
        m.insert(HalfPageUp, vec![KeyBind::new(Char('u'), n)]);
        m.insert(HalfPageDown, vec![KeyBind::new(Char('d'), n)]);
        m.insert(GotoTop, vec![KeyBind::new(Char('t'), n), KeyBind::new(Home, n)]);
        m.insert(GotoBottom, vec![KeyBind::new(Char('b'), n), KeyBind::new(End, n)]);
        m.insert(ForceQuit, vec![KeyBind::new(Char('c'), KeyModifiers::CONTROL)]);

        m
    }

    /// Find the action that matches a key event.  When multiple bindings
    /// match (shouldn't happen after conflict resolution), the one with
    /// the most modifiers wins.
    pub fn match_key(&self, event: KeyEvent) -> Option<Action> {
        let mut best: Option<Action> = None;
        let mut best_mod_count = 0;

        for (&action, binds) in &self.bindings {
            for bind in binds {
                if bind.matches(event) {
                    let mc = bind.modifiers.bits().count_ones();
                    if best.is_none() || mc > best_mod_count {
                        best = Some(action);
                        best_mod_count = mc;
                    }
                }
            }
        }
        best
    }

    /// Does `event` trigger `action`?
    pub fn is(&self, event: KeyEvent, action: Action) -> bool {
        self.match_key(event) == Some(action)
    }

    /// Add a binding for `action`.  Removes this key from any other action
    /// to prevent conflicts, then appends it to `action`'s bindings.
    pub fn add_binding(&mut self, action: Action, bind: KeyBind) {
        for (_, binds) in self.bindings.iter_mut() {
            binds.retain(|b| b != &bind);
        }
        self.bindings.entry(action).or_default().push(bind);
    }

    /// Short display of the first binding only.
    fn short_binding(&self, action: Action) -> String {
        match self.bindings.get(&action) {
            Some(binds) if !binds.is_empty() => binds[0].display(),
            _ => "?".into(),
        }
    }

    /// Help line such as `"↑ up • ↓ down • q back"`.
    pub fn help_line(&self, actions: &[Action]) -> String {
        actions
            .iter()
            .map(|&a| format!("{} {}", self.short_binding(a), a.label()))
            .collect::<Vec<_>>()
            .join(" • ")
    }
}

// ───────────────────────────────────────── config ────────────

/// Everything a view constructor needs besides its own content.
#[derive(Debug, Clone, Default)]
pub struct Config {
    pub keys: KeyMap,
    pub theme: Theme,
}

impl Config {
    /// Load config from the default location, falling back to defaults.
    pub fn load() -> Self {
        Self::load_from(&config_path())
    }

    /// Load config from `path`, falling back to defaults when it is missing
    /// or unreadable.
    pub fn load_from(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(contents) => Self::parse(&contents),
            Err(err) => {
                tracing::debug!(path = %path.display(), %err, "using default config");
                Self::default()
            }
        }
    }

    /// Persist current config to the default location.
    pub fn save(&self) -> anyhow::Result<()> {
        self.save_to(&config_path())
    }

    pub fn save_to(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("creating {}", parent.display()))?;
        }
        std::fs::write(path, self.serialise())
            .with_context(|| format!("writing {}", path.display()))?;
        Ok(())
    }

    fn parse(s: &str) -> Self {
        let mut config = Self::default();

        for line in s.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') || line.starts_with('[') {
                continue;
            }
            let Some((key, value)) = line.split_once('=') else {
                continue;
            };
            let key = key.trim();
            let value = value.trim().trim_matches('"');

            if let Some(slot) = config.theme.color_mut(key) {
                match Color::from_str(value) {
                    Ok(color) => *slot = color,
                    Err(_) => tracing::warn!(key, value, "ignoring unparsable color"),
                }
                continue;
            }

            let Some(action) = Action::from_config_key(key) else {
                tracing::warn!(key, "ignoring unknown config key");
                continue;
            };

            let mut parsed = Vec::new();
            for part in value.split(',') {
                let part = part.trim().trim_matches('"');
                match KeyBind::parse(part) {
                    Some(bind) => parsed.push(bind),
                    None => tracing::warn!(key, part, "ignoring unparsable key"),
                }
            }
            if !parsed.is_empty() {
                config.keys.bindings.insert(action, parsed);
            }
        }

        config
    }

    fn serialise(&self) -> String {
        let mut lines = vec![
            "# viewtree configuration".to_string(),
            String::new(),
            "# Palette (#RRGGBB, ANSI index or color name)".to_string(),
        ];
        for (key, color) in self.theme.colors() {
            lines.push(format!("{key} = \"{color}\""));
        }
        lines.extend([
            String::new(),
            "# Key bindings".to_string(),
            "# Format: action = Key1, Key2, ...".to_string(),
            "# Modifiers: Ctrl+, Alt+, Shift+ (prefix)".to_string(),
            "# Special keys: Up, Down, Left, Right, Enter, Esc, Tab, BackTab,".to_string(),
            "#   Home, End, PageUp, PageDown, Space, F1-F12".to_string(),
            String::new(),
        ]);

        for &action in Action::ALL {
            if let Some(binds) = self.keys.bindings.get(&action) {
                let keys: Vec<String> = binds.iter().map(|b| b.to_config_string()).collect();
                lines.push(format!("{} = {}", action.config_key(), keys.join(", ")));
            }
        }
        lines.push(String::new());
        lines.join("\n")
    }
}

/// Return the config file path (`$XDG_CONFIG_HOME/viewtree/config.toml`).
pub fn config_path() -> PathBuf {
    let config_dir = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
            PathBuf::from(home).join(".config")
        });
    config_dir.join(env!("CARGO_PKG_NAME")).join("config.toml")
}
