//! Selector composite: a titled list of items, each owning a child view.
//!
//! While nothing is entered the menu drives its own list.  Selecting an item
//! enters that item's child; from then on every message goes to the child
//! and the list is hidden.  When the child ascends, every child is reset
//! and the list comes back.

use std::sync::Arc;

use ratatui::{
    layout::Rect,
    style::Modifier,
    text::{Line, Span, Text},
    widgets::{List, ListItem, ListState, Paragraph, StatefulWidget, Widget},
};

use crate::config::{Action, Config};
use crate::error::BuildError;
use crate::ui::{canvas, cursor::Cursor};
use crate::view::{dispatch, Cmd, Msg, Registry, View};

const DEFAULT_WIDTH: u16 = 80;
const DEFAULT_HEIGHT: u16 = 20;

/// Rows used by the title, the gap below it and the help line.
const MENU_CHROME_HEIGHT: u16 = 3;
/// Rows per list entry: title, description, spacer.
const ITEM_HEIGHT: u16 = 3;

const HELP_ACTIONS: &[Action] = &[Action::LineUp, Action::LineDown, Action::Select, Action::Back];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuItem {
    pub title: String,
    pub description: String,
}

impl MenuItem {
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
        }
    }
}

/// An item together with the view it opens.
pub struct MenuEntry {
    pub item: MenuItem,
    pub view: Box<dyn View>,
}

impl MenuEntry {
    pub fn new(title: impl Into<String>, description: impl Into<String>, view: impl View + 'static) -> Self {
        Self::boxed(title, description, Box::new(view))
    }

    pub fn boxed(title: impl Into<String>, description: impl Into<String>, view: Box<dyn View>) -> Self {
        Self {
            item: MenuItem::new(title, description),
            view,
        }
    }
}

/// A titled list whose items each open a child view.  With nothing entered,
/// the ascend sentinel and the back key are passed up to the owner.
pub struct Menu {
    title: String,
    items: Vec<MenuItem>,
    children: Registry,
    cursor: Cursor,
    width: u16,
    height: u16,
    config: Arc<Config>,
}

impl Menu {
    /// Item titles double as registry keys and must be unique.
    pub fn new(title: impl Into<String>, entries: Vec<MenuEntry>, config: Arc<Config>) -> Result<Self, BuildError> {
        let mut children = Registry::new();
        let mut items = Vec::with_capacity(entries.len());
        for entry in entries {
            children.insert(entry.item.title.clone(), entry.view)?;
            items.push(entry.item);
        }

        let mut menu = Self {
            title: title.into(),
            items,
            children,
            cursor: Cursor::default(),
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            config,
        };
        menu.children.set_width_all(menu.width);
        menu.children.set_height_all(menu.height);
        Ok(menu)
    }

    /// Title of the entered child, if any.
    pub fn active_key(&self) -> Option<&str> {
        self.children.active_key()
    }

    /// Title of the highlighted list item.
    pub fn highlighted(&self) -> Option<&str> {
        self.items.get(self.cursor.selected).map(|i| i.title.as_str())
    }

    pub fn child(&self, key: &str) -> Option<&dyn View> {
        self.children.get(key)
    }

    fn items_per_page(&self) -> usize {
        let rows = self.height.saturating_sub(MENU_CHROME_HEIGHT) / ITEM_HEIGHT;
        usize::from(rows.max(1))
    }

    fn update_list(&mut self, msg: Msg) -> Vec<Cmd> {
        let key = match msg {
            Msg::Key(key) => key,
            Msg::Ascend => return dispatch::ascend(),
            _ => return Vec::new(),
        };
        let count = self.items.len();
        let page = self.items_per_page();
        match self.config.keys.match_key(key) {
            Some(Action::LineUp) => self.cursor.select_prev(),
            Some(Action::LineDown) => self.cursor.select_next(count),
            Some(Action::PageUp) => self.cursor.back(page),
            Some(Action::PageDown) => self.cursor.forward(page, count),
            Some(Action::GotoTop) => self.cursor.first(),
            Some(Action::GotoBottom) => self.cursor.last(count),
            Some(Action::Select) => {
                if let Some(title) = self.highlighted().map(str::to_owned) {
                    self.children.activate(&title);
                }
                return Vec::new();
            }
            Some(Action::Back) => return dispatch::ascend(),
            _ => {}
        }
        self.cursor.clamp_scroll(page);
        Vec::new()
    }

    fn list_view(&self) -> Text<'static> {
        let theme = &self.config.theme;
        let items: Vec<ListItem<'static>> = self
            .items
            .iter()
            .enumerate()
            .map(|(i, item)| {
                let (title_style, desc_style) = if i == self.cursor.selected {
                    let s = theme.selected_style();
                    (s, s.remove_modifier(Modifier::BOLD))
                } else {
                    (theme.item_style(), theme.description_style())
                };
                ListItem::new(vec![
                    Line::styled(item.title.clone(), title_style),
                    Line::styled(item.description.clone(), desc_style),
                    Line::raw(""),
                ])
            })
            .collect();

        let selected = (!self.items.is_empty()).then_some(self.cursor.selected);
        let mut state = ListState::default()
            .with_offset(self.cursor.offset)
            .with_selected(selected);
        let title = Line::from(Span::styled(format!(" {} ", self.title), theme.title_style()));
        let help = Line::styled(self.config.keys.help_line(HELP_ACTIONS), theme.help_style());
        let list = List::new(items)
            .highlight_symbol("│ ")
            .highlight_style(theme.selected_style());

        canvas::draw(self.width, self.height, |area, buf| {
            Paragraph::new(title).render(Rect::new(area.x, area.y, area.width, 1), buf);
            let list_h = area.height.saturating_sub(MENU_CHROME_HEIGHT);
            let list_area = Rect::new(area.x, area.y + 2, area.width, list_h);
            StatefulWidget::render(list, list_area, buf, &mut state);
            if area.height > 1 {
                let help_row = area.y + area.height - 1;
                Paragraph::new(help).render(Rect::new(area.x, help_row, area.width, 1), buf);
            }
        })
    }
}

impl View for Menu {
    fn init(&mut self) -> Vec<Cmd> {
        self.children.init_all()
    }

    fn update(&mut self, msg: Msg) -> Vec<Cmd> {
        if let Msg::Resize { width, height } = msg {
            self.set_width(width);
            self.set_height(height);
            return Vec::new();
        }
        if self.children.active_key().is_some() {
            return self.children.forward(msg).unwrap_or_default();
        }
        self.update_list(msg)
    }

    fn view(&self) -> Text<'static> {
        match self.children.active() {
            Some(child) => child.view(),
            None => self.list_view(),
        }
    }

    fn set_width(&mut self, width: u16) {
        self.width = width;
        self.children.set_width_all(width);
    }

    fn set_height(&mut self, height: u16) {
        self.height = height;
        self.children.set_height_all(height);
        let page = self.items_per_page();
        self.cursor.clamp_scroll(page);
    }

    fn reset(&mut self) {
        self.cursor = Cursor::default();
        self.children.deactivate();
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::view::probe::{Probe, ProbeLog};
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    fn key(code: KeyCode) -> Msg {
        Msg::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn menu(titles: &[&str]) -> (Menu, Vec<Rc<RefCell<ProbeLog>>>) {
        let mut entries = Vec::new();
        let mut logs = Vec::new();
        for t in titles {
            let (view, log) = Probe::boxed(t);
            entries.push(MenuEntry::boxed(*t, format!("about {t}"), view));
            logs.push(log);
        }
        (Menu::new("Pick one", entries, Arc::new(Config::default())).unwrap(), logs)
    }

    #[test]
    fn down_then_select_enters_beta() {
        let (mut m, logs) = menu(&["alpha", "beta"]);
        m.update(key(KeyCode::Down));
        assert_eq!(m.highlighted(), Some("beta"));
        let cmds = m.update(key(KeyCode::Enter));
        assert!(cmds.is_empty());
        assert_eq!(m.active_key(), Some("beta"));
        assert_eq!(m.view(), m.child("beta").unwrap().view());
        // The select key itself is not forwarded.
        assert!(logs[1].borrow().received.is_empty());
    }

    #[test]
    fn ascend_returns_to_list_and_resets_everything() {
        let (mut m, logs) = menu(&["alpha", "beta"]);
        let list = m.view();
        m.update(key(KeyCode::Down));
        m.update(key(KeyCode::Enter));

        let cmds = m.update(Msg::Ascend);
        assert!(cmds.is_empty(), "sentinel must not escape the menu");
        assert_eq!(m.active_key(), None);
        assert!(canvas::plain(&m.view()).contains("Pick one"));
        assert_ne!(m.view(), list, "highlight stays on beta");
        for log in &logs {
            assert_eq!(log.borrow().resets, 1);
        }
    }

    #[test]
    fn messages_go_to_entered_child_only() {
        let (mut m, logs) = menu(&["alpha", "beta"]);
        m.update(key(KeyCode::Enter));
        m.update(key(KeyCode::Down));
        m.update(Msg::custom(5u8));
        assert_eq!(logs[0].borrow().received.len(), 2);
        assert!(logs[1].borrow().received.is_empty());
        assert_eq!(m.highlighted(), Some("alpha"));
    }

    #[test]
    fn resize_reaches_every_child_even_while_one_is_entered() {
        let (mut m, logs) = menu(&["alpha", "beta", "gamma"]);
        m.update(key(KeyCode::Enter));
        let cmds = m.update(Msg::Resize { width: 120, height: 33 });
        assert!(cmds.is_empty());
        for log in &logs {
            assert_eq!((log.borrow().width, log.borrow().height), (120, 33));
            assert!(log.borrow().received.is_empty());
        }
    }

    #[test]
    fn reset_matches_fresh_menu_and_is_idempotent() {
        let (fresh, _) = menu(&["alpha", "beta"]);
        let (mut m, _) = menu(&["alpha", "beta"]);
        m.update(key(KeyCode::Down));
        m.update(key(KeyCode::Enter));
        m.reset();
        assert_eq!(m.active_key(), None);
        assert_eq!(m.view(), fresh.view());
        m.reset();
        assert_eq!(m.view(), fresh.view());
    }

    #[test]
    fn back_and_sentinel_at_list_level_ascend_without_state_change() {
        let (mut m, _) = menu(&["alpha"]);
        assert!(m.update(key(KeyCode::Esc))[0].is_ascend());
        assert!(m.update(Msg::Ascend)[0].is_ascend());
        assert_eq!(m.active_key(), None);
    }

    #[test]
    fn nested_menu_pops_one_level_at_a_time() {
        let config = Arc::new(Config::default());
        let (leaf, leaf_log) = Probe::boxed("leaf");
        let inner = Menu::new("inner", vec![MenuEntry::boxed("leaf", "", leaf)], Arc::clone(&config)).unwrap();
        let mut outer = Menu::new("outer", vec![MenuEntry::new("inner", "", inner)], config).unwrap();

        outer.update(key(KeyCode::Enter));
        outer.update(key(KeyCode::Enter));
        assert!(canvas::plain(&outer.view()).contains("probe:leaf"));

        assert!(outer.update(Msg::Ascend).is_empty());
        assert_eq!(outer.active_key(), Some("inner"));
        assert_eq!(leaf_log.borrow().resets, 1);

        assert!(outer.update(key(KeyCode::Char('q'))).is_empty());
        assert_eq!(outer.active_key(), None);
    }

    #[test]
    fn duplicate_titles_are_rejected() {
        let (a, _) = Probe::boxed("a");
        let (b, _) = Probe::boxed("b");
        let err = Menu::new(
            "dup",
            vec![MenuEntry::boxed("same", "", a), MenuEntry::boxed("same", "", b)],
            Arc::new(Config::default()),
        )
        .err();
        assert_eq!(err, Some(BuildError::DuplicateKey("same".into())));
    }

    #[test]
    fn select_on_empty_menu_is_a_no_op() {
        let mut m = Menu::new("empty", Vec::new(), Arc::new(Config::default())).unwrap();
        assert!(m.update(key(KeyCode::Enter)).is_empty());
        assert_eq!(m.active_key(), None);
    }

    #[test]
    fn init_collects_children_commands() {
        let (mut m, logs) = menu(&["alpha", "beta"]);
        assert_eq!(m.init().len(), 2);
        assert!(logs.iter().all(|l| l.borrow().inits == 1));
    }

    #[test]
    fn list_view_shows_titles_and_help() {
        let (m, _) = menu(&["alpha", "beta"]);
        let plain = canvas::plain(&m.view());
        assert!(plain.contains("│ alpha"));
        assert!(plain.contains("about beta"));
        assert!(plain.contains("enter select"));
    }
}
