//! Tabular composite: fixed columns and rows with a scrolling selection.
//!
//! Column widths are nominal.  Every width change redistributes the usable
//! width across columns proportionally to their nominal sizes.

use std::sync::Arc;

use ratatui::{
    layout::{Constraint, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Text},
    widgets::{Block, Borders, Paragraph, Row, StatefulWidget, Table as TableWidget, TableState, Widget},
};
use tracing::debug;

use crate::config::{Action, Config};
use crate::error::BuildError;
use crate::ui::{canvas, cursor::Cursor, layout::interior};
use crate::view::{dispatch, Cmd, Msg, View};

const DEFAULT_WIDTH: u16 = 80;
/// Visible rows before the first `set_height`.
const DEFAULT_VISIBLE_ROWS: u16 = 20;

/// Columns lose this much to borders, padding and spacing.
pub const TABLE_CHROME_WIDTH: u16 = 10;
/// Border (2), header row and help line.
pub const TABLE_CHROME_HEIGHT: u16 = 4;

const HELP_ACTIONS: &[Action] = &[
    Action::LineUp,
    Action::LineDown,
    Action::PageUp,
    Action::PageDown,
    Action::GotoTop,
    Action::GotoBottom,
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    pub title: String,
    /// Nominal width; only its ratio to the other columns matters.
    pub width: u16,
}

impl Column {
    pub fn new(title: impl Into<String>, width: u16) -> Self {
        Self {
            title: title.into(),
            width,
        }
    }
}

/// Split `available` cells across `nominal` weights.  Each share is within
/// one cell of its exact proportion and the total never exceeds `available`.
pub fn distribute(nominal: &[u16], available: u16) -> Vec<u16> {
    let total: u32 = nominal.iter().map(|&w| u32::from(w)).sum();
    if total == 0 {
        return vec![0; nominal.len()];
    }
    let available = u32::from(available);

    let mut widths = Vec::with_capacity(nominal.len());
    let mut remainders = Vec::with_capacity(nominal.len());
    for (i, &w) in nominal.iter().enumerate() {
        let scaled = u32::from(w) * available;
        widths.push(scaled / total);
        remainders.push((scaled % total, i));
    }

    // Hand the leftover cells to the largest remainders, earlier columns first on ties.
    let mut leftover = available - widths.iter().sum::<u32>();
    remainders.sort_by(|a, b| b.0.cmp(&a.0).then(a.1.cmp(&b.1)));
    for &(rem, i) in &remainders {
        if leftover == 0 || rem == 0 {
            break;
        }
        widths[i] += 1;
        leftover -= 1;
    }

    widths.into_iter().map(|w| w as u16).collect()
}

pub struct TableBuilder {
    config: Arc<Config>,
    columns: Vec<Column>,
    rows: Vec<Vec<String>>,
    width: u16,
    height: Option<u16>,
    help: bool,
    focus: Option<Color>,
    init_cmd: Option<Box<dyn Fn() -> Cmd>>,
}

impl TableBuilder {
    pub fn columns(mut self, columns: Vec<Column>) -> Self {
        self.columns = columns;
        self
    }

    pub fn rows<R, C>(mut self, rows: R) -> Self
    where
        R: IntoIterator<Item = C>,
        C: IntoIterator,
        C::Item: Into<String>,
    {
        self.rows = rows
            .into_iter()
            .map(|row| row.into_iter().map(Into::into).collect())
            .collect();
        self
    }

    pub fn width(mut self, width: u16) -> Self {
        self.width = width;
        self
    }

    /// Outer height; by default the table shows twenty rows.
    pub fn height(mut self, height: u16) -> Self {
        self.height = Some(height);
        self
    }

    pub fn help(mut self) -> Self {
        self.help = true;
        self
    }

    /// Background of the selected row, overriding the theme.
    pub fn focus_color(mut self, color: Color) -> Self {
        self.focus = Some(color);
        self
    }

    /// Command returned from `init`, e.g. a task that loads data.
    pub fn init_cmd(mut self, f: impl Fn() -> Cmd + 'static) -> Self {
        self.init_cmd = Some(Box::new(f));
        self
    }

    pub fn build(self) -> Result<Table, BuildError> {
        if self.columns.is_empty() {
            return Err(BuildError::NoColumns);
        }
        if let Some(col) = self.columns.iter().find(|c| c.width == 0) {
            return Err(BuildError::InvalidColumnWidth {
                title: col.title.clone(),
            });
        }
        if self.width == 0 {
            return Err(BuildError::InvalidWidth(0));
        }
        if self.height == Some(0) {
            return Err(BuildError::InvalidHeight(0));
        }
        let expected = self.columns.len();
        if let Some((row, cells)) = self.rows.iter().enumerate().find(|(_, r)| r.len() != expected) {
            return Err(BuildError::RowArity {
                row,
                got: cells.len(),
                expected,
            });
        }

        let height = self.height.unwrap_or(DEFAULT_VISIBLE_ROWS + TABLE_CHROME_HEIGHT);
        let mut table = Table {
            columns: self.columns,
            widths: Vec::new(),
            rows: self.rows,
            cursor: Cursor::default(),
            width: self.width,
            height,
            visible: 0,
            help: self.help,
            focus: self.focus,
            init_cmd: self.init_cmd,
            config: self.config,
        };
        table.set_width(self.width);
        table.set_height(height);
        Ok(table)
    }
}

pub struct Table {
    columns: Vec<Column>,
    widths: Vec<u16>,
    rows: Vec<Vec<String>>,
    cursor: Cursor,
    width: u16,
    height: u16,
    visible: u16,
    help: bool,
    focus: Option<Color>,
    init_cmd: Option<Box<dyn Fn() -> Cmd>>,
    config: Arc<Config>,
}

impl Table {
    pub fn builder(config: Arc<Config>) -> TableBuilder {
        TableBuilder {
            config,
            columns: Vec::new(),
            rows: Vec::new(),
            width: DEFAULT_WIDTH,
            height: None,
            help: false,
            focus: None,
            init_cmd: None,
        }
    }

    /// Current rendered width of each column.
    pub fn column_widths(&self) -> &[u16] {
        &self.widths
    }

    /// Index of the selected row.
    pub fn cursor(&self) -> usize {
        self.cursor.selected
    }

    /// First row shown in the viewport.
    pub fn offset(&self) -> usize {
        self.cursor.offset
    }

    pub fn visible_rows(&self) -> u16 {
        self.visible
    }

    pub fn selected_row(&self) -> Option<&[String]> {
        self.rows.get(self.cursor.selected).map(Vec::as_slice)
    }

    fn move_cursor(&mut self, action: Action) {
        let count = self.rows.len();
        let page = usize::from(self.visible.max(1));
        let half = (page / 2).max(1);
        match action {
            Action::LineUp => self.cursor.select_prev(),
            Action::LineDown => self.cursor.select_next(count),
            Action::PageUp => self.cursor.back(page),
            Action::PageDown => self.cursor.forward(page, count),
            Action::HalfPageUp => self.cursor.back(half),
            Action::HalfPageDown => self.cursor.forward(half, count),
            Action::GotoTop => self.cursor.first(),
            Action::GotoBottom => self.cursor.last(count),
            _ => return,
        }
        self.cursor.clamp_scroll(usize::from(self.visible));
    }
}

impl View for Table {
    fn init(&mut self) -> Vec<Cmd> {
        self.init_cmd.as_ref().map(|f| vec![f()]).unwrap_or_default()
    }

    fn update(&mut self, msg: Msg) -> Vec<Cmd> {
        match msg {
            Msg::Resize { width, height } => {
                self.set_width(width);
                self.set_height(height);
                Vec::new()
            }
            Msg::Ascend => dispatch::ascend(),
            Msg::Key(key) => match self.config.keys.match_key(key) {
                Some(Action::Back) => dispatch::ascend(),
                Some(action) => {
                    self.move_cursor(action);
                    Vec::new()
                }
                None => Vec::new(),
            },
            _ => Vec::new(),
        }
    }

    fn view(&self) -> Text<'static> {
        let theme = &self.config.theme;
        let header = Row::new(self.columns.iter().map(|c| c.title.clone()))
            .style(theme.header_style().add_modifier(Modifier::BOLD));
        let rows = self.rows.iter().map(|r| Row::new(r.iter().cloned()));
        let selected = match self.focus {
            Some(bg) => Style::default().fg(Color::White).bg(bg).add_modifier(Modifier::BOLD),
            None => theme.selected_style(),
        };
        let widget = TableWidget::new(rows, self.widths.iter().map(|&w| Constraint::Length(w)))
            .header(header)
            .row_highlight_style(selected)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(theme.table_border_style()),
            );
        let mut state = TableState::default().with_offset(self.cursor.offset);
        if !self.rows.is_empty() {
            state = state.with_selected(Some(self.cursor.selected));
        }
        let help = self
            .help
            .then(|| Line::styled(self.config.keys.help_line(HELP_ACTIONS), theme.help_style()));

        canvas::draw(self.width, self.height, |area, buf| {
            // Border, header and the visible rows; the help line sits below.
            let table_h = (self.visible + TABLE_CHROME_HEIGHT - 1).min(area.height);
            StatefulWidget::render(widget, Rect::new(area.x, area.y, area.width, table_h), buf, &mut state);
            if let Some(help) = help {
                if area.height > table_h {
                    Paragraph::new(help).render(Rect::new(area.x, area.y + table_h, area.width, 1), buf);
                }
            }
        })
    }

    fn set_width(&mut self, width: u16) {
        self.width = width;
        let nominal: Vec<u16> = self.columns.iter().map(|c| c.width).collect();
        self.widths = distribute(&nominal, interior(width, TABLE_CHROME_WIDTH));
    }

    fn set_height(&mut self, height: u16) {
        self.height = height;
        self.visible = interior(height, TABLE_CHROME_HEIGHT);
        self.cursor.clamp(self.rows.len());
        self.cursor.clamp_scroll(usize::from(self.visible));
        debug!(height, visible = self.visible, cursor = self.cursor.selected, "table geometry changed");
    }

    fn reset(&mut self) {
        self.cursor = Cursor::default();
    }
}
