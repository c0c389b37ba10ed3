//! Table state and the operations on it.

use std::mem;

use log::debug;

use super::column::Column;
use super::column::ColumnState;
use super::column::ROW_NUMBER_LABEL;
use super::column::ROW_NUMBER_WIDTH;
use super::column::dedupe;
use super::column::reconcile;
use super::panel::ConfigPanel;
use super::resize::ResizeDrag;
use super::sort::SortDirection;
use super::sort::SortState;
use super::sort::next_sort;
use super::sort::sorted_order;
use super::value::TableRow;
use crate::rect::Rect;
use crate::units_to_cells;

/// Placeholder shown when there are no rows, unless overridden.
pub const DEFAULT_EMPTY_TEXT: &str = "No data available";

/// Something the parent should react to, drained with
/// [`Table::drain_events`].
///
/// `index` always refers to the position in the rows passed to
/// [`Table::set_rows`], not the sorted display position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableEvent {
    /// A body row was clicked or Enter was pressed on it.
    RowActivated { index: usize },
    /// An action cell was clicked.
    Action { index: usize, id: String },
}

/// Direction of an adjacent column swap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveDirection {
    Up,
    Down,
}

/// One header cell as laid out, left to right.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderCell {
    /// `None` for the row-number column.
    pub key: Option<String>,
    pub label: String,
    /// Effective width in display units.
    pub width: u32,
    pub sortable: bool,
    pub sort: Option<SortDirection>,
}

/// What the body area shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyLayout {
    /// A single placeholder row spanning `span` columns.
    Placeholder { span: usize },
    /// `n` data rows.
    Rows(usize),
}

/// Horizontal extent of a laid-out column in content cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) struct ColumnSpan {
    pub key: Option<String>,
    pub start: u16,
    pub width: u16,
}

impl ColumnSpan {
    pub fn end(&self) -> u16 {
        self.start.saturating_add(self.width)
    }

    /// Last cell of the span, where the resize handle sits.
    pub fn handle(&self) -> u16 {
        self.end().saturating_sub(1)
    }
}

/// Screen placement recorded by the last render, used for hit-testing.
#[derive(Debug, Clone, Default)]
pub(super) struct Geometry {
    pub area: Rect,
    pub toolbar_button: Rect,
    pub header: Rect,
    pub body: Rect,
}

/// A sortable, resizable, column-configurable grid over row snapshots.
///
/// The table never mutates rows. Column order, visibility and widths, the
/// sort and the scroll position are presentation state layered on top of
/// the snapshot and survive [`set_rows`](Self::set_rows).
pub struct Table<R> {
    pub(super) columns: Vec<Column<R>>,
    pub(super) state: Vec<ColumnState>,
    pub(super) sort: Option<SortState>,
    pub(super) rows: Vec<R>,
    pub(super) order: Vec<usize>,
    pub(super) show_row_number: bool,
    pub(super) row_activation: bool,
    pub(super) empty_text: String,
    /// Display position of the highlighted row.
    pub(super) cursor: usize,
    pub(super) scroll_y: usize,
    pub(super) scroll_x: u16,
    /// Index into the visible columns.
    pub(super) column_cursor: usize,
    pub(super) resize: Option<ResizeDrag>,
    pub(super) panel: Option<ConfigPanel>,
    pub(super) geometry: Geometry,
    pub(super) events: Vec<TableEvent>,
}

impl<R: TableRow> Table<R> {
    pub fn new(columns: Vec<Column<R>>) -> Self {
        let mut table = Self {
            columns: Vec::new(),
            state: Vec::new(),
            sort: None,
            rows: Vec::new(),
            order: Vec::new(),
            show_row_number: false,
            row_activation: false,
            empty_text: DEFAULT_EMPTY_TEXT.to_string(),
            cursor: 0,
            scroll_y: 0,
            scroll_x: 0,
            column_cursor: 0,
            resize: None,
            panel: None,
            geometry: Geometry::default(),
            events: Vec::new(),
        };
        table.set_columns(columns);
        table
    }

    /// Prepends a 1-based "Sl. No" column.
    pub fn show_row_number(mut self, show: bool) -> Self {
        self.show_row_number = show;
        self
    }

    /// Emits [`TableEvent::RowActivated`] on row clicks and Enter.
    pub fn on_row_click(mut self) -> Self {
        self.row_activation = true;
        self
    }

    /// Placeholder text for an empty table.
    pub fn empty_text(mut self, text: impl Into<String>) -> Self {
        self.empty_text = text.into();
        self
    }

    /// Replaces the column descriptors, merging by key.
    ///
    /// Duplicate keys are dropped with a warning. Columns that survive keep
    /// their order, visibility and width override; new columns are appended
    /// visible; removed columns disappear, and a sort on a removed or no
    /// longer sortable column is cleared.
    pub fn set_columns(&mut self, columns: Vec<Column<R>>) {
        let columns = dedupe(columns);
        self.state = reconcile(&self.state, &columns);
        self.columns = columns;

        let sort_valid = self
            .sort
            .as_ref()
            .is_some_and(|sort| self.column(&sort.key).is_some_and(|c| c.is_sortable()));
        if self.sort.is_some() && !sort_valid {
            debug!("clearing sort on removed column");
            self.sort = None;
        }

        if self
            .resize
            .as_ref()
            .is_some_and(|drag| self.column(drag.key()).is_none())
        {
            self.resize = None;
        }

        self.clamp_column_cursor();
        self.refresh_order();
    }

    /// Replaces the row snapshot. Presentation state is kept.
    pub fn set_rows(&mut self, rows: Vec<R>) {
        self.rows = rows;
        self.refresh_order();
        self.cursor = self.cursor.min(self.rows.len().saturating_sub(1));
        self.clamp_scroll();
    }

    pub(super) fn refresh_order(&mut self) {
        self.order = sorted_order(&self.rows, self.sort.as_ref());
    }

    /// Cycles the sort on `key`. Returns `false` for unknown or
    /// non-sortable columns, which ignore activation.
    pub fn toggle_sort(&mut self, key: &str) -> bool {
        if !self.column(key).is_some_and(|c| c.is_sortable()) {
            return false;
        }
        self.sort = next_sort(self.sort.as_ref(), key);
        self.refresh_order();
        true
    }

    /// Flips visibility of `key`. Order and width are untouched.
    pub fn toggle_visibility(&mut self, key: &str) -> bool {
        let Some(state) = self.state.iter_mut().find(|s| s.key == key) else {
            return false;
        };
        state.visible = !state.visible;
        self.clamp_column_cursor();
        true
    }

    /// Swaps the column at `index` (in configuration order) with its
    /// neighbour. Moves past either end are no-ops and return `false`.
    pub fn move_column(&mut self, index: usize, direction: MoveDirection) -> bool {
        if index >= self.state.len() {
            return false;
        }
        let target = match direction {
            MoveDirection::Up if index > 0 => index - 1,
            MoveDirection::Down if index + 1 < self.state.len() => index + 1,
            _ => return false,
        };
        self.state.swap(index, target);
        true
    }

    pub fn sort(&self) -> Option<&SortState> {
        self.sort.as_ref()
    }

    pub fn column(&self, key: &str) -> Option<&Column<R>> {
        self.columns.iter().find(|c| c.key() == key)
    }

    /// Runtime state of every column in configuration order.
    pub fn column_states(&self) -> &[ColumnState] {
        &self.state
    }

    pub fn column_keys(&self) -> Vec<&str> {
        self.state.iter().map(|s| s.key.as_str()).collect()
    }

    pub fn visible_keys(&self) -> Vec<&str> {
        self.state
            .iter()
            .filter(|s| s.visible)
            .map(|s| s.key.as_str())
            .collect()
    }

    /// Override if set, otherwise the descriptor width.
    pub fn effective_width(&self, key: &str) -> Option<u32> {
        let state = self.state.iter().find(|s| s.key == key)?;
        let column = self.column(key)?;
        Some(state.width_override.unwrap_or(column.initial_width()))
    }

    /// Visible columns paired with their state, in display order.
    pub(super) fn visible_columns(&self) -> impl Iterator<Item = (&ColumnState, &Column<R>)> {
        self.state
            .iter()
            .filter(|s| s.visible)
            .filter_map(|s| self.column(&s.key).map(|c| (s, c)))
    }

    pub fn header_cells(&self) -> Vec<HeaderCell> {
        let mut cells = Vec::new();
        if self.show_row_number {
            cells.push(HeaderCell {
                key: None,
                label: ROW_NUMBER_LABEL.to_string(),
                width: ROW_NUMBER_WIDTH,
                sortable: false,
                sort: None,
            });
        }
        for (state, column) in self.visible_columns() {
            cells.push(HeaderCell {
                key: Some(state.key.clone()),
                label: column.label().to_string(),
                width: state.width_override.unwrap_or(column.initial_width()),
                sortable: column.is_sortable(),
                sort: self
                    .sort
                    .as_ref()
                    .filter(|sort| sort.key == state.key)
                    .map(|sort| sort.direction),
            });
        }
        cells
    }

    pub fn body_layout(&self) -> BodyLayout {
        if self.rows.is_empty() {
            BodyLayout::Placeholder {
                span: self.header_cells().len(),
            }
        } else {
            BodyLayout::Rows(self.rows.len())
        }
    }

    pub(super) fn spans(&self) -> Vec<ColumnSpan> {
        let mut x = 0u16;
        self.header_cells()
            .into_iter()
            .map(|cell| {
                let width = units_to_cells(cell.width).max(2);
                let span = ColumnSpan {
                    key: cell.key,
                    start: x,
                    width,
                };
                x = x.saturating_add(width);
                span
            })
            .collect()
    }

    pub(super) fn content_width(&self) -> u16 {
        self.spans().last().map(|s| s.end()).unwrap_or(0)
    }

    pub fn rows(&self) -> &[R] {
        &self.rows
    }

    pub fn empty_placeholder(&self) -> &str {
        &self.empty_text
    }

    /// Source indices in display order.
    pub fn display_order(&self) -> &[usize] {
        &self.order
    }

    pub fn displayed_rows(&self) -> impl Iterator<Item = &R> {
        self.order.iter().map(|&i| &self.rows[i])
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Source index of the highlighted row.
    pub fn cursor_row(&self) -> Option<usize> {
        self.order.get(self.cursor).copied()
    }

    pub fn move_cursor(&mut self, delta: isize) {
        if self.rows.is_empty() {
            return;
        }
        let last = self.rows.len() - 1;
        self.cursor = self.cursor.saturating_add_signed(delta).min(last);
        self.scroll_to_cursor();
    }

    pub(super) fn page_size(&self) -> usize {
        (self.geometry.body.height as usize).max(1)
    }

    fn scroll_to_cursor(&mut self) {
        let page = self.page_size();
        if self.cursor < self.scroll_y {
            self.scroll_y = self.cursor;
        } else if self.cursor >= self.scroll_y + page {
            self.scroll_y = self.cursor + 1 - page;
        }
    }

    pub(super) fn clamp_scroll(&mut self) {
        let max = self.rows.len().saturating_sub(self.page_size());
        self.scroll_y = self.scroll_y.min(max);
    }

    pub(super) fn scroll_rows(&mut self, delta: isize) {
        self.scroll_y = self.scroll_y.saturating_add_signed(delta);
        self.clamp_scroll();
        let page = self.page_size();
        if self.cursor < self.scroll_y {
            self.cursor = self.scroll_y;
        } else if self.cursor >= self.scroll_y + page {
            self.cursor = self.scroll_y + page - 1;
        }
        self.cursor = self.cursor.min(self.rows.len().saturating_sub(1));
    }

    pub(super) fn scroll_columns(&mut self, delta: i32) {
        let max = self.content_width().saturating_sub(self.geometry.area.width) as i32;
        self.scroll_x = (self.scroll_x as i32 + delta).clamp(0, max.max(0)) as u16;
    }

    fn clamp_column_cursor(&mut self) {
        let visible = self.state.iter().filter(|s| s.visible).count();
        self.column_cursor = self.column_cursor.min(visible.saturating_sub(1));
    }

    /// Key of the column under the column cursor.
    pub fn column_cursor_key(&self) -> Option<&str> {
        self.visible_columns()
            .nth(self.column_cursor)
            .map(|(state, _)| state.key.as_str())
    }

    pub(super) fn move_column_cursor(&mut self, delta: isize) {
        self.column_cursor = self.column_cursor.saturating_add_signed(delta);
        self.clamp_column_cursor();
    }

    /// Emits a row activation for the highlighted row when enabled.
    pub fn activate_cursor(&mut self) -> bool {
        if !self.row_activation {
            return false;
        }
        match self.cursor_row() {
            Some(index) => {
                self.events.push(TableEvent::RowActivated { index });
                true
            }
            None => false,
        }
    }

    /// Takes the events queued since the last call.
    pub fn drain_events(&mut self) -> Vec<TableEvent> {
        mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;
    use crate::components::table::Value;

    type Row = BTreeMap<String, Value>;

    fn table(keys: &[&str]) -> Table<Row> {
        Table::new(keys.iter().map(|k| Column::new(*k, k.to_uppercase())).collect())
    }

    #[test]
    fn test_move_column_boundaries() {
        let mut t = table(&["a", "b", "c"]);
        assert!(!t.move_column(0, MoveDirection::Up));
        assert!(!t.move_column(2, MoveDirection::Down));
        assert!(!t.move_column(7, MoveDirection::Down));
        assert!(!t.move_column(7, MoveDirection::Up));
        assert!(!t.move_column(3, MoveDirection::Up));
        assert_eq!(t.column_keys(), vec!["a", "b", "c"]);

        assert!(t.move_column(1, MoveDirection::Down));
        assert_eq!(t.column_keys(), vec!["a", "c", "b"]);
    }

    #[test]
    fn test_unknown_keys_are_ignored() {
        let mut t = table(&["a"]);
        assert!(!t.toggle_sort("zzz"));
        assert!(!t.toggle_visibility("zzz"));
    }

    #[test]
    fn test_header_cells_with_row_number() {
        let t = table(&["a", "b"]).show_row_number(true);
        let cells = t.header_cells();
        assert_eq!(cells.len(), 3);
        assert_eq!(cells[0].key, None);
        assert_eq!(cells[0].label, "Sl. No");
        assert!(!cells[0].sortable);
    }

    #[test]
    fn test_spans_follow_widths() {
        let t: Table<Row> =
            Table::new(vec![Column::new("a", "A").width(80), Column::new("b", "B")]);
        let spans = t.spans();
        assert_eq!(spans[0].start, 0);
        assert_eq!(spans[0].width, 10);
        assert_eq!(spans[1].start, 10);
        assert_eq!(spans[1].width, 18);
        assert_eq!(t.content_width(), 28);
    }

    #[test]
    fn test_cursor_clamps_to_rows() {
        let mut t = table(&["a"]);
        t.set_rows(vec![Row::new(), Row::new()]);
        t.move_cursor(5);
        assert_eq!(t.cursor(), 1);
        t.set_rows(vec![Row::new()]);
        assert_eq!(t.cursor(), 0);
        t.move_cursor(-3);
        assert_eq!(t.cursor(), 0);
    }

    #[test]
    fn test_activate_cursor_requires_row_click() {
        let mut t = table(&["a"]);
        t.set_rows(vec![Row::new()]);
        assert!(!t.activate_cursor());

        let mut t = table(&["a"]).on_row_click();
        t.set_rows(vec![Row::new()]);
        assert!(t.activate_cursor());
        assert_eq!(t.drain_events(), vec![TableEvent::RowActivated { index: 0 }]);
    }
}
