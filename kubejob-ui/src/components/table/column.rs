//! Column descriptors, cell content and per-column runtime state.

use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use log::warn;

use super::value::TableRow;
use crate::style::Tone;

/// Width in display units when a descriptor does not set one.
pub const DEFAULT_COLUMN_WIDTH: u32 = 150;

/// Smallest width a drag-resize can produce, in display units.
pub const MIN_COLUMN_WIDTH: u32 = 50;

/// Width of the "Sl. No" column, in display units.
pub const ROW_NUMBER_WIDTH: u32 = 64;

/// Header label of the row-number column.
pub const ROW_NUMBER_LABEL: &str = "Sl. No";

/// What a renderer puts into a body cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CellContent {
    /// Plain text.
    Text(String),
    /// Text drawn in a semantic color, e.g. a status badge.
    Styled { text: String, tone: Tone },
    /// An embedded control. Clicking it emits
    /// [`TableEvent::Action`](super::TableEvent::Action) instead of a row
    /// activation.
    Action { label: String, id: String },
}

impl CellContent {
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(text.into())
    }

    pub fn styled(text: impl Into<String>, tone: Tone) -> Self {
        Self::Styled {
            text: text.into(),
            tone,
        }
    }

    pub fn action(label: impl Into<String>, id: impl Into<String>) -> Self {
        Self::Action {
            label: label.into(),
            id: id.into(),
        }
    }

    /// Text as drawn in the cell.
    pub fn display(&self) -> String {
        match self {
            Self::Text(text) | Self::Styled { text, .. } => text.clone(),
            Self::Action { label, .. } => format!("[{}]", label),
        }
    }
}

/// Pure cell renderer.
pub type Renderer<R> = Arc<dyn Fn(&R) -> CellContent + Send + Sync>;

/// Describes one column of a [`Table`](super::Table).
pub struct Column<R> {
    key: String,
    label: String,
    width: u32,
    sortable: bool,
    renderer: Option<Renderer<R>>,
}

impl<R> Column<R> {
    pub fn new(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            width: DEFAULT_COLUMN_WIDTH,
            sortable: true,
            renderer: None,
        }
    }

    /// Initial width in display units.
    pub fn width(mut self, width: u32) -> Self {
        self.width = width;
        self
    }

    /// Disables the sort affordance for this column.
    pub fn unsortable(mut self) -> Self {
        self.sortable = false;
        self
    }

    /// Renders cells with `render` instead of the raw field value.
    pub fn render(mut self, render: impl Fn(&R) -> CellContent + Send + Sync + 'static) -> Self {
        self.renderer = Some(Arc::new(render));
        self
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn initial_width(&self) -> u32 {
        self.width
    }

    pub fn is_sortable(&self) -> bool {
        self.sortable
    }
}

impl<R: TableRow> Column<R> {
    /// Cell content for `row`.
    pub fn cell(&self, row: &R) -> CellContent {
        match &self.renderer {
            Some(render) => render(row),
            None => CellContent::Text(row.field(&self.key).to_string()),
        }
    }
}

impl<R> Clone for Column<R> {
    fn clone(&self) -> Self {
        Self {
            key: self.key.clone(),
            label: self.label.clone(),
            width: self.width,
            sortable: self.sortable,
            renderer: self.renderer.clone(),
        }
    }
}

impl<R> fmt::Debug for Column<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Column")
            .field("key", &self.key)
            .field("label", &self.label)
            .field("width", &self.width)
            .field("sortable", &self.sortable)
            .field("custom_renderer", &self.renderer.is_some())
            .finish()
    }
}

/// User-controlled state of one column.
///
/// Position in the table's state list is the column order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnState {
    pub key: String,
    pub visible: bool,
    /// Set by drag-resize; wins over the descriptor width.
    pub width_override: Option<u32>,
}

impl ColumnState {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            visible: true,
            width_override: None,
        }
    }
}

/// Drops later descriptors that repeat a key.
pub(crate) fn dedupe<R>(columns: Vec<Column<R>>) -> Vec<Column<R>> {
    let mut seen = HashSet::new();
    columns
        .into_iter()
        .filter(|column| {
            let fresh = seen.insert(column.key.clone());
            if !fresh {
                warn!("dropping duplicate table column {:?}", column.key);
            }
            fresh
        })
        .collect()
}

/// Merges runtime state with a new descriptor set by key.
///
/// Surviving keys keep their order, visibility and width override; new keys
/// are appended visible in descriptor order; removed keys are dropped.
pub(crate) fn reconcile<R>(state: &[ColumnState], columns: &[Column<R>]) -> Vec<ColumnState> {
    let incoming: HashSet<&str> = columns.iter().map(|c| c.key.as_str()).collect();

    let mut merged: Vec<ColumnState> = state
        .iter()
        .filter(|s| incoming.contains(s.key.as_str()))
        .cloned()
        .collect();

    for column in columns {
        if !merged.iter().any(|s| s.key == column.key) {
            merged.push(ColumnState::new(&column.key));
        }
    }

    merged
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;
    use crate::components::table::Value;

    type Row = BTreeMap<String, Value>;

    fn cols(keys: &[&str]) -> Vec<Column<Row>> {
        keys.iter().map(|k| Column::new(*k, k.to_uppercase())).collect()
    }

    #[test]
    fn test_defaults() {
        let column: Column<Row> = Column::new("name", "Name");
        assert_eq!(column.initial_width(), DEFAULT_COLUMN_WIDTH);
        assert!(column.is_sortable());
    }

    #[test]
    fn test_default_cell_is_raw_field() {
        let column: Column<Row> = Column::new("n", "N");
        let row: Row = [("n".to_string(), Value::Int(7))].into_iter().collect();
        assert_eq!(column.cell(&row), CellContent::text("7"));
    }

    #[test]
    fn test_dedupe_keeps_first() {
        let mut columns = cols(&["a", "b"]);
        columns.push(Column::new("a", "Second A"));
        let columns = dedupe(columns);
        assert_eq!(columns.len(), 2);
        assert_eq!(columns[0].label(), "A");
    }

    #[test]
    fn test_reconcile_from_empty_seeds_in_order() {
        let state = reconcile(&[], &cols(&["a", "b", "c"]));
        let keys: Vec<&str> = state.iter().map(|s| s.key.as_str()).collect();
        assert_eq!(keys, vec!["a", "b", "c"]);
        assert!(state.iter().all(|s| s.visible && s.width_override.is_none()));
    }

    #[test]
    fn test_reconcile_keeps_overrides() {
        let mut state = reconcile(&[], &cols(&["a", "b", "c"]));
        state.swap(0, 1);
        state[0].visible = false;
        state[2].width_override = Some(90);

        let merged = reconcile(&state, &cols(&["c", "a", "d"]));
        let keys: Vec<&str> = merged.iter().map(|s| s.key.as_str()).collect();
        assert_eq!(keys, vec!["a", "c", "d"]);
        assert_eq!(merged[1].width_override, Some(90));
        assert!(merged[2].visible);
    }

    #[test]
    fn test_action_display() {
        assert_eq!(CellContent::action("Logs", "logs").display(), "[Logs]");
    }
}
