//! Drag-resize of column widths.
//!
//! Positions are in display units so the width math is independent of the
//! cell size; the pointer handlers scale screen columns by
//! [`CELL_UNITS`](crate::CELL_UNITS).

use log::debug;

use super::column::MIN_COLUMN_WIDTH;
use super::state::Table;
use super::value::TableRow;

/// An in-progress resize drag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ResizeDrag {
    key: String,
    start_x: i32,
    start_width: u32,
}

impl ResizeDrag {
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Width for a pointer at `x`, never below the minimum.
    fn width_at(&self, x: i32) -> u32 {
        let width = self.start_width as i64 + (x as i64 - self.start_x as i64);
        width.max(MIN_COLUMN_WIDTH as i64) as u32
    }
}

impl<R: TableRow> Table<R> {
    /// Starts resizing `key` from pointer position `x`.
    ///
    /// Returns `false` for unknown or hidden columns.
    pub fn begin_resize(&mut self, key: &str, x: i32) -> bool {
        let visible = self.state.iter().any(|s| s.key == key && s.visible);
        let Some(start_width) = self.effective_width(key).filter(|_| visible) else {
            return false;
        };
        debug!("resize {} from {}", key, start_width);
        self.resize = Some(ResizeDrag {
            key: key.to_string(),
            start_x: x,
            start_width,
        });
        true
    }

    /// Moves the active drag to `x`. Only the dragged column changes.
    pub fn resize_to(&mut self, x: i32) {
        let Some(drag) = &self.resize else {
            return;
        };
        let width = drag.width_at(x);
        if let Some(state) = self.state.iter_mut().find(|s| s.key == drag.key) {
            state.width_override = Some(width);
        }
    }

    /// Ends the active drag, if any.
    pub fn end_resize(&mut self) {
        if let Some(drag) = self.resize.take() {
            debug!("resize {} done", drag.key);
        }
    }

    pub fn is_resizing(&self) -> bool {
        self.resize.is_some()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;
    use crate::components::table::Column;
    use crate::components::table::Value;

    type Row = BTreeMap<String, Value>;

    fn table() -> Table<Row> {
        Table::new(vec![Column::new("a", "A"), Column::new("b", "B").width(120)])
    }

    #[test]
    fn test_grow_and_clamp() {
        let mut t = table();
        assert!(t.begin_resize("a", 100));
        t.resize_to(140);
        assert_eq!(t.effective_width("a"), Some(190));
        t.resize_to(-100);
        assert_eq!(t.effective_width("a"), Some(50));
        t.end_resize();
        assert!(!t.is_resizing());
        assert_eq!(t.effective_width("b"), Some(120));
    }

    #[test]
    fn test_resize_without_drag_is_noop() {
        let mut t = table();
        t.resize_to(500);
        assert_eq!(t.effective_width("a"), Some(150));
    }

    #[test]
    fn test_second_drag_starts_from_override() {
        let mut t = table();
        t.begin_resize("b", 0);
        t.resize_to(30);
        t.end_resize();
        t.begin_resize("b", 10);
        t.resize_to(0);
        assert_eq!(t.effective_width("b"), Some(140));
    }

    #[test]
    fn test_hidden_column_cannot_resize() {
        let mut t = table();
        t.toggle_visibility("a");
        assert!(!t.begin_resize("a", 0));
    }
}
