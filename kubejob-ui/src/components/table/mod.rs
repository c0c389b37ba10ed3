//! Configurable table.
//!
//! Given column descriptors and a row snapshot the table renders an
//! ordered, sortable, resizable grid whose columns the user can hide and
//! reorder through a configuration panel. It knows nothing about where rows
//! come from; interactions the parent cares about are queued as
//! [`TableEvent`]s.
//!
//! - Sorting is single-key and cycles ascending, descending, unsorted. It
//!   compares raw [`Value`]s from [`TableRow::field`], never rendered text,
//!   and is stable in both directions.
//! - Hidden columns keep their position and width.
//! - Resize drags capture the pointer: drag and release events go to the
//!   table wherever they happen, and release always ends the drag.
//!
//! # Example
//!
//! ```ignore
//! use kubejob_ui::components::table::{CellContent, Column, Table};
//!
//! let mut table = Table::new(vec![
//!     Column::new("name", "Job Name").width(200),
//!     Column::new("status", "Status").render(|job: &Job| {
//!         CellContent::styled(&job.status, Tone::Info)
//!     }),
//!     Column::new("actions", "Actions")
//!         .unsortable()
//!         .render(|_| CellContent::action("Logs", "logs")),
//! ])
//! .empty_text("No active jobs");
//!
//! table.set_rows(jobs);
//! ```

mod column;
mod events;
mod panel;
mod render;
mod resize;
mod sort;
mod state;
mod value;

pub use column::CellContent;
pub use column::Column;
pub use column::ColumnState;
pub use column::DEFAULT_COLUMN_WIDTH;
pub use column::MIN_COLUMN_WIDTH;
pub use column::ROW_NUMBER_LABEL;
pub use column::ROW_NUMBER_WIDTH;
pub use column::Renderer;
pub use panel::PANEL_TITLE;
pub use sort::SortDirection;
pub use sort::SortState;
pub use sort::next_sort;
pub use sort::sorted_order;
pub use state::BodyLayout;
pub use state::DEFAULT_EMPTY_TEXT;
pub use state::HeaderCell;
pub use state::MoveDirection;
pub use state::Table;
pub use state::TableEvent;
pub use value::TableRow;
pub use value::Value;
