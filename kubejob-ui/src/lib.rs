//! Terminal widgets for the KubeJob dashboard.
//!
//! The primitives (cell [`buffer`], [`rect`], [`style`], [`text`] width
//! helpers, input [`event`]s and the [`terminal`] guard) are deliberately
//! small: every frame is drawn into a [`Buffer`] and only the changed cells
//! are written out.
//!
//! The interesting parts live in [`components`]: the configurable
//! [`Table`](components::table::Table) and the
//! [`LogView`](components::log_view::LogView) with its pure line pipeline.

pub mod buffer;
pub mod components;
pub mod event;
pub mod rect;
pub mod style;
pub mod terminal;
pub mod text;

pub use buffer::Buffer;
pub use buffer::Cell;
pub use rect::Rect;
pub use style::Rgb;
pub use style::Style;
pub use style::TextStyle;
pub use style::Theme;
pub use style::Tone;

/// Display units per terminal cell.
///
/// Widths are configured in abstract display units (pixel equivalents) and
/// mapped onto cells when drawn.
pub const CELL_UNITS: u32 = 8;

/// Converts a width in display units to whole cells, never less than one.
pub fn units_to_cells(units: u32) -> u16 {
    (units / CELL_UNITS).clamp(1, u16::MAX as u32) as u16
}
