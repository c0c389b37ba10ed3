//! Interactive components.
//!
//! Components own their presentation state, draw themselves into a
//! [`Buffer`](crate::Buffer) and handle input through [`Component`]. Anything
//! the parent must react to is queued inside the component and drained by
//! the parent after dispatch, so handlers never call back into their owner.

pub mod log_view;
pub mod modal;
pub mod table;
pub mod text_input;

use crate::event::KeyCombo;
use crate::event::ScrollDirection;

/// Result of handling an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventResult {
    /// Event was ignored, try other handlers.
    Ignored,
    /// Event was consumed, stop propagation.
    Consumed,
    /// Event started a drag; route drag and release events here until it ends.
    StartDrag,
}

impl EventResult {
    /// Check if the event was handled (consumed or started drag).
    pub fn is_handled(&self) -> bool {
        !matches!(self, EventResult::Ignored)
    }
}

/// Input handling for components.
///
/// Positions are absolute screen cells; components hit-test against the
/// geometry recorded during their last render. All methods default to
/// [`EventResult::Ignored`].
pub trait Component {
    /// Primary button pressed at `(x, y)`.
    fn on_press(&mut self, _x: u16, _y: u16) -> EventResult {
        EventResult::Ignored
    }

    /// Pointer dragged after this component returned [`EventResult::StartDrag`].
    fn on_drag(&mut self, _x: u16, _y: u16) -> EventResult {
        EventResult::Ignored
    }

    /// Button released, wherever it happens on screen.
    fn on_release(&mut self, _x: u16, _y: u16) -> EventResult {
        EventResult::Ignored
    }

    /// Wheel scroll over the component.
    fn on_scroll(&mut self, _direction: ScrollDirection, _amount: u16) -> EventResult {
        EventResult::Ignored
    }

    /// Key press while the component has focus.
    fn on_key(&mut self, _key: &KeyCombo) -> EventResult {
        EventResult::Ignored
    }
}
