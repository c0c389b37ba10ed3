//! Log viewer and its line pipeline.
//!
//! [`process_lines`] is the whole transformation: split, filter, order. The
//! [`LogView`] wraps it with a filter input, a time range selector (which
//! the caller forwards to the log source as `since_minutes`) and a sort
//! toggle.

mod pipeline;
mod view;

pub use pipeline::LogPipeline;
pub use pipeline::process_lines;
pub use view::EMPTY_LOGS_TEXT;
pub use view::FeedStatus;
pub use view::LogView;
pub use view::LogViewEvent;
pub use view::TimeRange;
