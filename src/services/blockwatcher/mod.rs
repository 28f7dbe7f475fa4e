//! Polling engine: periodic block discovery and per-address dispatch.

mod cursor;
mod error;
mod service;

pub use cursor::{CursorPlan, PollCursor};
pub use error::BlockWatcherError;
pub use service::{BlockWatcherHandle, BlockWatcherService, CycleReport};
