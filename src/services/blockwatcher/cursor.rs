//! Last fully processed block height of the polling engine.

use std::ops::RangeInclusive;

/// What a cycle should do given the node's current height.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CursorPlan {
	/// First successful cycle: adopt the height, scan nothing.
	Initialize,
	/// Scan these blocks in increasing order.
	Range(RangeInclusive<u64>),
	/// The node reports the height already processed.
	UpToDate,
	/// The node reports a height below the cursor.
	Behind { cursor: u64 },
}

/// Owned exclusively by the polling engine and never persisted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PollCursor {
	last_processed: Option<u64>,
}

impl PollCursor {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn starting_at(height: u64) -> Self {
		Self {
			last_processed: Some(height),
		}
	}

	pub fn last_processed(&self) -> Option<u64> {
		self.last_processed
	}

	pub fn plan(&self, height: u64) -> CursorPlan {
		match self.last_processed {
			None => CursorPlan::Initialize,
			Some(cursor) if height > cursor => CursorPlan::Range(cursor + 1..=height),
			Some(cursor) if height == cursor => CursorPlan::UpToDate,
			Some(cursor) => CursorPlan::Behind { cursor },
		}
	}

	/// Moves the cursor to `height`. It never moves backwards.
	pub fn advance(&mut self, height: u64) {
		self.last_processed = Some(match self.last_processed {
			Some(cursor) => cursor.max(height),
			None => height,
		});
	}
}
