//! Polling engine.
//!
//! Every period the engine reads the node height, scans each new block for every
//! watched address, stores matches and hands them to the notifier. Lookups that keep
//! failing are dropped for that block; the cursor still advances so that every block
//! is attempted exactly once.

use futures::{stream, StreamExt};
use std::{ops::AddAssign, sync::Arc};
use tokio::{
	sync::watch,
	task::JoinHandle,
	time::{Instant, MissedTickBehavior},
};
use tracing::instrument;

use crate::{
	models::PollerConfig,
	repositories::{SubscriptionRepositoryTrait, TransactionRepositoryTrait},
	services::{
		blockchain::{BlockChainError, ChainClient},
		blockwatcher::{
			cursor::{CursorPlan, PollCursor},
			error::BlockWatcherError,
		},
		notification::TransactionNotifier,
	},
	utils::metrics::{
		ADDRESS_LOOKUP_FAILURES, BLOCKS_PROCESSED, LAST_PROCESSED_BLOCK, NOTIFICATION_FAILURES,
		POLL_CYCLES, POLL_CYCLES_SKIPPED, SUBSCRIPTIONS, TRANSACTIONS_MATCHED,
	},
};

/// Outcome of one polling cycle.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CycleReport {
	/// Height reported by the node at the start of the cycle.
	pub height: u64,
	pub blocks_processed: u64,
	pub transactions_matched: u64,
	/// Address lookups abandoned after the retry policy gave up.
	pub failed_lookups: u64,
	pub failed_notifications: u64,
}

#[derive(Debug, Default)]
struct LookupReport {
	matched: u64,
	failed_lookups: u64,
	failed_notifications: u64,
}

impl AddAssign<LookupReport> for CycleReport {
	fn add_assign(&mut self, lookup: LookupReport) {
		self.transactions_matched += lookup.matched;
		self.failed_lookups += lookup.failed_lookups;
		self.failed_notifications += lookup.failed_notifications;
	}
}

/// Handle to a running engine task.
pub struct BlockWatcherHandle {
	shutdown: watch::Sender<bool>,
	task: JoinHandle<()>,
}

impl BlockWatcherHandle {
	/// Signals the task and waits for it. A cycle in progress finishes first.
	pub async fn stop(self) -> Result<(), BlockWatcherError> {
		// The receiver is gone only if the task already exited.
		let _ = self.shutdown.send(true);
		self.task.await.map_err(|e| {
			BlockWatcherError::scheduler_error(
				"Block watcher task did not shut down cleanly",
				Some(Box::new(e)),
				None,
			)
		})
	}

	pub fn is_finished(&self) -> bool {
		self.task.is_finished()
	}
}

pub struct BlockWatcherService<C: ?Sized, S: ?Sized, T: ?Sized, N: ?Sized> {
	client: Arc<C>,
	subscriptions: Arc<S>,
	transactions: Arc<T>,
	notifier: Arc<N>,
	config: PollerConfig,
	/// Where matches are delivered; matches are only stored when unset.
	sink_url: Option<String>,
	cursor: PollCursor,
}

impl<C, S, T, N> BlockWatcherService<C, S, T, N>
where
	C: ChainClient + ?Sized + 'static,
	S: SubscriptionRepositoryTrait + ?Sized + 'static,
	T: TransactionRepositoryTrait + ?Sized + 'static,
	N: TransactionNotifier + ?Sized + 'static,
{
	pub fn new(
		client: Arc<C>,
		subscriptions: Arc<S>,
		transactions: Arc<T>,
		notifier: Arc<N>,
		config: PollerConfig,
		sink_url: Option<String>,
	) -> Self {
		Self {
			client,
			subscriptions,
			transactions,
			notifier,
			config,
			sink_url,
			cursor: PollCursor::new(),
		}
	}

	/// Last fully processed height, `None` until the first successful cycle.
	pub fn cursor(&self) -> Option<u64> {
		self.cursor.last_processed()
	}

	/// Runs one cycle.
	///
	/// Fails only when the height query fails, in which case nothing was processed and
	/// the cursor is unchanged.
	#[instrument(skip(self))]
	pub async fn process_new_blocks(&mut self) -> Result<CycleReport, BlockWatcherError> {
		POLL_CYCLES.inc();
		let deadline = Instant::now() + self.config.cycle_timeout();

		let height = match self.client.current_height().await {
			Ok(height) => height,
			Err(e) => {
				POLL_CYCLES_SKIPPED.inc();
				return Err(BlockWatcherError::network_error(
					"Failed to get current block height, skipping cycle",
					Some(Box::new(e)),
					None,
				));
			}
		};

		let mut report = CycleReport {
			height,
			..CycleReport::default()
		};

		match self.cursor.plan(height) {
			CursorPlan::Initialize => {
				tracing::info!(height, "Starting from current block, earlier blocks are not scanned");
			}
			CursorPlan::UpToDate => {
				tracing::debug!(height, "No new blocks");
			}
			CursorPlan::Behind { cursor } => {
				tracing::warn!(height, cursor, "Node reports a height below the last processed block");
			}
			CursorPlan::Range(blocks) => {
				for block_number in blocks {
					self.process_block(block_number, deadline, &mut report).await;
				}
			}
		}

		self.cursor.advance(height);
		if let Some(cursor) = self.cursor.last_processed() {
			LAST_PROCESSED_BLOCK.set(i64::try_from(cursor).unwrap_or(i64::MAX));
		}

		Ok(report)
	}

	async fn process_block(&self, block_number: u64, deadline: Instant, report: &mut CycleReport) {
		// New subscriptions apply from the next block on.
		let addresses = self.subscriptions.snapshot().await;
		SUBSCRIPTIONS.set(addresses.len() as i64);

		let lookups: Vec<LookupReport> = stream::iter(addresses)
			.map(|address| self.process_address(address, block_number, deadline))
			.buffer_unordered(self.config.max_concurrent_lookups.max(1))
			.collect()
			.await;

		for lookup in lookups {
			*report += lookup;
		}
		report.blocks_processed += 1;
		BLOCKS_PROCESSED.inc();

		tracing::debug!(block_number, "Processed block");
	}

	async fn process_address(
		&self,
		address: String,
		block_number: u64,
		deadline: Instant,
	) -> LookupReport {
		let mut report = LookupReport::default();

		let lookup = self
			.config
			.retry
			.execute(
				|| self.client.transactions_for_address(&address, block_number),
				BlockChainError::is_retryable,
				Some(deadline),
			)
			.await;

		let transactions = match lookup {
			Ok(transactions) => transactions,
			Err(e) => {
				tracing::error!(
					address = %address,
					block_number,
					error = %e,
					"Giving up on address lookup"
				);
				ADDRESS_LOOKUP_FAILURES.inc();
				report.failed_lookups += 1;
				return report;
			}
		};

		for transaction in transactions {
			self.transactions.append(&address, transaction.clone()).await;
			TRANSACTIONS_MATCHED.inc();
			report.matched += 1;

			tracing::info!(
				address = %address,
				block_number,
				hash = transaction.hash(),
				"Matched transaction"
			);

			let Some(sink_url) = &self.sink_url else {
				continue;
			};
			if let Err(e) = self.notifier.notify(&transaction, &address, sink_url).await {
				tracing::warn!(
					address = %address,
					hash = transaction.hash(),
					error = %e,
					"Notification failed"
				);
				NOTIFICATION_FAILURES.inc();
				report.failed_notifications += 1;
			}
		}

		report
	}

	/// Polls every period until `shutdown` turns `true` or its sender is dropped.
	///
	/// The first cycle runs one period after the call. Cycles never overlap: a cycle
	/// that overruns delays the next tick instead of queueing more.
	pub async fn run(mut self, mut shutdown: watch::Receiver<bool>) {
		let period = self.config.interval();
		let mut ticker = tokio::time::interval_at(Instant::now() + period, period);
		ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

		tracing::info!(interval_ms = self.config.interval_ms, "Started block watcher");

		loop {
			tokio::select! {
				biased;
				changed = shutdown.changed() => {
					if changed.is_err() || *shutdown.borrow() {
						break;
					}
				}
				_ = ticker.tick() => {
					match self.process_new_blocks().await {
						Ok(report) => tracing::info!(
							height = report.height,
							blocks = report.blocks_processed,
							matched = report.transactions_matched,
							failed_lookups = report.failed_lookups,
							failed_notifications = report.failed_notifications,
							"Polling cycle complete"
						),
						Err(e) => tracing::warn!(error = %e, "Polling cycle skipped"),
					}
				}
			}
		}

		tracing::info!(cursor = ?self.cursor(), "Stopped block watcher");
	}

	/// Spawns [`run`](Self::run) on the current runtime.
	pub fn start(self) -> BlockWatcherHandle {
		let (shutdown, receiver) = watch::channel(false);
		let task = tokio::spawn(self.run(receiver));
		BlockWatcherHandle { shutdown, task }
	}
}
