//! Prometheus metrics.
//!
//! All metrics live in one process-wide [`REGISTRY`]. Engine counters are updated by
//! the polling engine as it runs, system gauges are refreshed on every scrape.

pub mod server;

use lazy_static::lazy_static;
use prometheus::{Encoder, Gauge, IntCounter, IntGauge, Registry, TextEncoder};
use sysinfo::{Disks, System};

fn register<M>(metric: prometheus::Result<M>) -> M
where
	M: prometheus::core::Collector + Clone + 'static,
{
	let metric = metric.expect("static metric definitions are valid");
	if let Err(e) = REGISTRY.register(Box::new(metric.clone())) {
		tracing::warn!(error = %e, "Failed to register metric");
	}
	metric
}

lazy_static! {
	pub static ref REGISTRY: Registry = Registry::new();

	/// Polling cycles started, including skipped ones.
	pub static ref POLL_CYCLES: IntCounter = register(IntCounter::new(
		"poll_cycles_total",
		"Number of polling cycles started"
	));

	/// Cycles abandoned because the current height could not be read.
	pub static ref POLL_CYCLES_SKIPPED: IntCounter = register(IntCounter::new(
		"poll_cycles_skipped_total",
		"Number of polling cycles skipped after a failed height query"
	));

	pub static ref BLOCKS_PROCESSED: IntCounter = register(IntCounter::new(
		"blocks_processed_total",
		"Number of blocks scanned for watched addresses"
	));

	pub static ref TRANSACTIONS_MATCHED: IntCounter = register(IntCounter::new(
		"transactions_matched_total",
		"Number of transactions stored for a watched address"
	));

	/// Address lookups that failed on every attempt.
	pub static ref ADDRESS_LOOKUP_FAILURES: IntCounter = register(IntCounter::new(
		"address_lookup_failures_total",
		"Number of address lookups abandoned after exhausting retries"
	));

	pub static ref NOTIFICATION_FAILURES: IntCounter = register(IntCounter::new(
		"notification_failures_total",
		"Number of webhook deliveries that failed"
	));

	pub static ref LAST_PROCESSED_BLOCK: IntGauge = register(IntGauge::new(
		"last_processed_block",
		"Height of the last fully processed block"
	));

	pub static ref SUBSCRIPTIONS: IntGauge = register(IntGauge::new(
		"subscriptions",
		"Number of watched addresses"
	));

	pub static ref CPU_USAGE: Gauge = register(Gauge::new(
		"cpu_usage_percentage",
		"Current CPU usage percentage"
	));

	pub static ref MEMORY_USAGE: Gauge = register(Gauge::new(
		"memory_usage_bytes",
		"Memory usage in bytes"
	));

	pub static ref MEMORY_USAGE_PERCENT: Gauge = register(Gauge::new(
		"memory_usage_percentage",
		"Memory usage percentage"
	));

	pub static ref DISK_USAGE_PERCENT: Gauge = register(Gauge::new(
		"disk_usage_percentage",
		"Disk usage percentage"
	));
}

/// Registers every metric so that scrapes list them before their first update.
pub fn init_metrics() {
	lazy_static::initialize(&POLL_CYCLES);
	lazy_static::initialize(&POLL_CYCLES_SKIPPED);
	lazy_static::initialize(&BLOCKS_PROCESSED);
	lazy_static::initialize(&TRANSACTIONS_MATCHED);
	lazy_static::initialize(&ADDRESS_LOOKUP_FAILURES);
	lazy_static::initialize(&NOTIFICATION_FAILURES);
	lazy_static::initialize(&LAST_PROCESSED_BLOCK);
	lazy_static::initialize(&SUBSCRIPTIONS);
	lazy_static::initialize(&CPU_USAGE);
	lazy_static::initialize(&MEMORY_USAGE);
	lazy_static::initialize(&MEMORY_USAGE_PERCENT);
	lazy_static::initialize(&DISK_USAGE_PERCENT);
}

/// Encodes every registered metric in the Prometheus text format.
pub fn gather_metrics() -> Result<Vec<u8>, Box<dyn std::error::Error>> {
	let mut buffer = Vec::new();
	TextEncoder::new().encode(&REGISTRY.gather(), &mut buffer)?;
	Ok(buffer)
}

pub fn update_system_metrics() {
	let mut sys = System::new_all();
	sys.refresh_all();

	CPU_USAGE.set(sys.global_cpu_usage() as f64);

	let total_memory = sys.total_memory();
	let used_memory = sys.used_memory();
	MEMORY_USAGE.set(used_memory as f64);
	MEMORY_USAGE_PERCENT.set(percentage(used_memory, total_memory));

	let disks = Disks::new_with_refreshed_list();
	let (total, available) = disks.list().iter().fold((0u64, 0u64), |(t, a), disk| {
		(t + disk.total_space(), a + disk.available_space())
	});
	DISK_USAGE_PERCENT.set(percentage(total.saturating_sub(available), total));
}

fn percentage(part: u64, total: u64) -> f64 {
	if total == 0 {
		0.0
	} else {
		part as f64 / total as f64 * 100.0
	}
}
