//! Tracing subscriber setup.
//!
//! Logging is configured from the environment so that CLI flags, `.env` files and
//! container settings all funnel through the same variables:
//!
//! - `LOG_MODE`: `stdout` (default) or `file`
//! - `LOG_LEVEL`: `trace`, `debug`, `info` (default), `warn` or `error`
//! - `LOG_DATA_DIR`: directory for log files, `logs/` by default
//! - `LOG_MAX_SIZE`: size in bytes after which a new log file is started, 1 GB by default

pub mod error;

use chrono::Utc;
use lazy_static::lazy_static;
use regex::Regex;
use std::{
	env,
	fs::{create_dir_all, metadata},
	path::{Path, PathBuf},
};
use tracing::{info, Subscriber};
use tracing_subscriber::{
	filter::EnvFilter,
	fmt::{self, format::Writer, FmtContext, FormatEvent, FormatFields},
	prelude::*,
	registry::LookupSpan,
};

const LOG_FILE_NAME: &str = "address-monitor.log";
const DEFAULT_LOG_DIR: &str = "logs/";
const DEFAULT_MAX_SIZE: u64 = 1_073_741_824;

lazy_static! {
	static ref ANSI_ESCAPE: Option<Regex> = Regex::new(r"\x1b\[[0-9;]*[a-zA-Z]").ok();
}

/// Where log lines are written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogMode {
	Stdout,
	File,
}

/// Resolved logging settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggingConfig {
	pub mode: LogMode,
	pub level: tracing::Level,
	pub dir: PathBuf,
	pub max_size: u64,
}

impl Default for LoggingConfig {
	fn default() -> Self {
		Self {
			mode: LogMode::Stdout,
			level: tracing::Level::INFO,
			dir: PathBuf::from(DEFAULT_LOG_DIR),
			max_size: DEFAULT_MAX_SIZE,
		}
	}
}

impl LoggingConfig {
	/// Reads the `LOG_*` variables. Unknown levels fall back to `info`.
	pub fn from_env() -> Result<Self, String> {
		let mode = match env::var("LOG_MODE") {
			Ok(mode) if mode.eq_ignore_ascii_case("file") => LogMode::File,
			_ => LogMode::Stdout,
		};

		let level = env::var("LOG_LEVEL")
			.ok()
			.and_then(|level| level.parse::<tracing::Level>().ok())
			.unwrap_or(tracing::Level::INFO);

		let dir = env::var("LOG_DATA_DIR")
			.map(PathBuf::from)
			.unwrap_or_else(|_| PathBuf::from(DEFAULT_LOG_DIR));

		let max_size = match env::var("LOG_MAX_SIZE") {
			Ok(raw) => raw
				.parse::<u64>()
				.map_err(|e| format!("LOG_MAX_SIZE must be a number of bytes, got '{}': {}", raw, e))?,
			Err(_) => DEFAULT_MAX_SIZE,
		};

		Ok(Self {
			mode,
			level,
			dir,
			max_size,
		})
	}
}

/// Event formatter that removes colour codes written by the wrapped formatter.
struct StripAnsiFormatter<T> {
	inner: T,
}

impl<S, N, T> FormatEvent<S, N> for StripAnsiFormatter<T>
where
	S: Subscriber + for<'a> LookupSpan<'a>,
	N: for<'a> FormatFields<'a> + 'static,
	T: FormatEvent<S, N>,
{
	fn format_event(
		&self,
		ctx: &FmtContext<'_, S, N>,
		mut writer: Writer<'_>,
		event: &tracing::Event<'_>,
	) -> std::fmt::Result {
		let mut buf = String::new();
		self.inner.format_event(ctx, Writer::new(&mut buf), event)?;
		write!(writer, "{}", strip_ansi_escapes(&buf))
	}
}

fn strip_ansi_escapes(s: &str) -> String {
	match ANSI_ESCAPE.as_ref() {
		Some(re) => re.replace_all(s, "").into_owned(),
		None => s.to_string(),
	}
}

/// Path of the `index`-th log file for `date`, e.g. `logs/address-monitor-2025-01-01.1.log`.
pub fn rolled_log_path(base: &Path, date: &str, index: u32) -> PathBuf {
	let stem = base
		.file_stem()
		.map(|stem| stem.to_string_lossy().into_owned())
		.unwrap_or_else(|| "log".to_string());
	base.with_file_name(format!("{}-{}.{}.log", stem, date, index))
}

/// Returns the first log file for `date` that is missing or not larger than `max_size`.
pub fn select_log_file(base: &Path, date: &str, max_size: u64) -> PathBuf {
	let mut index = 1;
	loop {
		let candidate = rolled_log_path(base, date, index);
		match metadata(&candidate) {
			Ok(meta) if meta.len() > max_size => index += 1,
			_ => return candidate,
		}
	}
}

fn log_format(with_ansi: bool) -> fmt::format::Format<fmt::format::Compact> {
	fmt::format()
		.with_level(true)
		.with_target(true)
		.with_thread_ids(false)
		.with_thread_names(false)
		.with_ansi(with_ansi)
		.compact()
}

/// Installs the global tracing subscriber.
pub fn setup_logging(config: &LoggingConfig) -> Result<(), Box<dyn std::error::Error>> {
	let subscriber = tracing_subscriber::registry().with(EnvFilter::new(config.level.to_string()));

	match config.mode {
		LogMode::File => {
			create_dir_all(&config.dir)?;
			let date = Utc::now().format("%Y-%m-%d").to_string();
			let path = select_log_file(&config.dir.join(LOG_FILE_NAME), &date, config.max_size);
			let file_name = path
				.file_name()
				.ok_or_else(|| format!("Invalid log file path: {}", path.display()))?;
			let appender = tracing_appender::rolling::never(&config.dir, file_name);

			subscriber
				.with(
					fmt::layer()
						.event_format(StripAnsiFormatter {
							inner: log_format(false),
						})
						.with_writer(appender)
						.fmt_fields(fmt::format::PrettyFields::new()),
				)
				.try_init()?;

			info!(path = %path.display(), "Logging to file");
		}
		LogMode::Stdout => {
			subscriber
				.with(
					fmt::layer()
						.event_format(log_format(true))
						.fmt_fields(fmt::format::PrettyFields::new()),
				)
				.try_init()?;
		}
	}

	info!(level = %config.level, "Logging configured");
	Ok(())
}
