//! Sinks for named scalar summaries tagged with a training step.

use crate::error::Result;
use crate::metrics_wrapper;
use serde_derive::{Deserialize, Serialize};
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

/// Receives scalar summaries. Writing is fire-and-forget: implementations
/// report their own failures through the log instead of to the caller.
pub trait SummaryWriter: Send + Sync {
	fn add_summary(&self, name: &str, value: f64, step: u64);

	fn flush(&self) {}
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScalarSummary {
	pub name: String,
	/// `None` when the value was not finite (e.g. an empty validation set).
	pub value: Option<f64>,
	pub step: u64,
	/// Seconds since the Unix epoch.
	pub wall_time: f64,
}

impl ScalarSummary {
	pub fn new(name: &str, value: f64, step: u64) -> Self {
		Self {
			name: name.to_string(),
			value: if value.is_finite() { Some(value) } else { None },
			step,
			wall_time: chrono::Utc::now().timestamp_millis() as f64 / 1000.0,
		}
	}
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
	mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Keeps every summary in memory.
#[derive(Debug, Default)]
pub struct MemorySummaryWriter {
	records: Mutex<Vec<(String, f64, u64)>>,
}

impl MemorySummaryWriter {
	pub fn new() -> Self {
		Self::default()
	}

	/// All recorded `(name, value, step)` triples in arrival order.
	pub fn summaries(&self) -> Vec<(String, f64, u64)> {
		lock(&self.records).clone()
	}

	pub fn values(&self, name: &str) -> Vec<(u64, f64)> {
		lock(&self.records)
			.iter()
			.filter(|(n, _, _)| n == name)
			.map(|(_, value, step)| (*step, *value))
			.collect()
	}

	pub fn latest(&self, name: &str) -> Option<f64> {
		self.values(name).last().map(|(_, value)| *value)
	}

	pub fn len(&self) -> usize {
		lock(&self.records).len()
	}

	pub fn is_empty(&self) -> bool {
		lock(&self.records).is_empty()
	}
}

impl SummaryWriter for MemorySummaryWriter {
	fn add_summary(&self, name: &str, value: f64, step: u64) {
		lock(&self.records).push((name.to_string(), value, step));
	}
}

/// Appends one JSON object per summary to a file.
#[derive(Debug)]
pub struct JsonLinesSummaryWriter {
	path: PathBuf,
	file: Mutex<BufWriter<File>>,
}

impl JsonLinesSummaryWriter {
	pub fn create(path: impl AsRef<Path>) -> Result<Self> {
		let path = path.as_ref().to_path_buf();
		let file = OpenOptions::new().create(true).append(true).open(&path)?;
		Ok(Self {
			path,
			file: Mutex::new(BufWriter::new(file)),
		})
	}

	pub fn path(&self) -> &Path {
		&self.path
	}

	fn write_record(&self, record: &ScalarSummary) -> Result<()> {
		let line = serde_json::to_string(record)?;
		let mut file = lock(&self.file);
		writeln!(file, "{}", line)?;
		Ok(())
	}
}

impl SummaryWriter for JsonLinesSummaryWriter {
	fn add_summary(&self, name: &str, value: f64, step: u64) {
		if let Err(e) = self.write_record(&ScalarSummary::new(name, value, step)) {
			tracing::warn!(path = %self.path.display(), summary = name, error = %e, "Could not write summary");
		}
	}

	fn flush(&self) {
		if let Err(e) = lock(&self.file).flush() {
			tracing::warn!(path = %self.path.display(), error = %e, "Could not flush summaries");
		}
	}
}

impl Drop for JsonLinesSummaryWriter {
	fn drop(&mut self) {
		self.flush();
	}
}

/// Publishes each summary as a gauge named after it.
#[derive(Debug, Default, Clone, Copy)]
pub struct MetricsSummaryWriter;

impl SummaryWriter for MetricsSummaryWriter {
	fn add_summary(&self, name: &str, value: f64, _step: u64) {
		metrics_wrapper::set_gauge(name, value);
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_memory_writer_latest() {
		let writer = MemorySummaryWriter::new();
		writer.add_summary("val_cost", 1.0, 10);
		writer.add_summary("val_error", 0.5, 10);
		writer.add_summary("val_cost", 0.8, 20);

		assert_eq!(writer.len(), 3);
		assert_eq!(writer.values("val_cost"), vec![(10, 1.0), (20, 0.8)]);
		assert_eq!(writer.latest("val_cost"), Some(0.8));
		assert_eq!(writer.latest("missing"), None);
	}

	#[test]
	fn test_non_finite_value_serializes_as_null() {
		let record = ScalarSummary::new("val_error", f64::NAN, 3);
		assert_eq!(record.value, None);
		let json = serde_json::to_string(&record).unwrap();
		assert!(json.contains("\"value\":null"));
	}
}
