use crate::error::{Result, ValhookError};

/// Running totals for one validation pass.
///
/// Validation batches are not guaranteed to share a size (the last one is
/// usually short), so per-batch statistics are weighted by the number of
/// samples they cover before being summed. All derived values are NaN while
/// no samples have been fed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Accumulator {
	samples_seen: u64,
	incorrect_count: u64,
	cost_sum: f64,
}

impl Accumulator {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn reset(&mut self) {
		*self = Self::default();
	}

	/// Records `incorrect_in_batch` wrong predictions out of `batch_size` samples.
	///
	/// On error the totals are left untouched.
	pub fn feed(&mut self, incorrect_in_batch: u64, batch_size: u64) -> Result<()> {
		check_batch(incorrect_in_batch, batch_size)?;
		self.samples_seen += batch_size;
		self.incorrect_count += incorrect_in_batch;
		Ok(())
	}

	/// Adds a batch's mean cost, scaled back up to a batch total.
	///
	/// Only the cost sum changes; pair every call with a `feed` for the same
	/// batch so that `mean_cost` divides by the right sample count.
	pub fn feed_cost(&mut self, batch_mean_cost: f64, batch_size: u64) {
		self.cost_sum += batch_mean_cost * batch_size as f64;
	}

	/// `feed` and `feed_cost` for one batch, validated before either total moves.
	pub fn feed_batch(&mut self, incorrect_in_batch: u64, batch_mean_cost: f64, batch_size: u64) -> Result<()> {
		self.feed(incorrect_in_batch, batch_size)?;
		self.feed_cost(batch_mean_cost, batch_size);
		Ok(())
	}

	/// Folds another partial accumulator into this one.
	pub fn merge(&mut self, other: &Accumulator) {
		self.samples_seen += other.samples_seen;
		self.incorrect_count += other.incorrect_count;
		self.cost_sum += other.cost_sum;
	}

	pub fn samples_seen(&self) -> u64 {
		self.samples_seen
	}

	pub fn incorrect_count(&self) -> u64 {
		self.incorrect_count
	}

	pub fn cost_sum(&self) -> f64 {
		self.cost_sum
	}

	pub fn is_empty(&self) -> bool {
		self.samples_seen == 0
	}

	pub fn error_rate(&self) -> f64 {
		if self.is_empty() {
			return f64::NAN;
		}
		self.incorrect_count as f64 / self.samples_seen as f64
	}

	pub fn accuracy(&self) -> f64 {
		if self.is_empty() {
			return f64::NAN;
		}
		1.0 - self.error_rate()
	}

	pub fn mean_cost(&self) -> f64 {
		if self.is_empty() {
			return f64::NAN;
		}
		self.cost_sum / self.samples_seen as f64
	}
}

fn check_batch(incorrect_in_batch: u64, batch_size: u64) -> Result<()> {
	if batch_size == 0 {
		return Err(ValhookError::InvariantViolation(
			"Batch size must be greater than 0".into(),
		));
	}
	if incorrect_in_batch > batch_size {
		return Err(ValhookError::InvariantViolation(format!(
			"Incorrect count ({}) exceeds batch size ({})",
			incorrect_in_batch, batch_size
		)));
	}
	Ok(())
}
