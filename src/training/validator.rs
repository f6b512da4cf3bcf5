use crate::config::ValidationConfig;
use crate::constants::{metrics as metric_names, progress};
use crate::error::{Result, ValhookError};
use crate::graph::{self, Feed, Session, TensorHandle};
use crate::metrics_wrapper;
use crate::summary::SummaryWriter;
use crate::training::{Accumulator, Callback, Dataset, PeriodicCallback};
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{info, info_span, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidatorState {
	/// Between passes.
	Idle,
	/// Consuming the dataset.
	Running,
}

/// Outcome of one complete validation pass.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationReport {
	pub step: u64,
	pub batches: usize,
	pub samples: u64,
	pub incorrect: u64,
	pub error_rate: f64,
	pub accuracy: f64,
	pub mean_cost: f64,
	pub elapsed: Duration,
}

impl ValidationReport {
	fn from_accumulator(step: u64, batches: usize, acc: &Accumulator, elapsed: Duration) -> Self {
		Self {
			step,
			batches,
			samples: acc.samples_seen(),
			incorrect: acc.incorrect_count(),
			error_rate: acc.error_rate(),
			accuracy: acc.accuracy(),
			mean_cost: acc.mean_cost(),
			elapsed,
		}
	}
}

/// Handles looked up once in `setup`.
#[derive(Debug, Clone)]
struct ResolvedTensors {
	inputs: Vec<TensorHandle>,
	/// Wrong count then mean cost, fetched together.
	fetches: [TensorHandle; 2],
}

/// Runs a held-out dataset through the graph and reports the error rate and
/// mean cost as `{prefix}_error` and `{prefix}_cost`.
///
/// The fetched cost is taken to be the mean over the batch and is scaled by
/// the batch size before accumulation. A graph that emits batch totals will
/// be over-counted.
pub struct Validator {
	config: ValidationConfig,
	dataset: Box<dyn Dataset>,
	session: Arc<dyn Session>,
	writer: Arc<dyn SummaryWriter>,
	resolved: Option<ResolvedTensors>,
	state: ValidatorState,
	last_report: Option<ValidationReport>,
}

impl Validator {
	pub fn new(
		config: ValidationConfig,
		dataset: Box<dyn Dataset>,
		session: Arc<dyn Session>,
		writer: Arc<dyn SummaryWriter>,
	) -> Result<Self> {
		config.validate()?;
		Ok(Self {
			config,
			dataset,
			session,
			writer,
			resolved: None,
			state: ValidatorState::Idle,
			last_report: None,
		})
	}

	/// Wraps the validator so it fires every `config.period` epochs.
	pub fn into_periodic(self) -> Result<PeriodicCallback<Self>> {
		let period = self.config.period;
		PeriodicCallback::new(self, period)
	}

	pub fn state(&self) -> ValidatorState {
		self.state
	}

	pub fn is_ready(&self) -> bool {
		self.resolved.is_some()
	}

	pub fn last_report(&self) -> Option<&ValidationReport> {
		self.last_report.as_ref()
	}

	/// Resolves the graph inputs and the two fetched outputs.
	///
	/// Called before training starts so that a misspelled output name fails
	/// immediately instead of at the first validation pass.
	pub fn setup(&mut self) -> Result<()> {
		let wrong = self.resolve(&self.config.wrong_output, "wrong-count")?;
		let cost = self.resolve(&self.config.cost_output, "cost")?;
		let inputs = self.session.input_tensors();
		if inputs.is_empty() {
			return Err(ValhookError::Configuration("Graph declares no input tensors".into()));
		}

		info!(
			prefix = %self.config.prefix,
			inputs = inputs.len(),
			wrong = %wrong,
			cost = %cost,
			batches = self.dataset.size(),
			"Validation outputs resolved"
		);
		self.resolved = Some(ResolvedTensors {
			inputs,
			fetches: [wrong, cost],
		});
		Ok(())
	}

	fn resolve(&self, name: &str, role: &str) -> Result<TensorHandle> {
		self.session.get_tensor(name).map_err(|e| {
			ValhookError::Configuration(format!("Cannot resolve {} output '{}': {}", role, name, e))
		})
	}

	/// Runs one full pass over the dataset and emits its summaries.
	///
	/// Any failure aborts the pass; nothing is emitted for it and the next
	/// pass starts from scratch.
	pub fn run_pass(&mut self, global_step: u64) -> Result<ValidationReport> {
		let resolved = self.resolved.clone().ok_or_else(|| {
			ValhookError::Configuration("Validator triggered before setup".into())
		})?;

		let span = info_span!("validation_pass", prefix = %self.config.prefix, step = global_step);
		let _enter = span.enter();

		self.state = ValidatorState::Running;
		let outcome = self.evaluate(&resolved, global_step).map(|report| {
			self.emit(&report);
			report
		});
		self.state = ValidatorState::Idle;

		match outcome {
			Ok(report) => {
				self.last_report = Some(report.clone());
				Ok(report)
			}
			Err(e) => {
				metrics_wrapper::increment_counter(metric_names::PASS_FAILURES_TOTAL, 1);
				warn!(prefix = %self.config.prefix, step = global_step, error = %e, "Validation pass aborted");
				Err(e)
			}
		}
	}

	fn evaluate(&self, resolved: &ResolvedTensors, global_step: u64) -> Result<ValidationReport> {
		let start = Instant::now();
		let mut accumulator = Accumulator::new();
		let pb = self.progress_bar();

		let batches = match self.consume(resolved, &mut accumulator, &pb) {
			Ok(batches) => batches,
			Err(e) => {
				pb.abandon();
				return Err(e);
			}
		};
		pb.finish_and_clear();

		if accumulator.is_empty() {
			warn!(prefix = %self.config.prefix, "Validation dataset produced no samples; reporting NaN");
		}

		let elapsed = start.elapsed();
		metrics_wrapper::increment_counter(metric_names::PASSES_TOTAL, 1);
		metrics_wrapper::record_histogram(metric_names::PASS_DURATION, elapsed.as_secs_f64());
		metrics_wrapper::set_gauge(metric_names::SAMPLES_SEEN, accumulator.samples_seen() as f64);

		Ok(ValidationReport::from_accumulator(global_step, batches, &accumulator, elapsed))
	}

	fn consume(&self, resolved: &ResolvedTensors, accumulator: &mut Accumulator, pb: &ProgressBar) -> Result<usize> {
		let [wrong, cost] = &resolved.fetches;
		let mut batches = 0;

		for batch in self.dataset.get_data() {
			let batch_size = batch.size()?;
			let feed = Feed::from_batch(&resolved.inputs, &batch)?;

			let outputs = self.session.run(&resolved.fetches, &feed)?;
			if outputs.len() != resolved.fetches.len() {
				return Err(ValhookError::Execution(format!(
					"Expected {} fetched values, got {}",
					resolved.fetches.len(),
					outputs.len()
				)));
			}
			let incorrect = graph::count_value(wrong.name(), &outputs[0])?;
			let batch_cost = graph::scalar_value(cost.name(), &outputs[1])?;

			accumulator.feed_batch(incorrect, f64::from(batch_cost), batch_size as u64)?;
			batches += 1;
			pb.inc(1);
		}

		Ok(batches)
	}

	fn emit(&self, report: &ValidationReport) {
		let error_name = self.config.error_summary_name();
		let cost_name = self.config.cost_summary_name();

		self.writer.add_summary(&error_name, report.error_rate, report.step);
		self.writer.add_summary(&cost_name, report.mean_cost, report.step);
		self.writer.flush();

		info!("{}: {:.4}", cost_name, report.mean_cost);
		info!("{}: {:.4}", error_name, report.error_rate);
	}

	fn progress_bar(&self) -> ProgressBar {
		if !self.config.show_progress {
			return ProgressBar::hidden();
		}
		let pb = ProgressBar::new(self.dataset.size() as u64);
		pb.set_style(
			ProgressStyle::default_bar()
				.template(progress::BAR_TEMPLATE)
				.unwrap_or_else(|_| ProgressStyle::default_bar())
				.progress_chars(progress::PROGRESS_CHARS),
		);
		pb
	}
}

impl Callback for Validator {
	fn before_train(&mut self) -> Result<()> {
		self.setup()
	}

	fn trigger(&mut self, global_step: u64) -> Result<()> {
		self.run_pass(global_step).map(|_| ())
	}

	fn name(&self) -> &str {
		"Validator"
	}
}
