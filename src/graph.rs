//! Narrow view of an inference engine: resolve named outputs once, then
//! fetch several of them in a single run per batch.

use crate::error::{Result, ValhookError};
use crate::training::Batch;
use indexmap::IndexMap;
use ndarray::ArrayD;
use std::fmt;

/// A graph tensor resolved by name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TensorHandle {
	name: String,
}

impl TensorHandle {
	pub fn new(name: impl Into<String>) -> Self {
		Self { name: name.into() }
	}

	pub fn name(&self) -> &str {
		&self.name
	}
}

impl fmt::Display for TensorHandle {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		write!(f, "{}", self.name)
	}
}

/// Input values for one run, keyed by input handle in declaration order.
#[derive(Debug, Clone, Default)]
pub struct Feed<'a> {
	entries: Vec<(&'a TensorHandle, &'a ArrayD<f32>)>,
}

impl<'a> Feed<'a> {
	pub fn new() -> Self {
		Self { entries: Vec::new() }
	}

	/// Pairs declared inputs with batch components positionally.
	pub fn from_batch(inputs: &'a [TensorHandle], batch: &'a Batch) -> Result<Self> {
		if inputs.len() != batch.num_components() {
			return Err(ValhookError::BatchShape(format!(
				"Graph declares {} inputs but the batch has {} components",
				inputs.len(),
				batch.num_components()
			)));
		}
		Ok(Self {
			entries: inputs.iter().zip(batch.components()).collect(),
		})
	}

	pub fn insert(&mut self, handle: &'a TensorHandle, value: &'a ArrayD<f32>) {
		self.entries.push((handle, value));
	}

	pub fn get(&self, name: &str) -> Option<&'a ArrayD<f32>> {
		self.entries
			.iter()
			.find(|(handle, _)| handle.name() == name)
			.map(|(_, value)| *value)
	}

	pub fn require(&self, name: &str) -> Result<&'a ArrayD<f32>> {
		self.get(name)
			.ok_or_else(|| ValhookError::Execution(format!("Input '{}' was not fed", name)))
	}

}

/// The inference engine as seen by the validation hook.
///
/// The hook only reads from the graph; implementations must not change
/// graph state in `run`.
pub trait Session: Send + Sync {
	/// Looks up a tensor by name, failing with `TensorNotFound` if the graph has none.
	fn get_tensor(&self, name: &str) -> Result<TensorHandle>;

	/// Inputs a batch must provide, in the order of the batch components.
	fn input_tensors(&self) -> Vec<TensorHandle>;

	/// Evaluates every fetch against the same feed and returns the values in fetch order.
	fn run(&self, fetches: &[TensorHandle], feed: &Feed<'_>) -> Result<Vec<ArrayD<f32>>>;
}

type OutputFn = Box<dyn Fn(&Feed<'_>) -> Result<ArrayD<f32>> + Send + Sync>;

/// In-memory graph whose outputs are plain functions of the feed.
pub struct FnGraph {
	inputs: Vec<TensorHandle>,
	outputs: IndexMap<String, OutputFn>,
}

impl FnGraph {
	pub fn new<I, S>(inputs: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		Self {
			inputs: inputs.into_iter().map(TensorHandle::new).collect(),
			outputs: IndexMap::new(),
		}
	}

	pub fn with_output<F>(mut self, name: impl Into<String>, output: F) -> Self
	where
		F: Fn(&Feed<'_>) -> Result<ArrayD<f32>> + Send + Sync + 'static,
	{
		self.outputs.insert(name.into(), Box::new(output));
		self
	}
}

impl fmt::Debug for FnGraph {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		f.debug_struct("FnGraph")
			.field("inputs", &self.inputs)
			.field("outputs", &self.outputs.keys().collect::<Vec<_>>())
			.finish()
	}
}

impl Session for FnGraph {
	fn get_tensor(&self, name: &str) -> Result<TensorHandle> {
		if self.outputs.contains_key(name) || self.inputs.iter().any(|input| input.name() == name) {
			Ok(TensorHandle::new(name))
		} else {
			Err(ValhookError::TensorNotFound(name.to_string()))
		}
	}

	fn input_tensors(&self) -> Vec<TensorHandle> {
		self.inputs.clone()
	}

	fn run(&self, fetches: &[TensorHandle], feed: &Feed<'_>) -> Result<Vec<ArrayD<f32>>> {
		for input in &self.inputs {
			feed.require(input.name())?;
		}
		fetches
			.iter()
			.map(|fetch| {
				let output = self
					.outputs
					.get(fetch.name())
					.ok_or_else(|| ValhookError::TensorNotFound(fetch.name().to_string()))?;
				output(feed)
			})
			.collect()
	}
}

/// Reads a fetched value that must hold exactly one element.
pub fn scalar_value(name: &str, value: &ArrayD<f32>) -> Result<f32> {
	if value.len() != 1 {
		return Err(ValhookError::InvalidOutput(format!(
			"'{}' must be a scalar, got shape {:?}",
			name,
			value.shape()
		)));
	}
	value
		.iter()
		.next()
		.copied()
		.ok_or_else(|| ValhookError::InvalidOutput(format!("'{}' is empty", name)))
}

/// Reads a fetched scalar that must be a non-negative whole number.
pub fn count_value(name: &str, value: &ArrayD<f32>) -> Result<u64> {
	let v = scalar_value(name, value)?;
	if !v.is_finite() || v < 0.0 || v.fract() != 0.0 {
		return Err(ValhookError::InvalidOutput(format!(
			"'{}' must be a non-negative integer count, got {}",
			name, v
		)));
	}
	Ok(v as u64)
}
