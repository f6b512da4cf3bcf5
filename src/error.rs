use std::io;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ValhookError {
	/// Setup-time failure: unresolvable output names, missing collaborators, out-of-order lifecycle calls.
	#[error("Configuration error: {0}")]
	Configuration(String),
	#[error("Tensor not found: {0}")]
	TensorNotFound(String),
	#[error("Batch shape error: {0}")]
	BatchShape(String),
	#[error("Invariant violation: {0}")]
	InvariantViolation(String),
	#[error("Invalid output: {0}")]
	InvalidOutput(String),
	#[error("Execution error: {0}")]
	Execution(String),
	#[error("Invalid parameter: {0}")]
	InvalidParameter(String),
	#[error("IO error: {0}")]
	Io(#[from] io::Error),
	#[error("Parse error: {0}")]
	Parse(String),
	#[error("Serialization error: {0}")]
	Serialization(String),
}

impl ValhookError {
	/// Errors that can only be caused by how the hook was wired up, as opposed to the data it saw.
	pub fn is_configuration(&self) -> bool {
		matches!(
			self,
			ValhookError::Configuration(_) | ValhookError::InvalidParameter(_) | ValhookError::TensorNotFound(_)
		)
	}
}

impl From<ndarray::ShapeError> for ValhookError {
	fn from(err: ndarray::ShapeError) -> Self {
		ValhookError::BatchShape(err.to_string())
	}
}

impl From<serde_json::Error> for ValhookError {
	fn from(err: serde_json::Error) -> Self {
		ValhookError::Serialization(err.to_string())
	}
}

pub type Result<T> = std::result::Result<T, ValhookError>;
