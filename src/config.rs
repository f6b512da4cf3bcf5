use crate::constants::validation;
use crate::error::{Result, ValhookError};

/// Immutable settings for one validation hook.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationConfig {
	/// Namespace for the two reported summaries, `{prefix}_error` and `{prefix}_cost`.
	pub prefix: String,
	/// Number of outer-loop epochs between validation passes.
	pub period: usize,
	/// Graph output holding the number of wrong predictions in a batch.
	pub wrong_output: String,
	/// Graph output holding the mean cost over a batch.
	pub cost_output: String,
	pub show_progress: bool,
}

impl Default for ValidationConfig {
	fn default() -> Self {
		Self {
			prefix: validation::DEFAULT_PREFIX.to_string(),
			period: validation::DEFAULT_PERIOD,
			wrong_output: validation::DEFAULT_WRONG_OUTPUT.to_string(),
			cost_output: validation::DEFAULT_COST_OUTPUT.to_string(),
			show_progress: true,
		}
	}
}

impl ValidationConfig {
	pub fn builder() -> ValidationConfigBuilder {
		ValidationConfigBuilder::default()
	}

	pub fn validate(&self) -> Result<()> {
		if self.prefix.trim().is_empty() {
			return Err(ValhookError::InvalidParameter("Prefix must not be empty".into()));
		}
		if self.period == 0 {
			return Err(ValhookError::InvalidParameter(
				"Period must be greater than 0".into(),
			));
		}
		if self.wrong_output.trim().is_empty() {
			return Err(ValhookError::InvalidParameter(
				"Wrong-count output name must not be empty".into(),
			));
		}
		if self.cost_output.trim().is_empty() {
			return Err(ValhookError::InvalidParameter(
				"Cost output name must not be empty".into(),
			));
		}
		Ok(())
	}

	pub fn error_summary_name(&self) -> String {
		format!("{}{}", self.prefix, validation::ERROR_SUFFIX)
	}

	pub fn cost_summary_name(&self) -> String {
		format!("{}{}", self.prefix, validation::COST_SUFFIX)
	}
}

#[derive(Default)]
pub struct ValidationConfigBuilder {
	prefix: Option<String>,
	period: Option<usize>,
	wrong_output: Option<String>,
	cost_output: Option<String>,
	show_progress: Option<bool>,
}

impl ValidationConfigBuilder {
	pub fn prefix(mut self, prefix: impl Into<String>) -> Self {
		self.prefix = Some(prefix.into());
		self
	}

	pub fn period(mut self, period: usize) -> Self {
		self.period = Some(period);
		self
	}

	pub fn wrong_output(mut self, name: impl Into<String>) -> Self {
		self.wrong_output = Some(name.into());
		self
	}

	pub fn cost_output(mut self, name: impl Into<String>) -> Self {
		self.cost_output = Some(name.into());
		self
	}

	pub fn show_progress(mut self, show: bool) -> Self {
		self.show_progress = Some(show);
		self
	}

	pub fn build(self) -> ValidationConfig {
		let defaults = ValidationConfig::default();
		ValidationConfig {
			prefix: self.prefix.unwrap_or(defaults.prefix),
			period: self.period.unwrap_or(defaults.period),
			wrong_output: self.wrong_output.unwrap_or(defaults.wrong_output),
			cost_output: self.cost_output.unwrap_or(defaults.cost_output),
			show_progress: self.show_progress.unwrap_or(defaults.show_progress),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_summary_names() {
		let config = ValidationConfig::builder().prefix("val").build();
		assert_eq!(config.error_summary_name(), "val_error");
		assert_eq!(config.cost_summary_name(), "val_cost");
	}

	#[test]
	fn test_builder_keeps_unset_defaults() {
		let config = ValidationConfig::builder().period(5).build();
		assert_eq!(config.period, 5);
		assert_eq!(config.wrong_output, "wrong:0");
		assert_eq!(config.cost_output, "cost:0");
		assert!(config.show_progress);
	}
}
