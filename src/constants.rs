pub mod validation {
	pub const DEFAULT_PREFIX: &str = "validation";
	pub const DEFAULT_PERIOD: usize = 1;
	pub const DEFAULT_WRONG_OUTPUT: &str = "wrong:0";
	pub const DEFAULT_COST_OUTPUT: &str = "cost:0";
	pub const ERROR_SUFFIX: &str = "_error";
	pub const COST_SUFFIX: &str = "_cost";
}

pub mod metrics {
	pub const PASSES_TOTAL: &str = "valhook_validation_passes_total";
	pub const PASS_FAILURES_TOTAL: &str = "valhook_validation_failures_total";
	pub const PASS_DURATION: &str = "valhook_validation_pass_duration_seconds";
	pub const SAMPLES_SEEN: &str = "valhook_validation_samples";
}

pub mod progress {
	pub const BAR_TEMPLATE: &str = "[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} batches ({eta})";
	pub const PROGRESS_CHARS: &str = "=>-";
}

pub mod logging {
	pub const DEFAULT_LOG_DIRECTORY: &str = "logs";
	pub const LOG_FILE_NAME: &str = "valhook.log";
}
